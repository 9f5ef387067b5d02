//! Save/load persistence
//!
//! A single flat stats record, written as pretty-printed JSON to a fixed
//! path. A missing file is not an error; the defaults are used instead.

pub mod record;

pub use record::{SaveRecord, load_record, save_record};
