//! Skill catalog
//!
//! Skills stack: a player may learn the same skill several times. Stat boosts
//! apply once when learned; the rest are counted on every attack and change
//! the shape of the volley.

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

/// Number of skills offered per selection
pub const OFFER_COUNT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkillKind {
    /// +20% attack damage (compounding)
    AttackBoost,
    /// Flat movement speed increase
    SpeedBoost,
    /// Repeats the whole volley after a short delay, once per stack
    Multishot,
    /// Projectiles pass through enemies
    PiercingShot,
    /// Two extra attacks angled 30 degrees to each side
    DiagonalArrow,
    /// One more side-by-side projectile per stack
    ParallelShot,
}

/// Display metadata for a skill
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Skill {
    pub kind: SkillKind,
    pub name: &'static str,
    pub description: &'static str,
}

impl SkillKind {
    pub const ALL: [SkillKind; 6] = [
        SkillKind::AttackBoost,
        SkillKind::SpeedBoost,
        SkillKind::Multishot,
        SkillKind::ParallelShot,
        SkillKind::PiercingShot,
        SkillKind::DiagonalArrow,
    ];

    pub fn info(self) -> Skill {
        let (name, description) = match self {
            SkillKind::AttackBoost => ("AttackBoost +", "+20% ATK"),
            SkillKind::SpeedBoost => ("SpeedBoost +", "Move faster"),
            SkillKind::Multishot => ("Multishot", "Repeat each volley"),
            SkillKind::PiercingShot => ("PiercingShot", "Arrows pierce enemies"),
            SkillKind::DiagonalArrow => ("DiagonalArrow", "Extra arrows at 30 degrees"),
            SkillKind::ParallelShot => ("ParallelShot", "+1 Parallel Arrow"),
        };
        Skill {
            kind: self,
            name,
            description,
        }
    }

    /// Applied once on acquisition rather than read every attack
    pub fn is_stat_boost(self) -> bool {
        matches!(self, SkillKind::AttackBoost | SkillKind::SpeedBoost)
    }
}

/// Draw three distinct skills from the catalog
pub fn roll_offers<R: Rng + ?Sized>(rng: &mut R) -> [SkillKind; OFFER_COUNT] {
    let mut offers = [SkillKind::AttackBoost; OFFER_COUNT];
    for (slot, kind) in offers
        .iter_mut()
        .zip(SkillKind::ALL.choose_multiple(rng, OFFER_COUNT))
    {
        *slot = *kind;
    }
    offers
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_offers_are_distinct() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..100 {
            let offers = roll_offers(&mut rng);
            assert_ne!(offers[0], offers[1]);
            assert_ne!(offers[0], offers[2]);
            assert_ne!(offers[1], offers[2]);
        }
    }

    #[test]
    fn test_offers_deterministic_per_seed() {
        let mut a = Pcg32::seed_from_u64(42);
        let mut b = Pcg32::seed_from_u64(42);
        assert_eq!(roll_offers(&mut a), roll_offers(&mut b));
    }

    #[test]
    fn test_stat_boosts() {
        assert!(SkillKind::AttackBoost.is_stat_boost());
        assert!(SkillKind::SpeedBoost.is_stat_boost());
        assert!(!SkillKind::Multishot.is_stat_boost());
        assert_eq!(SkillKind::ParallelShot.info().description, "+1 Parallel Arrow");
    }
}
