//! Percentile dice and roll sources.
//!
//! Every check is resolved against a single d100 roll. Where the roll comes
//! from is left to a [`Roller`]: a seeded RNG for play, or a queue of fixed
//! values for physical dice and tests.

pub mod roller;

pub use roller::{DiceRoller, FixedRoller, Roller};

use serde::{Deserialize, Serialize};

use crate::error::{MechError, MechResult};

/// A single percentile roll, always in 1-100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u32")]
pub struct PercentileRoll(u32);

impl PercentileRoll {
    /// Lowest face.
    pub const MIN: u32 = 1;
    /// Highest face.
    pub const MAX: u32 = 100;

    /// Validate a roll.
    pub fn new(value: i64) -> MechResult<Self> {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&value) {
            Ok(Self(value as u32))
        } else {
            Err(MechError::InvalidRoll(value))
        }
    }

    /// The face value.
    pub fn value(self) -> u32 {
        self.0
    }
}

impl TryFrom<i64> for PercentileRoll {
    type Error = MechError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PercentileRoll> for u32 {
    fn from(roll: PercentileRoll) -> Self {
        roll.0
    }
}

impl std::fmt::Display for PercentileRoll {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_faces() {
        assert_eq!(PercentileRoll::new(1).unwrap().value(), 1);
        assert_eq!(PercentileRoll::new(100).unwrap().value(), 100);
    }

    #[test]
    fn rejects_out_of_range() {
        assert_eq!(PercentileRoll::new(0), Err(MechError::InvalidRoll(0)));
        assert_eq!(PercentileRoll::new(101), Err(MechError::InvalidRoll(101)));
        assert!(PercentileRoll::new(-4).is_err());
    }

    #[test]
    fn display() {
        assert_eq!(PercentileRoll::new(42).unwrap().to_string(), "42");
    }

    #[test]
    fn serde_validates() {
        let r: PercentileRoll = serde_json::from_str("37").unwrap();
        assert_eq!(r.value(), 37);
        assert!(serde_json::from_str::<PercentileRoll>("0").is_err());
        assert_eq!(serde_json::to_string(&r).unwrap(), "37");
    }
}
