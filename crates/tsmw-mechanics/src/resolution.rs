//! Roll-under resolution.
//!
//! A check succeeds when the d100 roll is at or below the target. The
//! distance between the two is the margin, and the margin (together with
//! very low or very high rolls) decides the degree of success.

use serde::{Deserialize, Serialize};

use crate::dice::PercentileRoll;

/// Narrative degree of success.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Degree {
    /// Success by 30+ or a roll of 5 or less.
    Critical,
    /// Success by 20-29.
    Excellent,
    /// Success by 6-19.
    Standard,
    /// Success by 0-5.
    Marginal,
    /// Failure by 30+ or a roll of 95 or more.
    Complication,
    /// Failure by 20-29.
    Fail,
    /// Failure by 1-19.
    NearMiss,
}

impl Degree {
    /// Whether this degree is on the success side.
    pub fn is_success(self) -> bool {
        matches!(
            self,
            Self::Critical | Self::Excellent | Self::Standard | Self::Marginal
        )
    }

    /// The protocol word for this degree.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::Excellent => "Excellent",
            Self::Standard => "Standard",
            Self::Marginal => "Marginal",
            Self::Complication => "Complication",
            Self::Fail => "Fail",
            Self::NearMiss => "NearMiss",
        }
    }

    /// Classify a resolved roll. Rules are checked top to bottom.
    fn classify(success: bool, margin: u32, roll: u32) -> Self {
        if success {
            if roll <= 5 || margin >= 30 {
                Self::Critical
            } else if margin >= 20 {
                Self::Excellent
            } else if margin >= 6 {
                Self::Standard
            } else {
                Self::Marginal
            }
        } else if roll >= 95 || margin >= 30 {
            Self::Complication
        } else if margin >= 20 {
            Self::Fail
        } else {
            Self::NearMiss
        }
    }
}

impl std::fmt::Display for Degree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Degree {
    type Err = String;

    /// Parse a protocol word, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [
            Self::Critical,
            Self::Excellent,
            Self::Standard,
            Self::Marginal,
            Self::Complication,
            Self::Fail,
            Self::NearMiss,
        ]
        .into_iter()
        .find(|d| d.as_str().eq_ignore_ascii_case(s))
        .ok_or_else(|| format!("unknown degree: {s}"))
    }
}

/// The verdict for one roll against one target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    /// Whether the roll was at or below the target.
    pub success: bool,
    /// Distance between roll and target.
    pub margin: u32,
    /// Degree of success.
    pub degree: Degree,
}

/// Resolve a roll against a target number.
pub fn resolve(target: i32, roll: PercentileRoll) -> Resolution {
    let value = roll.value();
    let diff = i64::from(target) - i64::from(value);
    let success = diff >= 0;
    let margin = u32::try_from(diff.unsigned_abs()).unwrap_or(u32::MAX);
    Resolution {
        success,
        margin,
        degree: Degree::classify(success, margin, value),
    }
}

/// Coarse roll quality, independent of the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    /// A roll of 5 or less.
    Crit,
    /// A roll of 96 or more.
    Fumble,
    /// Anything else.
    Normal,
}

impl Quality {
    /// Classify a roll.
    pub fn of(roll: PercentileRoll) -> Self {
        match roll.value() {
            ..=5 => Self::Crit,
            96.. => Self::Fumble,
            _ => Self::Normal,
        }
    }

    /// Lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Crit => "crit",
            Self::Fumble => "fumble",
            Self::Normal => "normal",
        }
    }
}

impl std::fmt::Display for Quality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A threshold check with no character lookup: the verdict plus roll quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickVerdict {
    /// The threshold rolled against.
    pub threshold: i32,
    /// The roll.
    pub roll: PercentileRoll,
    /// The full resolution.
    pub resolution: Resolution,
    /// Crit / fumble / normal.
    pub quality: Quality,
}

/// Resolve a roll against a known threshold.
pub fn quick_check(threshold: i32, roll: PercentileRoll) -> QuickVerdict {
    QuickVerdict {
        threshold,
        roll,
        resolution: resolve(threshold, roll),
        quality: Quality::of(roll),
    }
}
