//! Percentile skill-check engine for tsmw.
//!
//! Provides d100 rolling behind an injectable [`Roller`], the `key:value`
//! context parser, two modifier schemes (situational and named difficulty),
//! roll-under resolution with a seven-step degree-of-success taxonomy, and
//! a full check that reads a character's rating from the world document.

pub mod check;
pub mod context;
pub mod dice;
pub mod error;
pub mod modifiers;
pub mod resolution;

pub use check::{CheckRequest, CheckResult, base_rating, perform_check, perform_check_with_roll};
pub use context::{Context, ContextValue};
pub use dice::{DiceRoller, FixedRoller, PercentileRoll, Roller};
pub use error::{MechError, MechResult};
pub use modifiers::{Difficulty, ModifierMode, TargetClamp, compute_target};
pub use resolution::{Degree, Quality, QuickVerdict, Resolution, quick_check, resolve};
