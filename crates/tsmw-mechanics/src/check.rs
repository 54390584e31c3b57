//! Skill checks against the world document.
//!
//! A check reads the character's rating from `extensions.stats`, applies the
//! context's modifiers to get a target, rolls (or takes a supplied roll), and
//! resolves.

use serde::{Deserialize, Serialize};
use tsmw_core::WorldDocument;

use crate::context::Context;
use crate::dice::{PercentileRoll, Roller};
use crate::error::{MechError, MechResult};
use crate::modifiers::{ModifierMode, TargetClamp, compute_target};
use crate::resolution::{Degree, resolve};

/// Failures by at least this margin count as loud.
pub const LOUD_FAILURE_MARGIN: u32 = 20;

/// A request to check one character's skill.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckRequest {
    /// Character id.
    pub who: String,
    /// Skill name (case-sensitive).
    pub skill: String,
    /// Raw context string, e.g. `"light:dim;distance:far"`.
    pub context: String,
}

impl CheckRequest {
    /// A request with no context.
    pub fn new(who: impl Into<String>, skill: impl Into<String>) -> Self {
        Self {
            who: who.into(),
            skill: skill.into(),
            context: String::new(),
        }
    }

    /// Attach a context string.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = context.into();
        self
    }
}

/// The outcome of one check. Never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    /// Character id.
    pub who: String,
    /// Skill name.
    pub skill: String,
    /// The character's unmodified rating.
    pub base: i32,
    /// Target after modifiers and clamping.
    pub target: i32,
    /// The d100 roll.
    pub roll: PercentileRoll,
    /// Whether the roll was at or below the target.
    pub success: bool,
    /// Distance between roll and target.
    pub margin: u32,
    /// Degree of success.
    pub degree: Degree,
    /// The raw context the check was made under.
    pub context: String,
}

impl CheckResult {
    /// A failure by [`LOUD_FAILURE_MARGIN`] or more.
    pub fn is_loud_failure(&self) -> bool {
        !self.success && self.margin >= LOUD_FAILURE_MARGIN
    }
}

/// Look up a character's rating for a skill.
///
/// Only a missing character, a missing skill or a non-numeric rating fails.
/// Fractional ratings are floored.
pub fn base_rating(document: &WorldDocument, who: &str, skill: &str) -> MechResult<i32> {
    let character = document
        .character(who)
        .ok_or_else(|| MechError::UnknownCharacter(who.to_string()))?;
    let rating = character
        .rating(skill)
        .ok_or_else(|| MechError::UnknownSkill {
            who: who.to_string(),
            skill: skill.to_string(),
        })?;
    Ok(rating.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32)
}

/// Perform a check, drawing the roll from `roller`.
pub fn perform_check<R: Roller + ?Sized>(
    document: &WorldDocument,
    request: &CheckRequest,
    roller: &mut R,
    clamp: TargetClamp,
) -> MechResult<CheckResult> {
    // Look the character up before rolling so a bad request consumes no roll.
    base_rating(document, &request.who, &request.skill)?;
    perform_check_with_roll(document, request, roller.roll_d100(), clamp)
}

/// Perform a check with a roll supplied by the caller (e.g. physical dice).
pub fn perform_check_with_roll(
    document: &WorldDocument,
    request: &CheckRequest,
    roll: PercentileRoll,
    clamp: TargetClamp,
) -> MechResult<CheckResult> {
    let base = base_rating(document, &request.who, &request.skill)?;
    let context = Context::parse(&request.context);
    let target = compute_target(base, &context, clamp);
    let resolution = resolve(target, roll);

    tracing::debug!(
        who = %request.who,
        skill = %request.skill,
        base,
        mode = ?ModifierMode::detect(&context),
        target,
        roll = roll.value(),
        degree = %resolution.degree,
        "check resolved"
    );

    Ok(CheckResult {
        who: request.who.clone(),
        skill: request.skill.clone(),
        base,
        target,
        roll,
        success: resolution.success,
        margin: resolution.margin,
        degree: resolution.degree,
        context: request.context.clone(),
    })
}
