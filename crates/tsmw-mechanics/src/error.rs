//! Error types for the check engine.

/// Errors that can occur while resolving a check.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MechError {
    /// No stat block exists for the character.
    #[error("unknown character id: {0}")]
    UnknownCharacter(String),

    /// The character has no usable rating for the skill.
    #[error("unknown skill for {who}: {skill}")]
    UnknownSkill {
        /// The character that was checked.
        who: String,
        /// The skill that was missing.
        skill: String,
    },

    /// A supplied roll was outside 1-100.
    #[error("invalid roll: {0} (expected 1-100)")]
    InvalidRoll(i64),
}

impl MechError {
    /// Whether this error means a character or skill could not be found.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::UnknownCharacter(_) | Self::UnknownSkill { .. })
    }
}

/// Convenience result type for check operations.
pub type MechResult<T> = Result<T, MechError>;
