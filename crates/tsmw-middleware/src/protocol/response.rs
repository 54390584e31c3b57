//! Response side of the control-line protocol.

use std::fmt;

use serde_json::Value;
use tsmw_mechanics::CheckResult;

use super::request::SceneKind;
use super::sanitize;

/// A response line. `Display` renders the bracketed wire form.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    /// `[RESULT ...]` for a resolved check.
    Result(CheckResult),
    /// `[NPC_REF ...]`; never carries secret fields.
    NpcRef {
        /// Composite NPC id.
        id: String,
        /// Display name.
        name: String,
        /// Public description.
        surface: String,
        /// What the NPC wants or fears.
        leverage: String,
        /// Tags.
        tags: String,
        /// Tone echoed from the request.
        tone: String,
    },
    /// `[NPC_NONE ...]`
    NpcNone {
        /// City searched.
        city: String,
        /// Role requested.
        role: String,
    },
    /// `[NPC_SECRET ...]`
    NpcSecret {
        /// Composite NPC id.
        id: String,
        /// Secret field name.
        key: String,
        /// Flattened value.
        value: String,
    },
    /// `[NPC_SECRET_NONE ...]`
    NpcSecretNone {
        /// Composite NPC id.
        id: String,
        /// Secret field name.
        key: String,
    },
    /// `[SCENE_REF ...]`
    SceneRef {
        /// City id.
        city: String,
        /// Which list was drawn from.
        kind: SceneKind,
        /// The picked entry.
        text: String,
    },
    /// `[SCENE_NONE ...]`
    SceneNone {
        /// City id.
        city: String,
        /// Which list was empty.
        kind: SceneKind,
    },
    /// `[ARC_BEAT ...]`
    ArcBeat {
        /// Thread id.
        id: String,
        /// City id.
        city: String,
        /// The matching beat.
        text: String,
    },
    /// `[ARC_HOLD ...]`: the thread exists but has no beat for the city.
    ArcHold {
        /// Thread id.
        id: String,
        /// City id.
        city: String,
    },
    /// `[ARC_NONE ...]`
    ArcNone {
        /// Thread id.
        id: String,
    },
    /// `[OK_CLOCK ...]`
    OkClock {
        /// City id.
        city: String,
        /// Clock key.
        key: String,
        /// New value.
        value: i64,
        /// Why the clock moved.
        reason: String,
    },
    /// `[OK ...]` after a gated write.
    Ok {
        /// Path written.
        path: String,
        /// Coerced value, rendered as JSON.
        value: Value,
        /// Why the write was made.
        reason: String,
    },
    /// `[ERROR ...]`
    Error {
        /// Human-readable message.
        msg: String,
    },
}

impl Response {
    /// An error response.
    pub fn error(msg: impl Into<String>) -> Self {
        Self::Error { msg: msg.into() }
    }

    /// Whether this is an `[ERROR ...]` line.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    /// The protocol tag for this response.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Result(_) => "RESULT",
            Self::NpcRef { .. } => "NPC_REF",
            Self::NpcNone { .. } => "NPC_NONE",
            Self::NpcSecret { .. } => "NPC_SECRET",
            Self::NpcSecretNone { .. } => "NPC_SECRET_NONE",
            Self::SceneRef { .. } => "SCENE_REF",
            Self::SceneNone { .. } => "SCENE_NONE",
            Self::ArcBeat { .. } => "ARC_BEAT",
            Self::ArcHold { .. } => "ARC_HOLD",
            Self::ArcNone { .. } => "ARC_NONE",
            Self::OkClock { .. } => "OK_CLOCK",
            Self::Ok { .. } => "OK",
            Self::Error { .. } => "ERROR",
        }
    }
}

impl From<CheckResult> for Response {
    fn from(result: CheckResult) -> Self {
        Self::Result(result)
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Result(r) => write!(
                f,
                "[RESULT who={} skill={} roll={} target={} success={} margin={} degree={} notes=\"{}\"]",
                r.who,
                r.skill,
                r.roll,
                r.target,
                r.success,
                r.margin,
                r.degree,
                sanitize(&r.context)
            ),
            Self::NpcRef {
                id,
                name,
                surface,
                leverage,
                tags,
                tone,
            } => write!(
                f,
                "[NPC_REF id={id} name=\"{}\" surface=\"{}\" leverage=\"{}\" tags=\"{}\" tone=\"{}\"]",
                sanitize(name),
                sanitize(surface),
                sanitize(leverage),
                sanitize(tags),
                sanitize(tone)
            ),
            Self::NpcNone { city, role } => {
                write!(f, "[NPC_NONE city={city} role=\"{}\"]", sanitize(role))
            }
            Self::NpcSecret { id, key, value } => write!(
                f,
                "[NPC_SECRET id={id} key=\"{}\" value=\"{}\"]",
                sanitize(key),
                sanitize(value)
            ),
            Self::NpcSecretNone { id, key } => {
                write!(f, "[NPC_SECRET_NONE id={id} key=\"{}\"]", sanitize(key))
            }
            Self::SceneRef { city, kind, text } => write!(
                f,
                "[SCENE_REF city={city} type={kind} text=\"{}\"]",
                sanitize(text)
            ),
            Self::SceneNone { city, kind } => write!(f, "[SCENE_NONE city={city} type={kind}]"),
            Self::ArcBeat { id, city, text } => write!(
                f,
                "[ARC_BEAT id={id} city={city} text=\"{}\"]",
                sanitize(text)
            ),
            Self::ArcHold { id, city } => write!(f, "[ARC_HOLD id={id} city={city}]"),
            Self::ArcNone { id } => write!(f, "[ARC_NONE id={id}]"),
            Self::OkClock {
                city,
                key,
                value,
                reason,
            } => write!(
                f,
                "[OK_CLOCK city={city} key={key} value={value} reason=\"{}\"]",
                sanitize(reason)
            ),
            Self::Ok {
                path,
                value,
                reason,
            } => write!(
                f,
                "[OK path={path} value={value} reason=\"{}\"]",
                sanitize(reason)
            ),
            Self::Error { msg } => write!(f, "[ERROR msg=\"{}\"]", sanitize(msg)),
        }
    }
}
