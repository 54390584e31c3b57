//! Request side of the control-line protocol.

use std::fmt;
use std::sync::LazyLock;

use regex_lite::{Captures, Regex};
use serde::{Deserialize, Serialize};

use super::sanitize;

/// Which scene list a `REQUEST_SCENE` draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SceneKind {
    /// `cities.<city>.gm.hooks`
    Hooks,
    /// `cities.<city>.gm.setpieces`
    Setpieces,
}

impl SceneKind {
    /// The protocol word, which is also the key under `gm`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hooks => "hooks",
            Self::Setpieces => "setpieces",
        }
    }

    /// Parse a scene kind, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "hooks" => Some(Self::Hooks),
            "setpieces" => Some(Self::Setpieces),
            _ => None,
        }
    }
}

impl fmt::Display for SceneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recognized control line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Request {
    /// `[CHECK who=ID skill=NAME reason="..." context="..."?]`
    Check {
        /// Character id.
        who: String,
        /// Skill name.
        skill: String,
        /// Why the check is being made.
        reason: String,
        /// Raw context string, when given.
        context: Option<String>,
    },
    /// `[REQUEST_NPC city=ID role="..." tone="..."?]`
    Npc {
        /// City id.
        city: String,
        /// Role to match.
        role: String,
        /// Tone echoed back in the reference.
        tone: Option<String>,
    },
    /// `[REQUEST_NPC_SECRET id=ID key="..."]`
    NpcSecret {
        /// Composite NPC id.
        id: String,
        /// Secret field name.
        key: String,
    },
    /// `[REQUEST_SCENE city=ID type=hooks|setpieces]`
    Scene {
        /// City id.
        city: String,
        /// Which list to draw from.
        kind: SceneKind,
    },
    /// `[REQUEST_ARC_BEAT id=ID city=ID]`
    ArcBeat {
        /// Thread id.
        id: String,
        /// City the beat should mention.
        city: String,
    },
    /// `[TICK_CLOCK city=ID key=NAME +N|-N reason="..."]`
    TickClock {
        /// City id.
        city: String,
        /// Clock key.
        key: String,
        /// Signed step.
        delta: i64,
        /// Why the clock moved.
        reason: String,
    },
    /// `[SET path=a.b.c value=V reason="..."]`
    Set {
        /// Dotted path with at least two segments.
        path: String,
        /// The value as written, before coercion.
        value: String,
        /// Why the write is made.
        reason: String,
    },
}

impl Request {
    /// Find the first control line in `text`.
    ///
    /// Tags are tried in a fixed priority order and the first pattern that
    /// matches anywhere in the text wins. Malformed lines return `None`.
    pub fn parse(text: &str) -> Option<Self> {
        Tag::PRIORITY
            .iter()
            .find_map(|tag| tag.pattern().captures(text).and_then(|c| tag.build(&c)))
    }

    /// The protocol tag for this request.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Check { .. } => "CHECK",
            Self::Npc { .. } => "REQUEST_NPC",
            Self::NpcSecret { .. } => "REQUEST_NPC_SECRET",
            Self::Scene { .. } => "REQUEST_SCENE",
            Self::ArcBeat { .. } => "REQUEST_ARC_BEAT",
            Self::TickClock { .. } => "TICK_CLOCK",
            Self::Set { .. } => "SET",
        }
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Check {
                who,
                skill,
                reason,
                context,
            } => {
                write!(f, "[CHECK who={who} skill={skill} reason=\"{}\"", sanitize(reason))?;
                if let Some(c) = context {
                    write!(f, " context=\"{}\"", sanitize(c))?;
                }
                f.write_str("]")
            }
            Self::Npc { city, role, tone } => {
                write!(f, "[REQUEST_NPC city={city} role=\"{}\"", sanitize(role))?;
                if let Some(t) = tone {
                    write!(f, " tone=\"{}\"", sanitize(t))?;
                }
                f.write_str("]")
            }
            Self::NpcSecret { id, key } => {
                write!(f, "[REQUEST_NPC_SECRET id={id} key=\"{}\"]", sanitize(key))
            }
            Self::Scene { city, kind } => write!(f, "[REQUEST_SCENE city={city} type={kind}]"),
            Self::ArcBeat { id, city } => write!(f, "[REQUEST_ARC_BEAT id={id} city={city}]"),
            Self::TickClock {
                city,
                key,
                delta,
                reason,
            } => write!(
                f,
                "[TICK_CLOCK city={city} key={key} {delta:+} reason=\"{}\"]",
                sanitize(reason)
            ),
            Self::Set {
                path,
                value,
                reason,
            } => write!(
                f,
                "[SET path={path} value={value} reason=\"{}\"]",
                sanitize(reason)
            ),
        }
    }
}

static CHECK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\[CHECK\s+who=(\S+)\s+skill=(\S+)\s+reason="([^"]+)"(?:\s+context="([^"]*)")?\s*\]"#)
        .expect("valid regex")
});
static NPC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\[REQUEST_NPC\s+city=(\S+)\s+role="([^"]+)"(?:\s+tone="([^"]*)")?\s*\]"#)
        .expect("valid regex")
});
static NPC_SECRET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\[REQUEST_NPC_SECRET\s+id=([a-zA-Z0-9._-]+)\s+key="([^"]+)"\s*\]"#)
        .expect("valid regex")
});
static SCENE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\[REQUEST_SCENE\s+city=(\S+)\s+type=(hooks|setpieces)\s*\]")
        .expect("valid regex")
});
static ARC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\[REQUEST_ARC_BEAT\s+id=([A-Za-z0-9_-]+)\s+city=(\S+)\s*\]")
        .expect("valid regex")
});
static TICK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)\[TICK_CLOCK\s+city=(\S+)\s+key=([a-zA-Z0-9._-]+)\s+([+-]\d+)\s+reason="([^"]+)"\s*\]"#,
    )
    .expect("valid regex")
});
static SET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)\[SET\s+path=([a-zA-Z0-9._-]+(?:\.[a-zA-Z0-9._-]+)+)\s+value=(.+?)\s+reason="([^"]+)"\s*\]"#,
    )
    .expect("valid regex")
});

/// Control-line tags, in match order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tag {
    Check,
    Npc,
    NpcSecret,
    Scene,
    ArcBeat,
    TickClock,
    Set,
}

impl Tag {
    const PRIORITY: [Self; 7] = [
        Self::Check,
        Self::Npc,
        Self::NpcSecret,
        Self::Scene,
        Self::ArcBeat,
        Self::TickClock,
        Self::Set,
    ];

    fn pattern(self) -> &'static Regex {
        match self {
            Self::Check => &CHECK_RE,
            Self::Npc => &NPC_RE,
            Self::NpcSecret => &NPC_SECRET_RE,
            Self::Scene => &SCENE_RE,
            Self::ArcBeat => &ARC_RE,
            Self::TickClock => &TICK_RE,
            Self::Set => &SET_RE,
        }
    }

    fn build(self, caps: &Captures<'_>) -> Option<Request> {
        let group = |i: usize| caps.get(i).map(|m| m.as_str().to_string());
        let request = match self {
            Self::Check => Request::Check {
                who: group(1)?,
                skill: group(2)?,
                reason: group(3)?,
                context: group(4),
            },
            Self::Npc => Request::Npc {
                city: group(1)?,
                role: group(2)?,
                tone: group(3),
            },
            Self::NpcSecret => Request::NpcSecret {
                id: group(1)?,
                key: group(2)?,
            },
            Self::Scene => Request::Scene {
                city: group(1)?,
                kind: SceneKind::parse(&group(2)?)?,
            },
            Self::ArcBeat => Request::ArcBeat {
                id: group(1)?,
                city: group(2)?,
            },
            Self::TickClock => Request::TickClock {
                city: group(1)?,
                key: group(2)?,
                delta: saturating_delta(&group(3)?),
                reason: group(4)?,
            },
            Self::Set => Request::Set {
                path: group(1)?,
                value: group(2)?,
                reason: group(3)?,
            },
        };
        Some(request)
    }
}

/// Parse a signed step. Out-of-range steps saturate at the `i64` bounds.
fn saturating_delta(raw: &str) -> i64 {
    raw.parse().unwrap_or(if raw.starts_with('-') {
        i64::MIN
    } else {
        i64::MAX
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_check_with_context() {
        let req = Request::parse(
            r#"Kit slips past. [CHECK who=kit skill=Stealth reason="sneak past guard" context="light:dark;distance:far"]"#,
        )
        .unwrap();
        assert_eq!(
            req,
            Request::Check {
                who: "kit".to_string(),
                skill: "Stealth".to_string(),
                reason: "sneak past guard".to_string(),
                context: Some("light:dark;distance:far".to_string()),
            }
        );
    }

    #[test]
    fn parse_check_without_context() {
        let req = Request::parse(r#"[check who=kit skill=Hacking reason="door"]"#).unwrap();
        assert!(matches!(req, Request::Check { context: None, .. }));
    }

    #[test]
    fn check_requires_reason() {
        assert_eq!(Request::parse(r#"[CHECK who=kit skill=Stealth reason=""]"#), None);
        assert_eq!(Request::parse("[CHECK who=kit skill=Stealth]"), None);
    }

    #[test]
    fn npc_is_not_confused_with_secret() {
        let req = Request::parse(r#"[REQUEST_NPC_SECRET id=rio.fix_viviane key="debts"]"#).unwrap();
        assert_eq!(
            req,
            Request::NpcSecret {
                id: "rio.fix_viviane".to_string(),
                key: "debts".to_string(),
            }
        );

        let req = Request::parse(r#"[REQUEST_NPC city=rio role="fixer" tone=""]"#).unwrap();
        assert_eq!(
            req,
            Request::Npc {
                city: "rio".to_string(),
                role: "fixer".to_string(),
                tone: Some(String::new()),
            }
        );
    }

    #[test]
    fn parse_scene_and_arc() {
        let req = Request::parse("[REQUEST_SCENE city=rio type=SetPieces]").unwrap();
        assert_eq!(
            req,
            Request::Scene {
                city: "rio".to_string(),
                kind: SceneKind::Setpieces,
            }
        );
        assert_eq!(Request::parse("[REQUEST_SCENE city=rio type=rumors]"), None);

        let req = Request::parse("[REQUEST_ARC_BEAT id=3 city=rio]").unwrap();
        assert_eq!(req.tag(), "REQUEST_ARC_BEAT");
    }

    #[test]
    fn parse_tick() {
        let req = Request::parse(r#"[TICK_CLOCK city=rio key=alert -5 reason="lay low"]"#).unwrap();
        assert_eq!(
            req,
            Request::TickClock {
                city: "rio".to_string(),
                key: "alert".to_string(),
                delta: -5,
                reason: "lay low".to_string(),
            }
        );
        // Sign is mandatory.
        assert_eq!(Request::parse(r#"[TICK_CLOCK city=rio key=alert 5 reason="x"]"#), None);
    }

    #[test]
    fn oversized_tick_delta_saturates() {
        let up = Request::parse(r#"[TICK_CLOCK city=rio key=alert +99999999999999999999 reason="x"]"#);
        assert!(matches!(up, Some(Request::TickClock { delta: i64::MAX, .. })));
        let down = Request::parse(r#"[TICK_CLOCK city=rio key=alert -99999999999999999999 reason="x"]"#);
        assert!(matches!(down, Some(Request::TickClock { delta: i64::MIN, .. })));
    }

    #[test]
    fn parse_set() {
        let req =
            Request::parse(r#"[SET path=extensions.notes.mood value="tense night" reason="log"]"#)
                .unwrap();
        assert_eq!(
            req,
            Request::Set {
                path: "extensions.notes.mood".to_string(),
                value: "\"tense night\"".to_string(),
                reason: "log".to_string(),
            }
        );
        // Single-segment paths do not match.
        assert_eq!(Request::parse(r#"[SET path=mood value=1 reason="x"]"#), None);
    }

    #[test]
    fn priority_picks_check_first() {
        let text = r#"[TICK_CLOCK city=rio key=alert +1 reason="noise"] then [CHECK who=kit skill=Stealth reason="run"]"#;
        assert_eq!(Request::parse(text).unwrap().tag(), "CHECK");
    }

    #[test]
    fn plain_text_does_not_match() {
        assert_eq!(Request::parse("Kit waits in the alley."), None);
        assert_eq!(Request::parse("[CHECK who=kit"), None);
    }

    #[test]
    fn display_reparses() {
        let requests = [
            Request::Check {
                who: "kit".to_string(),
                skill: "Stealth".to_string(),
                reason: "say \"hi\"".to_string(),
                context: Some("light:dim".to_string()),
            },
            Request::Npc {
                city: "rio".to_string(),
                role: "fixer".to_string(),
                tone: None,
            },
            Request::TickClock {
                city: "rio".to_string(),
                key: "heat".to_string(),
                delta: 2,
                reason: "noise".to_string(),
            },
        ];
        for req in requests {
            let line = req.to_string();
            let back = Request::parse(&line).unwrap();
            assert_eq!(back.tag(), req.tag());
        }
        let line = Request::TickClock {
            city: "rio".to_string(),
            key: "heat".to_string(),
            delta: 2,
            reason: "noise".to_string(),
        }
        .to_string();
        assert_eq!(line, r#"[TICK_CLOCK city=rio key=heat +2 reason="noise"]"#);
    }
}
