//! Target-number modifiers.
//!
//! Two schemes, chosen by what the context contains:
//! - **Situational**: additive penalties from a fixed table of
//!   `key:value` clauses (`light:dim`, `distance:far`, ...).
//! - **Difficulty**: one named difficulty (`challenging`, or
//!   `difficulty:challenging`) applied once to the base.

use serde::{Deserialize, Serialize};

use crate::context::Context;

/// Situational modifier table: `(key, value, modifier)`.
pub const SITUATIONAL_MODIFIERS: &[(&str, &str, i32)] = &[
    ("light", "dim", -10),
    ("light", "dark", -20),
    ("distance", "far", -10),
    ("cover", "partial", -10),
];

/// A named difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// +10
    Trivial,
    /// +5
    Routine,
    /// ±0
    Standard,
    /// −5
    Challenging,
    /// −10
    Formidable,
    /// −20
    Desperate,
}

impl Difficulty {
    /// Every difficulty, easiest first.
    pub const ALL: [Self; 6] = [
        Self::Trivial,
        Self::Routine,
        Self::Standard,
        Self::Challenging,
        Self::Formidable,
        Self::Desperate,
    ];

    /// The modifier applied to the base threshold.
    pub fn modifier(self) -> i32 {
        match self {
            Self::Trivial => 10,
            Self::Routine => 5,
            Self::Standard => 0,
            Self::Challenging => -5,
            Self::Formidable => -10,
            Self::Desperate => -20,
        }
    }

    /// Lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Trivial => "trivial",
            Self::Routine => "routine",
            Self::Standard => "standard",
            Self::Challenging => "challenging",
            Self::Formidable => "formidable",
            Self::Desperate => "desperate",
        }
    }

    /// Parse a difficulty name (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        Self::ALL.into_iter().find(|d| d.name() == s)
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Which modifier scheme a context selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModifierMode {
    /// Additive situational penalties.
    Situational,
    /// A single named difficulty.
    Difficulty(Difficulty),
}

impl ModifierMode {
    /// Pick the scheme for a context.
    ///
    /// `difficulty:<name>` wins, then the first bare flag naming a difficulty;
    /// anything else is situational.
    pub fn detect(ctx: &Context) -> Self {
        if let Some(d) = ctx.text("difficulty").and_then(Difficulty::parse) {
            return Self::Difficulty(d);
        }
        ctx.iter()
            .filter(|(key, _)| ctx.flag(key))
            .find_map(|(key, _)| Difficulty::parse(key))
            .map_or(Self::Situational, Self::Difficulty)
    }

    /// Total modifier this mode yields for a context.
    pub fn modifier(self, ctx: &Context) -> i32 {
        match self {
            Self::Situational => situational_modifier(ctx),
            Self::Difficulty(d) => d.modifier(),
        }
    }
}

/// Sum of every situational table entry the context matches.
///
/// Unknown keys and values are ignored.
pub fn situational_modifier(ctx: &Context) -> i32 {
    SITUATIONAL_MODIFIERS
        .iter()
        .filter(|(key, value, _)| ctx.text(key) == Some(*value))
        .map(|(_, _, m)| m)
        .sum()
}

/// How a computed target is bounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetClamp {
    /// Leave the target as computed; it may fall below 0 or exceed 100.
    #[default]
    Unclamped,
    /// Clamp into 0-100.
    Percentile,
}

impl TargetClamp {
    /// Apply the policy.
    pub fn apply(self, target: i32) -> i32 {
        match self {
            Self::Unclamped => target,
            Self::Percentile => target.clamp(0, 100),
        }
    }
}

/// Compute the target number for a base rating under a context.
pub fn compute_target(base: i32, ctx: &Context, clamp: TargetClamp) -> i32 {
    let mode = ModifierMode::detect(ctx);
    clamp.apply(base.saturating_add(mode.modifier(ctx)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn target(base: i32, ctx: &str) -> i32 {
        compute_target(base, &Context::parse(ctx), TargetClamp::Unclamped)
    }

    #[test]
    fn no_context() {
        assert_eq!(target(50, ""), 50);
    }

    #[test]
    fn single_modifiers() {
        assert_eq!(target(50, "light:dim"), 40);
        assert_eq!(target(50, "light:dark"), 30);
        assert_eq!(target(50, "distance:far"), 40);
        assert_eq!(target(50, "cover:partial"), 40);
    }

    #[test]
    fn modifiers_stack() {
        assert_eq!(target(50, "light:dark;distance:far"), 20);
        assert_eq!(target(60, "light:dark;distance:far;cover:partial"), 20);
    }

    #[test]
    fn unknown_keys_and_values_ignored() {
        assert_eq!(target(50, "weather:rain;light:bright;distance:near"), 50);
        assert_eq!(target(50, "city:rio;light:dim"), 40);
    }

    #[test]
    fn values_are_case_sensitive() {
        assert_eq!(target(50, "light:Dim"), 50);
    }

    #[test]
    fn difficulty_table() {
        assert_eq!(target(50, "trivial"), 60);
        assert_eq!(target(50, "routine"), 55);
        assert_eq!(target(50, "standard"), 50);
        assert_eq!(target(50, "challenging"), 45);
        assert_eq!(target(50, "formidable"), 40);
        assert_eq!(target(50, "desperate"), 30);
    }

    #[test]
    fn difficulty_key_form() {
        assert_eq!(target(50, "difficulty:Formidable"), 40);
        assert_eq!(target(50, "difficulty:impossible;light:dim"), 40);
    }

    #[test]
    fn difficulty_mode_ignores_situational_keys() {
        assert_eq!(target(50, "challenging;light:dark;distance:far"), 45);
        assert_eq!(
            ModifierMode::detect(&Context::parse("light:dark;desperate")),
            ModifierMode::Difficulty(Difficulty::Desperate)
        );
    }

    #[test]
    fn difficulty_value_under_other_key_is_situational() {
        assert_eq!(
            ModifierMode::detect(&Context::parse("mood:desperate")),
            ModifierMode::Situational
        );
    }

    #[test]
    fn unclamped_can_go_negative() {
        assert_eq!(target(10, "light:dark;distance:far;cover:partial"), -30);
        assert_eq!(target(95, "trivial"), 105);
    }

    #[test]
    fn percentile_clamp() {
        let ctx = Context::parse("light:dark;distance:far;cover:partial");
        assert_eq!(compute_target(10, &ctx, TargetClamp::Percentile), 0);
        let ctx = Context::parse("trivial");
        assert_eq!(compute_target(95, &ctx, TargetClamp::Percentile), 100);
    }

    #[test]
    fn difficulty_parse() {
        assert_eq!(Difficulty::parse(" ROUTINE "), Some(Difficulty::Routine));
        assert_eq!(Difficulty::parse("heroic"), None);
        assert_eq!(Difficulty::Challenging.to_string(), "challenging");
    }

    proptest! {
        #[test]
        fn clause_order_does_not_matter(
            base in 0i32..=100,
            clauses in prop::sample::subsequence(
                vec!["light:dim", "distance:far", "cover:partial", "weather:rain", "city:rio"],
                0..=5,
            ),
        ) {
            let forward = target(base, &clauses.join(";"));
            let mut reversed = clauses.clone();
            reversed.reverse();
            let backward = target(base, &reversed.join(";"));
            prop_assert_eq!(forward, backward);
        }
    }
}
