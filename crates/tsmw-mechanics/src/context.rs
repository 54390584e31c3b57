//! Situational context strings.
//!
//! A context is a semicolon-separated list of `key:value` clauses, e.g.
//! `"light:dim;distance:far"`. A clause without a colon is a bare flag.
//! A `city:<id>` clause also names the city whose alert clock a loud
//! failure raises.

use std::collections::BTreeMap;
use std::fmt;

/// The value side of a context clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextValue {
    /// A bare key with no `:value`.
    Flag,
    /// The text after the first colon, trimmed.
    Text(String),
}

/// A parsed context. Later clauses overwrite earlier ones with the same key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Context {
    clauses: BTreeMap<String, ContextValue>,
}

impl Context {
    /// An empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a context string. Empty input yields an empty context.
    pub fn parse(raw: &str) -> Self {
        let mut ctx = Self::new();
        for clause in raw.split(';').map(str::trim).filter(|c| !c.is_empty()) {
            let (key, value) = match clause.split_once(':') {
                Some((k, v)) => (k.trim(), ContextValue::Text(v.trim().to_string())),
                None => (clause, ContextValue::Flag),
            };
            if !key.is_empty() {
                ctx.clauses.insert(key.to_string(), value);
            }
        }
        ctx
    }

    /// Add or replace a clause.
    pub fn insert(&mut self, key: impl Into<String>, value: ContextValue) {
        self.clauses.insert(key.into(), value);
    }

    /// Builder form of [`insert`](Self::insert) for a `key:value` clause.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, ContextValue::Text(value.into()));
        self
    }

    /// Builder form of [`insert`](Self::insert) for a bare flag.
    pub fn with_flag(mut self, key: impl Into<String>) -> Self {
        self.insert(key, ContextValue::Flag);
        self
    }

    /// The clause for a key.
    pub fn get(&self, key: &str) -> Option<&ContextValue> {
        self.clauses.get(key)
    }

    /// The text value for a key, if it has one.
    pub fn text(&self, key: &str) -> Option<&str> {
        match self.clauses.get(key)? {
            ContextValue::Text(s) => Some(s),
            ContextValue::Flag => None,
        }
    }

    /// Whether a bare flag is set.
    pub fn flag(&self, key: &str) -> bool {
        matches!(self.clauses.get(key), Some(ContextValue::Flag))
    }

    /// Iterate clauses in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ContextValue)> {
        self.clauses.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of clauses.
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// Whether there are no clauses.
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}

/// Serializes back to `key:value;flag` form, keys in sorted order.
impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.clauses.iter().enumerate() {
            if i > 0 {
                f.write_str(";")?;
            }
            match value {
                ContextValue::Flag => write!(f, "{key}")?,
                ContextValue::Text(v) => write!(f, "{key}:{v}")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parse_pairs() {
        let ctx = Context::parse("light:dim;distance:far");
        assert_eq!(ctx.len(), 2);
        assert_eq!(ctx.text("light"), Some("dim"));
        assert_eq!(ctx.text("distance"), Some("far"));
    }

    #[test]
    fn parse_trims_and_skips_empty_clauses() {
        let ctx = Context::parse("  light : dark ;; cover:partial ; ");
        assert_eq!(ctx.text("light"), Some("dark"));
        assert_eq!(ctx.text("cover"), Some("partial"));
        assert_eq!(ctx.len(), 2);
    }

    #[test]
    fn bare_key_is_flag() {
        let ctx = Context::parse("challenging;light:dim");
        assert!(ctx.flag("challenging"));
        assert_eq!(ctx.get("challenging"), Some(&ContextValue::Flag));
        assert_eq!(ctx.text("challenging"), None);
        assert!(!ctx.flag("light"));
    }

    #[test]
    fn splits_on_first_colon_only() {
        let ctx = Context::parse("note:meet at 10:30");
        assert_eq!(ctx.text("note"), Some("meet at 10:30"));
    }

    #[test]
    fn empty_value_and_empty_key() {
        let ctx = Context::parse("light:;:dim");
        assert_eq!(ctx.text("light"), Some(""));
        assert_eq!(ctx.len(), 1);
    }

    #[test]
    fn empty_input() {
        assert!(Context::parse("").is_empty());
        assert!(Context::parse(" ; ;").is_empty());
    }

    #[test]
    fn later_clause_wins() {
        let ctx = Context::parse("light:dim;light:dark");
        assert_eq!(ctx.text("light"), Some("dark"));
    }

    #[test]
    fn display_sorted() {
        let ctx = Context::new().with("light", "dim").with_flag("alone").with("city", "rio");
        assert_eq!(ctx.to_string(), "alone;city:rio;light:dim");
    }

    fn recognized() -> impl Strategy<Value = Context> {
        (
            prop::option::of(prop::sample::select(vec!["dim", "dark"])),
            prop::option::of(Just("far")),
            prop::option::of(Just("partial")),
            prop::option::of(prop::sample::select(vec![
                "trivial",
                "routine",
                "standard",
                "challenging",
                "formidable",
                "desperate",
            ])),
        )
            .prop_map(|(light, distance, cover, difficulty)| {
                let mut ctx = Context::new();
                if let Some(v) = light {
                    ctx = ctx.with("light", v);
                }
                if let Some(v) = distance {
                    ctx = ctx.with("distance", v);
                }
                if let Some(v) = cover {
                    ctx = ctx.with("cover", v);
                }
                if let Some(v) = difficulty {
                    ctx = ctx.with_flag(v);
                }
                ctx
            })
    }

    proptest! {
        #[test]
        fn parse_inverts_display(ctx in recognized()) {
            prop_assert_eq!(Context::parse(&ctx.to_string()), ctx);
        }
    }
}
