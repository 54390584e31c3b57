use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{StoreError, StoreResult};
use crate::path::DocPath;

/// The namespace untrusted callers are allowed to write into.
pub const DEFAULT_GATED_PREFIX: &str = "extensions.";

/// The world bible: a tree of string keys to scalars, lists, or nested objects.
///
/// The root is always an object. Keys are serialized in sorted order, so a
/// saved document diffs cleanly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorldDocument {
    root: Map<String, Value>,
}

impl WorldDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a JSON value. Returns `None` unless the value is an object.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(root) => Some(Self { root }),
            _ => None,
        }
    }

    /// The document as a JSON value.
    pub fn to_value(&self) -> Value {
        Value::Object(self.root.clone())
    }

    /// The root object.
    pub fn root(&self) -> &Map<String, Value> {
        &self.root
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// Look up a dotted path. Missing segments and malformed paths yield `None`.
    pub fn get(&self, path: &str) -> Option<&Value> {
        let path = DocPath::parse(path).ok()?;
        self.get_at(&path)
    }

    /// Look up an already-parsed path.
    pub fn get_at(&self, path: &DocPath) -> Option<&Value> {
        let (first, rest) = path.segments().split_first()?;
        rest.iter()
            .try_fold(self.root.get(first)?, |node, seg| node.as_object()?.get(seg))
    }

    /// Look up a number at a dotted path, floored to an integer.
    pub fn get_i64(&self, path: &str) -> Option<i64> {
        self.get(path).and_then(whole_number)
    }

    /// Look up a string at a dotted path.
    pub fn get_str(&self, path: &str) -> Option<&str> {
        self.get(path).and_then(Value::as_str)
    }

    /// Whether anything is stored at a dotted path.
    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    // -----------------------------------------------------------------------
    // Writes
    // -----------------------------------------------------------------------

    /// Set a value at a dotted path, creating intermediate objects as needed.
    ///
    /// An intermediate segment holding a non-object value is replaced by an
    /// empty object. Saved documents rely on this, so it stays the default;
    /// use [`set_strict`](Self::set_strict) to refuse instead.
    pub fn set(&mut self, path: &str, value: Value) -> StoreResult<()> {
        let path = DocPath::parse(path)?;
        self.set_at(&path, value);
        Ok(())
    }

    /// Set a value at an already-parsed path (lenient, see [`set`](Self::set)).
    pub fn set_at(&mut self, path: &DocPath, value: Value) {
        let mut cur = &mut self.root;
        for seg in path.parents() {
            cur = ensure_object(
                cur.entry(seg.clone())
                    .or_insert_with(|| Value::Object(Map::new())),
            );
        }
        cur.insert(path.leaf().to_string(), value);
    }

    /// Set a value at a dotted path, failing with [`StoreError::PathConflict`]
    /// if an intermediate segment exists but is not an object.
    pub fn set_strict(&mut self, path: &str, value: Value) -> StoreResult<()> {
        let path = DocPath::parse(path)?;
        let mut cur = &mut self.root;
        for (depth, seg) in path.parents().iter().enumerate() {
            let slot = cur
                .entry(seg.clone())
                .or_insert_with(|| Value::Object(Map::new()));
            match slot {
                Value::Object(map) => cur = map,
                _ => {
                    let at = path.segments()[..=depth].join(".");
                    return Err(StoreError::PathConflict(at));
                }
            }
        }
        cur.insert(path.leaf().to_string(), value);
        Ok(())
    }

    /// Set a value, but only inside the default gated namespace (`extensions.`).
    pub fn write_gated(&mut self, path: &str, value: Value) -> StoreResult<()> {
        self.write_gated_in(DEFAULT_GATED_PREFIX, path, value)
    }

    /// Set a value, but only if `path` begins with `prefix`.
    ///
    /// This is a plain prefix check on the raw path text.
    pub fn write_gated_in(&mut self, prefix: &str, path: &str, value: Value) -> StoreResult<()> {
        if !path.starts_with(prefix) {
            tracing::warn!(path, prefix, "gated write denied");
            return Err(StoreError::PermissionDenied(path.to_string()));
        }
        self.set(path, value)
    }
}

/// Any finite JSON number, floored to an integer.
///
/// `55`, `55.0` and `55.9` all read as `55`. Values past the `i64` range
/// saturate. Non-numbers yield `None`.
pub fn whole_number(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.is_finite())
            .map(|f| f.floor() as i64)
    })
}

/// Turn a slot into an object (replacing whatever was there) and borrow it.
fn ensure_object(slot: &mut Value) -> &mut Map<String, Value> {
    if !slot.is_object() {
        *slot = Value::Object(Map::new());
    }
    match slot {
        Value::Object(map) => map,
        _ => unreachable!("slot was just replaced with an object"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn sample() -> WorldDocument {
        WorldDocument::from_value(json!({
            "extensions": { "stats": { "kit": { "skills": { "Stealth": 55 } } } },
            "cities": { "rio": { "gm": { "clocks": { "alert": 2 } } } },
            "meta": { "title": "Neon Rio" }
        }))
        .unwrap()
    }

    #[test]
    fn get_nested() {
        let doc = sample();
        assert_eq!(
            doc.get("extensions.stats.kit.skills.Stealth"),
            Some(&json!(55))
        );
        assert_eq!(doc.get_i64("cities.rio.gm.clocks.alert"), Some(2));
        assert_eq!(doc.get_str("meta.title"), Some("Neon Rio"));
    }

    #[test]
    fn get_missing_is_none() {
        let doc = sample();
        assert!(doc.get("cities.lagos").is_none());
        assert!(doc.get("meta.title.deeper").is_none());
        assert!(doc.get("a..b").is_none());
        assert!(!doc.contains("extensions.stats.kit.skills.stealth"));
    }

    #[test]
    fn set_creates_intermediates() {
        let mut doc = WorldDocument::new();
        doc.set("cities.lagos.gm.clocks.heat", json!(1)).unwrap();
        assert_eq!(doc.get("cities.lagos.gm.clocks.heat"), Some(&json!(1)));
        assert!(doc.get("cities.lagos.gm").unwrap().is_object());
    }

    #[test]
    fn set_overwrites_scalar_intermediate() {
        let mut doc = sample();
        doc.set("meta.title.sub", json!("x")).unwrap();
        assert_eq!(doc.get("meta.title.sub"), Some(&json!("x")));
        assert!(doc.get("meta.title").unwrap().is_object());
    }

    #[test]
    fn set_strict_refuses_scalar_intermediate() {
        let mut doc = sample();
        let err = doc.set_strict("meta.title.sub", json!("x")).unwrap_err();
        assert!(matches!(err, StoreError::PathConflict(ref at) if at == "meta.title"));
        assert_eq!(doc.get_str("meta.title"), Some("Neon Rio"));
    }

    #[test]
    fn set_strict_creates_missing() {
        let mut doc = sample();
        doc.set_strict("cities.rio.gm.hooks", json!(["a"])).unwrap();
        assert_eq!(doc.get("cities.rio.gm.hooks"), Some(&json!(["a"])));
    }

    #[test]
    fn set_invalid_path() {
        let mut doc = WorldDocument::new();
        assert!(matches!(
            doc.set("", json!(1)),
            Err(StoreError::InvalidPath(_))
        ));
    }

    #[test]
    fn gated_write_denied_outside_namespace() {
        let mut doc = sample();
        let err = doc.write_gated("secrets.x", json!(1)).unwrap_err();
        assert!(matches!(err, StoreError::PermissionDenied(ref p) if p == "secrets.x"));
        assert!(doc.get("secrets").is_none());
    }

    #[test]
    fn gated_write_allowed_inside_namespace() {
        let mut doc = sample();
        doc.write_gated("extensions.x", json!(true)).unwrap();
        assert_eq!(doc.get("extensions.x"), Some(&json!(true)));
        // siblings survive
        assert!(doc.contains("extensions.stats.kit"));
    }

    #[test]
    fn gated_prefix_is_textual() {
        let mut doc = WorldDocument::new();
        assert!(doc.write_gated("extensions", json!(1)).is_err());
        assert!(doc.write_gated("extensionsx.a", json!(1)).is_err());
        assert!(doc.write_gated_in("house.", "house.rules", json!(1)).is_ok());
    }

    #[test]
    fn numbers_floor_to_integers() {
        let doc = WorldDocument::from_value(json!({
            "a": 3.0, "b": 55.5, "c": -0.5, "d": "7", "e": 18446744073709551615u64
        }))
        .unwrap();
        assert_eq!(doc.get_i64("a"), Some(3));
        assert_eq!(doc.get_i64("b"), Some(55));
        assert_eq!(doc.get_i64("c"), Some(-1));
        assert_eq!(doc.get_i64("d"), None);
        assert_eq!(doc.get_i64("e"), Some(i64::MAX));
    }

    #[test]
    fn from_value_requires_object() {
        assert!(WorldDocument::from_value(json!([1, 2])).is_none());
        assert!(WorldDocument::from_value(json!({})).is_some());
    }

    #[test]
    fn serializes_with_sorted_keys() {
        let mut doc = WorldDocument::new();
        doc.set("b", json!(1)).unwrap();
        doc.set("a", json!(2)).unwrap();
        let text = serde_json::to_string(&doc).unwrap();
        assert_eq!(text, r#"{"a":2,"b":1}"#);
    }

    fn segment() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9_-]{0,7}"
    }

    proptest! {
        #[test]
        fn set_then_get_roundtrips(
            segs in prop::collection::vec(segment(), 1..6),
            n in any::<i64>(),
        ) {
            let path = segs.join(".");
            let mut doc = sample();
            doc.set(&path, json!(n)).unwrap();
            prop_assert_eq!(doc.get(&path), Some(&json!(n)));
        }
    }
}
