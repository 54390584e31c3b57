//! Coercion of raw `SET` values.

use std::sync::LazyLock;

use regex_lite::Regex;
use serde_json::{Number, Value};

static INTEGER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+$").expect("valid regex"));
static DECIMAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\d+$").expect("valid regex"));

/// Turn the raw text of a `value=` field into a document value.
///
/// Digits become an integer, `digits.digits` a float, `true`/`false` a
/// boolean. Anything else is a string with one surrounding pair of double
/// quotes removed. Integers too large for `u64` fall back to a float.
pub fn coerce_value(raw: &str) -> Value {
    if INTEGER_RE.is_match(raw) {
        if let Ok(n) = raw.parse::<u64>() {
            return Value::Number(n.into());
        }
        return float(raw).unwrap_or_else(|| Value::String(raw.to_string()));
    }
    if DECIMAL_RE.is_match(raw) {
        return float(raw).unwrap_or_else(|| Value::String(raw.to_string()));
    }
    match raw {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => Value::String(strip_quotes(raw).to_string()),
    }
}

fn float(raw: &str) -> Option<Value> {
    raw.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
}

fn strip_quotes(raw: &str) -> &str {
    raw.strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(raw)
}
