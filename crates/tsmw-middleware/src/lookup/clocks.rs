//! City clocks.

use serde_json::Value;
use tsmw_core::model::clock_path;
use tsmw_core::{StoreResult, WorldDocument};

/// The clock bumped by loud failures.
pub const ALERT_CLOCK: &str = "alert";

/// Move a clock by `delta` and return its new value.
///
/// A fractional clock is floored first. A missing or non-numeric clock
/// counts as 0, and the result never drops below 0. Only the in-memory
/// document changes.
pub fn tick_clock(
    document: &mut WorldDocument,
    city: &str,
    key: &str,
    delta: i64,
) -> StoreResult<i64> {
    let path = clock_path(city, key);
    let current = document.get_i64(&path).unwrap_or(0);
    let next = current.saturating_add(delta).max(0);
    document.set(&path, Value::from(next))?;
    tracing::info!(city, key, delta, value = next, "clock moved");
    Ok(next)
}

/// Raise a city's alert clock by one.
pub fn bump_alert(document: &mut WorldDocument, city: &str) -> StoreResult<i64> {
    tick_clock(document, city, ALERT_CLOCK, 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn floor_at_zero() {
        let mut w = WorldDocument::new();
        assert_eq!(tick_clock(&mut w, "rio", "heat", -5).unwrap(), 0);
        assert_eq!(w.get("cities.rio.gm.clocks.heat"), Some(&json!(0)));
    }

    #[test]
    fn accumulates() {
        let mut w = WorldDocument::from_value(json!({
            "cities": { "rio": { "gm": { "clocks": { "heat": 2, "odd": "three" } } } }
        }))
        .unwrap();
        assert_eq!(tick_clock(&mut w, "rio", "heat", 3).unwrap(), 5);
        assert_eq!(tick_clock(&mut w, "rio", "heat", -2).unwrap(), 3);
        assert_eq!(tick_clock(&mut w, "rio", "odd", 1).unwrap(), 1);
        assert_eq!(bump_alert(&mut w, "rio").unwrap(), 1);
        assert_eq!(bump_alert(&mut w, "rio").unwrap(), 2);
    }

    #[test]
    fn float_clock_keeps_its_count() {
        let mut w = WorldDocument::from_value(json!({
            "cities": { "rio": { "gm": { "clocks": { "alert": 3.0, "heat": 2.7 } } } }
        }))
        .unwrap();
        assert_eq!(bump_alert(&mut w, "rio").unwrap(), 4);
        assert_eq!(w.get("cities.rio.gm.clocks.alert"), Some(&json!(4)));
        assert_eq!(tick_clock(&mut w, "rio", "heat", -1).unwrap(), 1);
    }

    #[test]
    fn huge_steps_saturate() {
        let mut w = WorldDocument::new();
        assert_eq!(tick_clock(&mut w, "rio", "heat", i64::MAX).unwrap(), i64::MAX);
        assert_eq!(tick_clock(&mut w, "rio", "heat", 1).unwrap(), i64::MAX);
        assert_eq!(tick_clock(&mut w, "rio", "heat", i64::MIN).unwrap(), 0);
    }

    #[test]
    fn malformed_city_is_rejected() {
        let mut w = WorldDocument::new();
        assert!(tick_clock(&mut w, "a..b", "heat", 1).is_err());
    }
}
