//! Arc beats.

use tsmw_core::WorldDocument;

use crate::protocol::Response;

/// Answer a `REQUEST_ARC_BEAT`: the first beat of thread `id` that mentions
/// `city`. Selection is deterministic.
pub fn arc_beat(document: &WorldDocument, id: &str, city: &str) -> Response {
    let Some(thread) = document.thread(id) else {
        return Response::ArcNone { id: id.to_string() };
    };
    match thread.beat_for(city) {
        Some(beat) => Response::ArcBeat {
            id: id.to_string(),
            city: city.to_string(),
            text: beat.to_string(),
        },
        None => Response::ArcHold {
            id: id.to_string(),
            city: city.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn world() -> WorldDocument {
        WorldDocument::from_value(json!({
            "meta": { "threads": [
                { "id": 1, "beats": [
                    "Lagos burns",
                    "Back in RIO, the \"Saint\" returns",
                    "rio again"
                ] },
                { "id": "ledger", "beats": [] }
            ] }
        }))
        .unwrap()
    }

    #[test]
    fn first_matching_beat() {
        assert_eq!(
            arc_beat(&world(), "1", "rio").to_string(),
            r#"[ARC_BEAT id=1 city=rio text="Back in RIO, the 'Saint' returns"]"#
        );
    }

    #[test]
    fn hold_and_none() {
        let w = world();
        assert_eq!(arc_beat(&w, "ledger", "rio").to_string(), "[ARC_HOLD id=ledger city=rio]");
        assert_eq!(arc_beat(&w, "1", "tokyo").to_string(), "[ARC_HOLD id=1 city=tokyo]");
        assert_eq!(arc_beat(&w, "9", "rio").to_string(), "[ARC_NONE id=9]");
    }
}
