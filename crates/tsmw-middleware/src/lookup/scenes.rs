//! Scene picks.

use tsmw_core::WorldDocument;
use tsmw_core::model::{flat_text, scene_path};
use tsmw_mechanics::Roller;

use crate::protocol::{Response, SceneKind};

/// Answer a `REQUEST_SCENE` with a random entry from the city's list.
///
/// List-valued entries are joined with `"; "`.
pub fn pick_scene<R: Roller + ?Sized>(
    document: &WorldDocument,
    city: &str,
    kind: SceneKind,
    roller: &mut R,
) -> Response {
    let entries = document
        .get(&scene_path(city, kind.as_str()))
        .and_then(|v| v.as_array())
        .map(Vec::as_slice)
        .unwrap_or_default();
    if entries.is_empty() {
        return Response::SceneNone {
            city: city.to_string(),
            kind,
        };
    }
    let pick = &entries[roller.pick(entries.len())];
    Response::SceneRef {
        city: city.to_string(),
        kind,
        text: flat_text(pick, "; "),
    }
}
