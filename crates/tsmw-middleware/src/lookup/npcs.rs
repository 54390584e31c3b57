//! NPC lookups.

use tsmw_core::WorldDocument;
use tsmw_core::model::Npc;

use crate::protocol::Response;

/// Find an NPC in `city` by role.
///
/// An exact (case-insensitive) role match wins. Failing that, the first NPC
/// whose `"<role> <surface>"` contains `role` is returned. NPCs are visited in
/// key order.
pub fn find_by_role<'a>(document: &'a WorldDocument, city: &str, role: &str) -> Option<Npc<'a>> {
    let npcs = document.city(city)?.npcs();
    let wanted = role.to_lowercase();
    npcs.iter()
        .find(|n| n.role().to_lowercase() == wanted)
        .or_else(|| {
            npcs.iter().find(|n| {
                format!("{} {}", n.role(), n.surface())
                    .to_lowercase()
                    .contains(&wanted)
            })
        })
        .copied()
}

/// Answer a `REQUEST_NPC`. Secret fields are never included.
pub fn npc_reference(
    document: &WorldDocument,
    city: &str,
    role: &str,
    tone: Option<&str>,
) -> Response {
    match find_by_role(document, city, role) {
        Some(npc) => Response::NpcRef {
            id: npc.id.to_string(),
            name: npc.name(),
            surface: npc.surface(),
            leverage: npc.leverage(),
            tags: npc.tags(),
            tone: tone.unwrap_or_default().to_string(),
        },
        None => Response::NpcNone {
            city: city.to_string(),
            role: role.to_string(),
        },
    }
}

/// Answer a `REQUEST_NPC_SECRET`.
pub fn npc_secret(document: &WorldDocument, id: &str, key: &str) -> Response {
    let Some(npc) = document.find_npc(id) else {
        return Response::error(format!("npc not found: {id}"));
    };
    match npc.secret(key) {
        Some(value) => Response::NpcSecret {
            id: id.to_string(),
            key: key.to_string(),
            value,
        },
        None => Response::NpcSecretNone {
            id: id.to_string(),
            key: key.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn world() -> WorldDocument {
        WorldDocument::from_value(json!({
            "cities": {
                "rio": { "npcs": {
                    "rio.cop_duarte": {
                        "name": "Duarte", "role": "cop",
                        "surface": "tired beat cop who knows every fixer",
                        "tags": ["law", "bribable"]
                    },
                    "rio.fix_viviane": {
                        "name": "Viviane", "role": "Fixer",
                        "surface": "runs the bar on Rua Augusta",
                        "leverage": "owes the cartel",
                        "debts": ["cartel", "church"],
                        "lover": "",
                        "informant": false
                    }
                } },
                "lagos": { "npcs": {
                    "rio.exile_mara": { "name": "Mara", "role": "smuggler", "past": "fled rio" }
                } }
            }
        }))
        .unwrap()
    }

    #[test]
    fn exact_role_beats_earlier_substring() {
        let w = world();
        // "cop_duarte" comes first and mentions "fixer" in its surface.
        let npc = find_by_role(&w, "rio", "fixer").unwrap();
        assert_eq!(npc.id, "rio.fix_viviane");
    }

    #[test]
    fn substring_fallback() {
        let w = world();
        assert_eq!(find_by_role(&w, "rio", "augusta").unwrap().id, "rio.fix_viviane");
        assert!(find_by_role(&w, "rio", "priest").is_none());
        assert!(find_by_role(&w, "nowhere", "cop").is_none());
    }

    #[test]
    fn reference_omits_secrets() {
        let w = world();
        let line = npc_reference(&w, "rio", "fixer", Some("wry")).to_string();
        assert_eq!(
            line,
            r#"[NPC_REF id=rio.fix_viviane name="Viviane" surface="runs the bar on Rua Augusta" leverage="owes the cartel" tags="" tone="wry"]"#
        );
        assert!(!line.contains("church"));

        let cop = npc_reference(&w, "rio", "cop", None);
        assert!(matches!(
            cop,
            Response::NpcRef { ref tags, ref tone, .. } if tags == "law,bribable" && tone.is_empty()
        ));
    }

    #[test]
    fn reference_none() {
        let w = world();
        assert_eq!(
            npc_reference(&w, "rio", "priest", None).to_string(),
            r#"[NPC_NONE city=rio role="priest"]"#
        );
    }

    #[test]
    fn secrets() {
        let w = world();
        assert_eq!(
            npc_secret(&w, "rio.fix_viviane", "debts").to_string(),
            r#"[NPC_SECRET id=rio.fix_viviane key="debts" value="cartel; church"]"#
        );
        for blank in ["lover", "informant", "missing"] {
            assert!(matches!(
                npc_secret(&w, "rio.fix_viviane", blank),
                Response::NpcSecretNone { .. }
            ));
        }
    }

    #[test]
    fn secret_searches_every_city() {
        let w = world();
        assert_eq!(
            npc_secret(&w, "rio.exile_mara", "past").to_string(),
            r#"[NPC_SECRET id=rio.exile_mara key="past" value="fled rio"]"#
        );
        assert_eq!(
            npc_secret(&w, "rio.ghost", "past").to_string(),
            r#"[ERROR msg="npc not found: rio.ghost"]"#
        );
    }
}
