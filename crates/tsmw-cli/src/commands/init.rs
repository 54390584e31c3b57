use std::path::Path;

use serde_json::json;
use tsmw_core::{WorldDocument, WorldStore};

pub fn run(file: &Path) -> Result<(), String> {
    if file.exists() {
        return Err(format!("'{}' already exists", file.display()));
    }

    let document = WorldDocument::from_value(starter_world())
        .ok_or_else(|| "starter world is not an object".to_string())?;
    let mut store = WorldStore::new(file);
    store.replace(document);
    store.save().map_err(|e| e.to_string())?;

    println!("Created world file {}", file.display());
    println!();
    println!("Try:");
    println!("  tsmw -w {} sheet kit", file.display());
    println!(
        "  tsmw -w {} check kit Stealth --context \"light:dim;city:rio\"",
        file.display()
    );
    println!(
        "  tsmw -w {} process '[REQUEST_NPC city=rio role=\"fixer\"]'",
        file.display()
    );

    Ok(())
}

fn starter_world() -> serde_json::Value {
    json!({
        "extensions": {
            "stats": {
                "kit": {
                    "skills": {
                        "Athletics": 45,
                        "Charm": 50,
                        "Hacking": 60,
                        "Perception": 50,
                        "Stealth": 55
                    }
                }
            }
        },
        "cities": {
            "rio": {
                "npcs": {
                    "rio.fix_viviane": {
                        "name": "Viviane Prado",
                        "role": "fixer",
                        "surface": "runs a quiet bar off Rua do Ouvidor",
                        "leverage": "owes a favor she cannot repay",
                        "tags": ["broker", "nightlife"],
                        "debts": ["the Sampaio family", "a priest in Lapa"]
                    },
                    "rio.cop_duarte": {
                        "name": "Sgt. Duarte",
                        "role": "cop",
                        "surface": "tired beat cop who knows every fixer by name",
                        "leverage": "his pension depends on a clean record",
                        "tags": ["law", "bribable"],
                        "informant": "feeds the Sampaios raid schedules"
                    }
                },
                "gm": {
                    "clocks": { "alert": 0, "heat": 0 },
                    "hooks": [
                        "a courier vanishes between two drops",
                        ["blackout in the harbor district", "sirens, then silence"]
                    ],
                    "setpieces": [
                        "rooftop chase over the favela at dusk"
                    ]
                }
            }
        },
        "meta": {
            "threads": [
                {
                    "id": "saint",
                    "beats": [
                        "The Saint's ledger surfaces in Rio",
                        "Someone in Lagos wants the ledger more"
                    ]
                }
            ]
        }
    })
}
