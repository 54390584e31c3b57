//! Read-only views over the reserved parts of the world bible.
//!
//! ```text
//! extensions.stats.<who>.skills.<skill>   character ratings
//! cities.<city>.npcs.<city>.<slug>        NPC records
//! cities.<city>.gm.clocks.<key>           clocks
//! cities.<city>.gm.hooks | setpieces      scene content
//! meta.threads                            arc threads
//! ```
//!
//! The views borrow from the document and are lenient about shape: a field
//! of the wrong type reads as absent rather than failing the whole record.

use serde_json::{Map, Value};

use crate::document::{WorldDocument, whole_number};

/// Where character stat blocks live.
pub const STATS_ROOT: &str = "extensions.stats";
/// Where city sub-documents live.
pub const CITIES_ROOT: &str = "cities";
/// Where arc threads live.
pub const THREADS_PATH: &str = "meta.threads";

/// Path of a city clock.
pub fn clock_path(city: &str, key: &str) -> String {
    format!("{CITIES_ROOT}.{city}.gm.clocks.{key}")
}

/// Path of a city's scene list (`hooks` or `setpieces`).
pub fn scene_path(city: &str, kind: &str) -> String {
    format!("{CITIES_ROOT}.{city}.gm.{kind}")
}

/// Render a JSON value as flat text.
///
/// Strings are taken verbatim, lists are joined with `sep`, null is empty.
pub fn flat_text(value: &Value, sep: &str) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|v| flat_text(v, sep))
            .collect::<Vec<_>>()
            .join(sep),
        other => other.to_string(),
    }
}

/// Whether a value counts as "nothing there" for disclosure purposes.
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
        _ => false,
    }
}

/// A character's stat block.
#[derive(Debug, Clone, Copy)]
pub struct Character<'a> {
    /// Character id.
    pub id: &'a str,
    skills: Option<&'a Map<String, Value>>,
}

impl<'a> Character<'a> {
    /// The raw value stored for a skill, if any. Names are case-sensitive.
    pub fn skill(&self, name: &str) -> Option<&'a Value> {
        self.skills?.get(name)
    }

    /// A skill's rating, if present and numeric.
    ///
    /// Fractional ratings are floored, so `55.5` rates as `55` and a roll
    /// of 55 still succeeds against it.
    pub fn rating(&self, name: &str) -> Option<i64> {
        self.skill(name).and_then(whole_number)
    }

    /// All skills that carry a usable rating, in key order.
    pub fn ratings(&self) -> Vec<(&'a str, i64)> {
        self.skills
            .into_iter()
            .flatten()
            .filter_map(|(name, v)| whole_number(v).map(|r| (name.as_str(), r)))
            .collect()
    }
}

/// An NPC record.
#[derive(Debug, Clone, Copy)]
pub struct Npc<'a> {
    /// Composite id, `<city>.<slug>`.
    pub id: &'a str,
    fields: &'a Map<String, Value>,
}

impl<'a> Npc<'a> {
    fn text(&self, key: &str) -> String {
        self.fields
            .get(key)
            .map(|v| flat_text(v, ","))
            .unwrap_or_default()
    }

    /// Display name.
    pub fn name(&self) -> String {
        self.text("name")
    }

    /// Role used for lookups (e.g. "fixer").
    pub fn role(&self) -> String {
        self.text("role")
    }

    /// What anyone can see.
    pub fn surface(&self) -> String {
        self.text("surface")
    }

    /// What the NPC wants or fears.
    pub fn leverage(&self) -> String {
        self.text("leverage")
    }

    /// Tags, comma-joined when stored as a list.
    pub fn tags(&self) -> String {
        self.text("tags")
    }

    /// A gated field, rendered as text. Lists are joined with `"; "`.
    ///
    /// Missing, null, `false`, zero, and empty values read as `None`.
    pub fn secret(&self, key: &str) -> Option<String> {
        let value = self.fields.get(key)?;
        if is_blank(value) {
            return None;
        }
        Some(flat_text(value, "; "))
    }
}

/// A city sub-document.
#[derive(Debug, Clone, Copy)]
pub struct City<'a> {
    /// City id.
    pub id: &'a str,
    fields: &'a Map<String, Value>,
}

impl<'a> City<'a> {
    /// NPCs in this city, in key order.
    pub fn npcs(&self) -> Vec<Npc<'a>> {
        self.fields
            .get("npcs")
            .and_then(Value::as_object)
            .into_iter()
            .flatten()
            .filter_map(|(id, v)| {
                v.as_object().map(|fields| Npc {
                    id: id.as_str(),
                    fields,
                })
            })
            .collect()
    }

    /// Look up an NPC by its full composite id.
    pub fn npc(&self, id: &str) -> Option<Npc<'a>> {
        self.npcs().into_iter().find(|n| n.id == id)
    }

    fn gm(&self) -> Option<&'a Map<String, Value>> {
        self.fields.get("gm").and_then(Value::as_object)
    }

    /// Current value of a clock, floored; missing or non-numeric reads as 0.
    pub fn clock(&self, key: &str) -> i64 {
        self.gm()
            .and_then(|gm| gm.get("clocks"))
            .and_then(|c| c.get(key))
            .and_then(whole_number)
            .unwrap_or(0)
    }

    /// A scene content list (`hooks` or `setpieces`); empty when absent.
    pub fn scenes(&self, kind: &str) -> &'a [Value] {
        self.gm()
            .and_then(|gm| gm.get(kind))
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// An arc thread with ordered beats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thread {
    /// Thread id, string form (numeric ids are stringified).
    pub id: String,
    /// Narrative beats in order.
    pub beats: Vec<String>,
}

impl Thread {
    fn from_value(value: &Value) -> Option<Self> {
        let id = match value.get("id")? {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            _ => return None,
        };
        let beats = value
            .get("beats")
            .and_then(Value::as_array)
            .map(|b| b.iter().filter_map(Value::as_str).map(str::to_string).collect())
            .unwrap_or_default();
        Some(Self { id, beats })
    }

    /// The first beat mentioning `city`, case-insensitively.
    pub fn beat_for(&self, city: &str) -> Option<&str> {
        let needle = city.to_lowercase();
        self.beats
            .iter()
            .find(|b| b.to_lowercase().contains(&needle))
            .map(String::as_str)
    }
}

impl WorldDocument {
    /// The stat block for a character, if one exists.
    pub fn character<'a>(&'a self, who: &'a str) -> Option<Character<'a>> {
        let block = self.get(&format!("{STATS_ROOT}.{who}"))?;
        if block.is_null() {
            return None;
        }
        Some(Character {
            id: who,
            skills: block.get("skills").and_then(Value::as_object),
        })
    }

    /// A city by id.
    pub fn city(&self, id: &str) -> Option<City<'_>> {
        self.cities().into_iter().find(|c| c.id == id)
    }

    /// All cities, in key order.
    pub fn cities(&self) -> Vec<City<'_>> {
        self.root()
            .get(CITIES_ROOT)
            .and_then(Value::as_object)
            .into_iter()
            .flatten()
            .filter_map(|(id, v)| {
                v.as_object().map(|fields| City {
                    id: id.as_str(),
                    fields,
                })
            })
            .collect()
    }

    /// Find an NPC by composite id.
    ///
    /// The city named by the id prefix is searched first, then every city.
    pub fn find_npc(&self, id: &str) -> Option<Npc<'_>> {
        let home = id.split('.').next().unwrap_or(id);
        self.city(home)
            .and_then(|c| c.npc(id))
            .or_else(|| self.cities().into_iter().find_map(|c| c.npc(id)))
    }

    /// All arc threads that have a usable id.
    pub fn threads(&self) -> Vec<Thread> {
        self.get(THREADS_PATH)
            .and_then(Value::as_array)
            .map(|ts| ts.iter().filter_map(Thread::from_value).collect())
            .unwrap_or_default()
    }

    /// A thread by id (compared in string form).
    pub fn thread(&self, id: &str) -> Option<Thread> {
        self.threads().into_iter().find(|t| t.id == id)
    }
}
