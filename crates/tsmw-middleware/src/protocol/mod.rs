//! The bracketed control-line protocol.
//!
//! Requests look like `[CHECK who=kit skill=Stealth reason="..."]` and may
//! appear anywhere in a chat message. Responses are single lines of the same
//! shape. Quoted response fields never contain `"`: embedded double quotes
//! are rewritten to `'` so a line always re-tokenizes cleanly.

mod request;
mod response;
mod value;

pub use request::{Request, SceneKind};
pub use response::Response;
pub use value::coerce_value;

/// Rewrite embedded double quotes so a value can sit inside `"..."`.
pub fn sanitize(text: &str) -> String {
    text.replace('"', "'")
}
