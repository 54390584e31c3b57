//! World document store for tsmw.
//!
//! The world bible is a single JSON document addressed by dotted paths such
//! as `cities.rio.gm.clocks.alert`. This crate owns that document: reading
//! and writing through paths, the gated namespace that untrusted callers may
//! write into, and wholesale load/save against a file on disk. Typed views
//! over the reserved sub-paths (characters, cities, NPCs, threads) live in
//! [`model`].

/// The in-memory document and its dotted-path operations.
pub mod document;
/// Error types used throughout the crate.
pub mod error;
/// Typed views over reserved sub-paths of the document.
pub mod model;
/// Dotted-path parsing and validation.
pub mod path;
/// File-backed persistence and scoped transactions.
pub mod store;

/// Re-export the document type and its default gated prefix.
pub use document::{DEFAULT_GATED_PREFIX, WorldDocument};
/// Re-export error types.
pub use error::{StoreError, StoreResult};
/// Re-export the dotted path type.
pub use path::DocPath;
/// Re-export store types.
pub use store::{WorldStore, WorldTransaction};

/// Re-export of the JSON value type the document is built from.
pub use serde_json::Value;
