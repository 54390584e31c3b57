//! Answers to lookup requests, read from the world document.
//!
//! Each function takes the already-loaded document and returns the response
//! line for one request. Only [`clocks`] mutates; persisting the change is
//! the caller's job.

pub mod arcs;
pub mod clocks;
pub mod npcs;
pub mod scenes;

pub use arcs::arc_beat;
pub use clocks::{ALERT_CLOCK, bump_alert, tick_clock};
pub use npcs::{find_by_role, npc_reference, npc_secret};
pub use scenes::pick_scene;
