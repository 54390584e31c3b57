//! Control-line middleware for tsmw.
//!
//! Sits between chat text and the world bible: finds a bracketed control
//! line in a message (`[CHECK ...]`, `[REQUEST_NPC ...]`, `[TICK_CLOCK ...]`,
//! ...), answers it from the hidden world document, and hands back a concise
//! response line so the GM data itself never enters the conversation.

pub mod config;
pub mod error;
pub mod lookup;
pub mod protocol;
pub mod session;

pub use config::MiddlewareConfig;
pub use error::{MiddlewareError, MiddlewareResult};
pub use protocol::{Request, Response, SceneKind};
pub use session::Middleware;
