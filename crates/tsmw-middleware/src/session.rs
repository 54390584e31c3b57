//! The middleware session.
//!
//! `Middleware` owns the world store, the configuration and a roller. Each
//! request reloads the document from disk, so edits made by hand between
//! turns are picked up; durable changes are made inside a store transaction
//! and flushed before the response is returned.

use tsmw_core::{StoreError, WorldDocument, WorldStore};
use tsmw_mechanics::{CheckRequest, CheckResult, Context, DiceRoller, Roller, perform_check};

use crate::config::MiddlewareConfig;
use crate::error::{MiddlewareError, MiddlewareResult};
use crate::lookup;
use crate::protocol::{Request, Response, coerce_value};

/// A control-line processor bound to one world file.
#[derive(Debug)]
pub struct Middleware<R: Roller = DiceRoller> {
    store: WorldStore,
    config: MiddlewareConfig,
    roller: R,
}

impl Middleware<DiceRoller> {
    /// Create a session with an RNG roller seeded from the configuration.
    ///
    /// Nothing is read from disk until the first request or [`reload`](Self::reload).
    pub fn from_config(config: MiddlewareConfig) -> Self {
        let roller = DiceRoller::new(config.seed);
        Self::with_roller(config, roller)
    }
}

impl<R: Roller> Middleware<R> {
    /// Create a session with a caller-supplied roller.
    pub fn with_roller(config: MiddlewareConfig, roller: R) -> Self {
        Self {
            store: WorldStore::new(config.world_path()),
            config,
            roller,
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &MiddlewareConfig {
        &self.config
    }

    /// The underlying store.
    pub fn store(&self) -> &WorldStore {
        &self.store
    }

    /// Re-read the world file.
    pub fn reload(&mut self) -> MiddlewareResult<&WorldDocument> {
        Ok(self.store.load()?)
    }

    /// Handle the first control line in `text`, if any.
    ///
    /// `Ok(None)` means the text held no recognizable control line and should
    /// pass through unchanged.
    pub fn process(&mut self, text: &str) -> MiddlewareResult<Option<Response>> {
        let Some(request) = Request::parse(text) else {
            return Ok(None);
        };
        tracing::debug!(tag = request.tag(), "control line matched");
        self.handle(request).map(Some)
    }

    /// Line-in, line-out: the response line, or `text` unchanged.
    ///
    /// Store failures are logged and rendered as an `[ERROR ...]` line.
    pub fn process_line(&mut self, text: &str) -> String {
        match self.process(text) {
            Ok(Some(response)) => response.to_string(),
            Ok(None) => text.to_string(),
            Err(e) => {
                tracing::error!(error = %e, "request failed");
                Response::error(e.to_string()).to_string()
            }
        }
    }

    /// Handle one parsed request.
    pub fn handle(&mut self, request: Request) -> MiddlewareResult<Response> {
        match request {
            Request::Check {
                who,
                skill,
                context,
                ..
            } => {
                let check = CheckRequest::new(who, skill).with_context(context.unwrap_or_default());
                self.store.load()?;
                let result = match perform_check(
                    self.store.document()?,
                    &check,
                    &mut self.roller,
                    self.config.target_clamp,
                ) {
                    Ok(result) => result,
                    Err(e) => return Ok(Response::error(e.to_string())),
                };
                self.raise_alert(&result)?;
                Ok(Response::Result(result))
            }
            Request::Npc { city, role, tone } => {
                let document = self.store.load()?;
                Ok(lookup::npc_reference(document, &city, &role, tone.as_deref()))
            }
            Request::NpcSecret { id, key } => {
                let document = self.store.load()?;
                Ok(lookup::npc_secret(document, &id, &key))
            }
            Request::Scene { city, kind } => {
                self.store.load()?;
                Ok(lookup::pick_scene(
                    self.store.document()?,
                    &city,
                    kind,
                    &mut self.roller,
                ))
            }
            Request::ArcBeat { id, city } => {
                let document = self.store.load()?;
                Ok(lookup::arc_beat(document, &id, &city))
            }
            Request::TickClock {
                city,
                key,
                delta,
                reason,
            } => {
                self.store.load()?;
                let mut tx = self.store.transaction()?;
                let value = match lookup::tick_clock(&mut tx, &city, &key, delta) {
                    Ok(value) => value,
                    Err(e) => return rejected(e),
                };
                tx.commit()?;
                Ok(Response::OkClock {
                    city,
                    key,
                    value,
                    reason,
                })
            }
            Request::Set {
                path,
                value,
                reason,
            } => self.gated_set(path, &value, reason),
        }
    }

    /// Write into the gated namespace. The prefix is checked before the
    /// world file is touched.
    fn gated_set(&mut self, path: String, raw: &str, reason: String) -> MiddlewareResult<Response> {
        let prefix = self.config.gated_prefix.clone();
        if !path.starts_with(&prefix) {
            tracing::warn!(path = %path, prefix = %prefix, "gated write denied");
            return Ok(Response::error(format!("write denied: {path}")));
        }
        let value = coerce_value(raw);
        self.store.load()?;
        let mut tx = self.store.transaction()?;
        if let Err(e) = tx.write_gated_in(&prefix, &path, value.clone()) {
            return rejected(e);
        }
        tx.commit()?;
        tracing::info!(path = %path, value = %value, "gated write");
        Ok(Response::Ok {
            path,
            value,
            reason,
        })
    }

    /// Bump the alert clock of the city named in the context after a loud
    /// failure.
    fn raise_alert(&mut self, result: &CheckResult) -> MiddlewareResult<()> {
        if !result.is_loud_failure() {
            return Ok(());
        }
        let context = Context::parse(&result.context);
        let Some(city) = context.text("city") else {
            return Ok(());
        };
        let mut tx = self.store.transaction()?;
        match lookup::bump_alert(&mut tx, city) {
            Ok(_) => tx.commit()?,
            Err(e) => {
                tracing::warn!(city, error = %e, "alert not raised");
                tx.discard();
            }
        }
        Ok(())
    }
}

/// Turn a rejected mutation into an `[ERROR ...]` line. Medium failures
/// still propagate.
fn rejected(error: StoreError) -> MiddlewareResult<Response> {
    match error {
        StoreError::PermissionDenied(_)
        | StoreError::InvalidPath(_)
        | StoreError::PathConflict(_) => Ok(Response::error(error.to_string())),
        other => Err(MiddlewareError::Store(other)),
    }
}
