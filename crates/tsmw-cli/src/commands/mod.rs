pub mod check;
pub mod get;
pub mod init;
pub mod process;
pub mod roll;
pub mod serve;
pub mod set;
pub mod sheet;
pub mod tick;

use std::path::Path;

use tsmw_core::WorldStore;
use tsmw_mechanics::{FixedRoller, PercentileRoll};
use tsmw_middleware::{Middleware, MiddlewareConfig, Request, Response};

/// Build the effective configuration: the TOML file (if any), then
/// command-line overrides.
pub fn load_config(
    config: Option<&Path>,
    world: Option<&Path>,
    log_level: Option<&str>,
) -> Result<MiddlewareConfig, String> {
    let mut cfg = match config {
        Some(path) => MiddlewareConfig::from_file(path).map_err(|e| e.to_string())?,
        None => MiddlewareConfig::default(),
    };
    if let Some(world) = world {
        cfg = cfg.with_world_file(world);
    }
    if let Some(level) = log_level {
        cfg = cfg.with_log_level(level);
    }
    Ok(cfg)
}

/// Open and load the configured world file.
fn open_store(config: &MiddlewareConfig) -> Result<WorldStore, String> {
    WorldStore::open(config.world_path()).map_err(|e| e.to_string())
}

/// Parse a roll given on the command line.
fn manual_roll(value: i64) -> Result<PercentileRoll, String> {
    PercentileRoll::new(value).map_err(|e| e.to_string())
}

/// Run one request, with the given roll if the user supplied one.
fn handle(
    config: MiddlewareConfig,
    roll: Option<i64>,
    request: Request,
) -> Result<Response, String> {
    let response = match roll {
        Some(value) => {
            Middleware::with_roller(config, FixedRoller::new(manual_roll(value)?)).handle(request)
        }
        None => Middleware::from_config(config).handle(request),
    };
    response.map_err(|e| e.to_string())
}

/// Print a response line, or turn an `[ERROR ...]` into a command failure.
fn emit(response: Response) -> Result<(), String> {
    match response {
        Response::Error { msg } => Err(msg),
        other => {
            println!("{other}");
            Ok(())
        }
    }
}
