use tsmw_middleware::protocol::coerce_value;
use tsmw_middleware::{MiddlewareConfig, Request, Response};

pub fn run(
    config: MiddlewareConfig,
    path: String,
    value: String,
    reason: String,
    unrestricted: bool,
) -> Result<(), String> {
    if !unrestricted {
        let request = Request::Set {
            path,
            value,
            reason,
        };
        return super::emit(super::handle(config, None, request)?);
    }

    let mut store = super::open_store(&config)?;
    let value = coerce_value(&value);
    let mut tx = store.transaction().map_err(|e| e.to_string())?;
    tx.set(&path, value.clone()).map_err(|e| e.to_string())?;
    tx.commit().map_err(|e| e.to_string())?;
    tracing::warn!(path = %path, "unrestricted write");

    super::emit(Response::Ok {
        path,
        value,
        reason,
    })
}
