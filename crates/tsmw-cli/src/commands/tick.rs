use tsmw_middleware::{MiddlewareConfig, Request};

pub fn run(
    config: MiddlewareConfig,
    city: String,
    key: String,
    delta: i64,
    reason: String,
) -> Result<(), String> {
    let request = Request::TickClock {
        city,
        key,
        delta,
        reason,
    };
    super::emit(super::handle(config, None, request)?)
}
