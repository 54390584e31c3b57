use tsmw_middleware::{MiddlewareConfig, Request};

pub fn run(
    config: MiddlewareConfig,
    who: String,
    skill: String,
    context: String,
    reason: String,
    roll: Option<i64>,
) -> Result<(), String> {
    let request = Request::Check {
        who,
        skill,
        reason,
        context: (!context.is_empty()).then_some(context),
    };
    super::emit(super::handle(config, roll, request)?)
}
