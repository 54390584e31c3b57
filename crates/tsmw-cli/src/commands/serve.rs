use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tsmw_mechanics::{DiceRoller, PercentileRoll, Roller, quick_check};
use tsmw_middleware::{Middleware, MiddlewareConfig, Response};

/// Shared server state. The middleware does blocking file I/O, so it is only
/// locked from `spawn_blocking` threads.
struct AppState {
    middleware: Mutex<Middleware>,
    dice: Mutex<DiceRoller>,
}

type Shared = Arc<AppState>;

pub fn run(config: MiddlewareConfig, addr: &str) -> Result<(), String> {
    let addr: SocketAddr = addr
        .parse()
        .map_err(|e| format!("invalid address '{addr}': {e}"))?;
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("cannot start runtime: {e}"))?;
    runtime.block_on(serve(config, addr))
}

async fn serve(config: MiddlewareConfig, addr: SocketAddr) -> Result<(), String> {
    let app = router(state(config));
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| format!("cannot bind {addr}: {e}"))?;
    tracing::info!(%addr, "serving");
    println!("  Listening on http://{addr}");
    axum::serve(listener, app)
        .await
        .map_err(|e| e.to_string())
}

fn state(config: MiddlewareConfig) -> Shared {
    let dice = DiceRoller::new(config.seed);
    Arc::new(AppState {
        middleware: Mutex::new(Middleware::from_config(config)),
        dice: Mutex::new(dice),
    })
}

fn router(state: Shared) -> Router {
    Router::new()
        .route("/check", post(check))
        .route("/control", post(control))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn unknown() -> String {
    "Unknown".to_string()
}

#[derive(Debug, Deserialize)]
struct CheckBody {
    #[serde(default = "unknown")]
    character: String,
    #[serde(default = "unknown")]
    skill: String,
    #[serde(default)]
    threshold: i32,
    /// Rolled server-side when absent.
    roll: Option<i64>,
}

#[derive(Debug, Serialize)]
struct CheckReply {
    #[serde(rename = "type")]
    kind: &'static str,
    ok: bool,
    success: bool,
    margin: u32,
    quality: String,
    degree: String,
    details: String,
    stamp: String,
}

async fn check(
    State(state): State<Shared>,
    Json(body): Json<CheckBody>,
) -> Result<Json<CheckReply>, (StatusCode, Json<Value>)> {
    let roll = match body.roll {
        Some(value) => PercentileRoll::new(value).map_err(|e| {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "ok": false, "error": e.to_string() })),
            )
        })?,
        None => state.dice.lock().await.roll_d100(),
    };
    let verdict = quick_check(body.threshold, roll);

    Ok(Json(CheckReply {
        kind: "check_result",
        ok: true,
        success: verdict.resolution.success,
        margin: verdict.resolution.margin,
        quality: verdict.quality.to_string(),
        degree: verdict.resolution.degree.to_string(),
        details: format!(
            "{} attempted {} with a roll of {} vs {}.",
            body.character, body.skill, roll, body.threshold
        ),
        stamp: Utc::now().to_rfc3339(),
    }))
}

#[derive(Debug, Deserialize)]
struct ControlBody {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
struct ControlReply {
    text: String,
    handled: bool,
}

async fn control(
    State(state): State<Shared>,
    Json(body): Json<ControlBody>,
) -> Json<ControlReply> {
    let task = tokio::task::spawn_blocking(move || {
        let mut middleware = state.middleware.blocking_lock();
        process_control(&mut middleware, body.text)
    });
    match task.await {
        Ok(reply) => Json(reply),
        Err(e) => {
            tracing::error!(error = %e, "control task failed");
            Json(ControlReply {
                text: Response::error("internal error").to_string(),
                handled: true,
            })
        }
    }
}

fn process_control(middleware: &mut Middleware, text: String) -> ControlReply {
    let (text, handled) = match middleware.process(&text) {
        Ok(Some(response)) => (response.to_string(), true),
        Ok(None) => (text, false),
        Err(e) => {
            tracing::error!(error = %e, "request failed");
            (Response::error(e.to_string()).to_string(), true)
        }
    };
    ControlReply { text, handled }
}
