use super::AppState;
use axum::extract::State;
use axum::Json;
use chrono::SecondsFormat;
use serde_json::{json, Value};

pub const GROUP: &str = "de.muellerlund";

pub async fn links() -> Json<Value> {
    Json(json!({
        "_links": {
            "self": { "href": "/actuator" },
            "health": { "href": "/actuator/health" },
            "info": { "href": "/actuator/info" },
        }
    }))
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "UP" }))
}

pub async fn info(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "group": GROUP,
        "started_at": state.started_at.to_rfc3339_opts(SecondsFormat::Secs, true),
    }))
}
