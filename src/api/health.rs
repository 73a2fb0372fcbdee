use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    database: &'static str,
    #[serde(rename = "recordsAvailable")]
    records_available: bool,
    version: &'static str,
}

/// Report server and database status.
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let count = state.bar_store.bar_count();
    Json(HealthResponse {
        status: "UP",
        database: "connected",
        records_available: count > 0,
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/health", get(health))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_response_serialization() {
        let response = HealthResponse {
            status: "UP",
            database: "connected",
            records_available: true,
            version: "1.0.0",
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"status\":\"UP\""));
        assert!(json.contains("\"recordsAvailable\":true"));
    }
}
