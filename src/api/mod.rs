pub mod analysis;
pub mod bars;
pub mod forecast;
pub mod health;

use axum::Router;

use crate::AppState;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(bars::router())
        .merge(forecast::router())
        .nest("/api/technical", analysis::router())
}
