//! Forecast endpoints backed by the external model scripts.

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::info;

use crate::error::{AppError, Result};
use crate::types::{LstmForecast, PriceForecast};
use crate::AppState;

/// Query parameters for the LSTM endpoint.
#[derive(Debug, Deserialize)]
pub struct LstmQuery {
    pub lookback: Option<u32>,
    pub days: Option<u32>,
}

/// Create the forecast router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/predictions/:symbol", get(predict_close))
        .route("/api/lstm/:symbol", get(predict_sequence))
}

/// Next-day close forecast from the regression model.
async fn predict_close(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Json<PriceForecast>> {
    if symbol.trim().is_empty() {
        return Err(AppError::BadRequest("Symbol is required".to_string()));
    }

    info!("GET /api/predictions/{}", symbol);
    let forecast = state.forecaster.predict_close(&symbol).await?;
    info!(
        "GET /api/predictions/{} - predicted close: {}",
        symbol, forecast.predicted_close
    );

    Ok(Json(forecast))
}

/// Multi-day LSTM forecast.
async fn predict_sequence(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
    Query(query): Query<LstmQuery>,
) -> Result<Json<LstmForecast>> {
    let lookback = query.lookback.unwrap_or(30);
    let days = query.days.unwrap_or(7);

    if !(10..=100).contains(&lookback) {
        return Err(AppError::BadRequest(format!(
            "lookback must be between 10 and 100, got {lookback}"
        )));
    }
    if !(1..=30).contains(&days) {
        return Err(AppError::BadRequest(format!(
            "days must be between 1 and 30, got {days}"
        )));
    }

    info!(
        "GET /api/lstm/{} - lookback: {}, days: {}",
        symbol, lookback, days
    );
    let forecast = state
        .forecaster
        .predict_sequence(&symbol, lookback, days)
        .await?;

    Ok(Json(forecast))
}
