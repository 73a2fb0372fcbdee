//! Technical analysis endpoint.

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::info;

use crate::error::{AppError, Result};
use crate::services::analysis;
use crate::types::{TechnicalAnalysis, Timeframe};
use crate::AppState;

/// Query parameters for the analysis endpoint.
#[derive(Debug, Deserialize)]
pub struct AnalysisQuery {
    /// Aggregation granularity: DAILY, WEEKLY or MONTHLY.
    pub timeframe: Option<String>,
}

/// Create the analysis router.
pub fn router() -> Router<AppState> {
    Router::new().route("/:symbol", get(get_analysis))
}

/// Technical analysis for a symbol at the requested timeframe.
async fn get_analysis(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
    Query(query): Query<AnalysisQuery>,
) -> Result<Json<TechnicalAnalysis>> {
    let timeframe = match query.timeframe {
        Some(ref raw) => Timeframe::from_str(raw)
            .ok_or_else(|| AppError::BadRequest(format!("Invalid timeframe: {raw}")))?,
        None => Timeframe::default(),
    };

    info!(
        "GET /api/technical/{} - timeframe: {}",
        symbol,
        timeframe.name()
    );

    let analysis = analysis::analyze(&state.bar_store, &symbol, timeframe)?;
    info!(
        "GET /api/technical/{} - {} oscillators, {} moving averages",
        symbol,
        analysis.oscillators.len(),
        analysis.moving_averages.len()
    );

    Ok(Json(analysis))
}
