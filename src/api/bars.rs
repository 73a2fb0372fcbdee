//! Bar listing and lookup endpoints.

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::info;

use crate::error::{AppError, Result};
use crate::types::Bar;
use crate::AppState;

/// Hard cap on rows returned per page.
const MAX_PAGE_SIZE: usize = 10_000;

/// Query parameters for the paged listing.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub page: usize,
    pub size: Option<usize>,
}

/// Optional date window on a symbol's history.
#[derive(Debug, Deserialize)]
pub struct DateRangeQuery {
    pub from: Option<String>,
    pub to: Option<String>,
}

/// Query parameter for symbol search.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub query: String,
}

/// Create the bars router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api", get(list_bars))
        .route("/api/all", get(list_bars))
        .route("/api/symbol/:symbol", get(get_symbol))
        .route("/api/id/:id", get(get_by_id))
        .route("/api/search", get(search_symbols))
}

/// Paged listing over all stored bars.
async fn list_bars(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Vec<Bar>>> {
    let size = query.size.unwrap_or(MAX_PAGE_SIZE).min(MAX_PAGE_SIZE);
    let bars = state.bar_store.fetch_page(size, query.page * size)?;
    info!("GET /api - page: {}, size: {} -> {} bars", query.page, size, bars.len());
    Ok(Json(bars))
}

/// Full or date-bounded history for a symbol, oldest first.
async fn get_symbol(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
    Query(range): Query<DateRangeQuery>,
) -> Result<Json<Vec<Bar>>> {
    let bars = match (&range.from, &range.to) {
        (Some(from), Some(to)) => {
            state
                .bar_store
                .fetch_range(&symbol, parse_date(from)?, parse_date(to)?)?
        }
        _ => state.bar_store.fetch_history(&symbol)?,
    };
    info!("GET /api/symbol/{} -> {} bars", symbol, bars.len());
    Ok(Json(bars))
}

/// Single bar by row id.
async fn get_by_id(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<Bar>> {
    state
        .bar_store
        .fetch_by_id(id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("No bar with id {id}")))
}

/// Distinct symbol names matching the query, for autocomplete.
async fn search_symbols(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<String>>> {
    Ok(Json(state.bar_store.search_symbols(&query.query)?))
}

fn parse_date(value: &str) -> Result<NaiveDate> {
    value
        .parse()
        .map_err(|_| AppError::BadRequest(format!("Invalid date: {value}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-01-15").unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
        );
        assert!(parse_date("15/01/2024").is_err());
        assert!(parse_date("").is_err());
    }
}
