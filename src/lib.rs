//! Candela - daily-candle analytics server
//!
//! Stores daily OHLCV bars in SQLite, serves them over a REST API, and
//! computes technical-analysis summaries on demand by aggregating the
//! daily history into the requested timeframe. Price forecasts are
//! delegated to external model scripts.

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod sources;
pub mod types;

use std::sync::Arc;

use crate::config::Config;
use crate::services::{BarStore, ScriptForecaster};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub bar_store: Arc<BarStore>,
    pub forecaster: Arc<ScriptForecaster>,
}
