use serde::{Deserialize, Serialize};

/// Next-day close forecast from the regression model.
///
/// Field names match the JSON the script prints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceForecast {
    pub symbol: String,
    pub predicted_close: f64,
}

/// Multi-day LSTM forecast with validation metrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LstmForecast {
    pub symbol: String,
    pub lookback_period: u32,
    pub training_samples: u32,
    pub validation_samples: u32,
    pub last_price: f64,
    pub last_date: String,
    pub metrics: ForecastMetrics,
    pub predictions: Vec<ForecastPoint>,
}

/// Validation metrics reported by the LSTM script.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastMetrics {
    pub rmse: f64,
    pub mape: f64,
    pub r2_score: f64,
}

/// One forecasted day.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPoint {
    pub date: String,
    pub predicted_price: f64,
}
