use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One daily OHLCV observation for a trading pair.
///
/// Bars are unique per (symbol, date); the symbol match is
/// case-insensitive throughout the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bar {
    /// Database row id; absent for bars not yet persisted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub symbol: String,
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote_asset_volume: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_asset: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote_asset: Option<String>,
}

impl Bar {
    /// Volume with absent values treated as zero.
    pub fn volume_or_zero(&self) -> f64 {
        self.volume.unwrap_or(0.0)
    }

    /// True when every price field is a finite number.
    pub fn is_well_formed(&self) -> bool {
        self.open.is_finite()
            && self.high.is_finite()
            && self.low.is_finite()
            && self.close.is_finite()
    }
}
