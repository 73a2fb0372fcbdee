use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Aggregation granularity for bar series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Timeframe {
    Daily,
    Weekly,
    #[default]
    Monthly,
}

impl Timeframe {
    /// Parse from string, case-insensitive.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "DAILY" => Some(Self::Daily),
            "WEEKLY" => Some(Self::Weekly),
            "MONTHLY" => Some(Self::Monthly),
            _ => None,
        }
    }

    /// Wire-format name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Daily => "DAILY",
            Self::Weekly => "WEEKLY",
            Self::Monthly => "MONTHLY",
        }
    }

    /// Canonical start of the period containing `date`.
    ///
    /// Weekly periods start on the Monday on or before the date, monthly
    /// periods on the first of the month. Daily is the date itself.
    pub fn period_start(&self, date: NaiveDate) -> NaiveDate {
        match self {
            Self::Daily => date,
            Self::Weekly => date - Duration::days(date.weekday().num_days_from_monday() as i64),
            Self::Monthly => date.with_day(1).unwrap_or(date),
        }
    }
}
