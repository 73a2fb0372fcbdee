//! Binance REST source for daily klines.

use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::types::Bar;

const BINANCE_API_URL: &str = "https://api.binance.com/api/v3";
const KLINE_LIMIT: usize = 1000;
const DAY_MS: i64 = 86_400_000;

/// Quote assets recognized when splitting a pair into base/quote.
const QUOTE_ASSETS: &[&str] = &["USDT", "USDC", "BUSD", "USD", "BTC", "ETH"];

/// Binance REST client.
#[derive(Clone)]
pub struct BinanceClient {
    client: Client,
}

impl BinanceClient {
    /// Create a new Binance client.
    pub fn new() -> Self {
        let client = Client::builder()
            .user_agent("candela/0.1")
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client }
    }

    /// Fetch up to `history_days` of daily klines for a trading pair,
    /// paging forward from the start time until the exchange runs dry.
    pub async fn fetch_daily_history(
        &self,
        symbol: &str,
        history_days: i64,
    ) -> anyhow::Result<Vec<Bar>> {
        let pair = symbol.to_uppercase();
        let (base_asset, quote_asset) = split_pair(&pair);
        let mut since = (Utc::now() - Duration::days(history_days)).timestamp_millis();
        let mut bars = Vec::new();

        loop {
            let url = format!("{BINANCE_API_URL}/klines");
            let response = self
                .client
                .get(&url)
                .query(&[("symbol", pair.as_str()), ("interval", "1d")])
                .query(&[("limit", KLINE_LIMIT as i64), ("startTime", since)])
                .send()
                .await?;

            if !response.status().is_success() {
                anyhow::bail!("Binance API error for {}: {}", pair, response.status());
            }

            let batch: Vec<Vec<Value>> = response.json().await?;
            if batch.is_empty() {
                break;
            }

            let batch_len = batch.len();
            let last_open_time = batch
                .last()
                .and_then(|kline| kline.first())
                .and_then(Value::as_i64)
                .unwrap_or(since);

            for kline in &batch {
                if let Some(bar) = kline_to_bar(kline, &pair, &base_asset, &quote_asset) {
                    bars.push(bar);
                }
            }

            if batch_len < KLINE_LIMIT {
                break;
            }
            since = last_open_time + DAY_MS;
        }

        debug!("Fetched {} daily bars for {}", bars.len(), pair);
        Ok(bars)
    }
}

impl Default for BinanceClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert one kline row into a Bar. Binance encodes prices as strings:
/// [openTime, open, high, low, close, volume, closeTime, quoteVolume, ...]
fn kline_to_bar(
    kline: &[Value],
    pair: &str,
    base_asset: &Option<String>,
    quote_asset: &Option<String>,
) -> Option<Bar> {
    let open_time = kline.first()?.as_i64()?;
    let date = DateTime::from_timestamp_millis(open_time)?.date_naive();
    let field = |idx: usize| -> Option<f64> { kline.get(idx)?.as_str()?.parse().ok() };

    Some(Bar {
        id: None,
        symbol: pair.to_string(),
        date,
        open: field(1)?,
        high: field(2)?,
        low: field(3)?,
        close: field(4)?,
        volume: field(5),
        quote_asset_volume: field(7),
        base_asset: base_asset.clone(),
        quote_asset: quote_asset.clone(),
    })
}

/// Split a trading pair into base and quote assets where the quote is
/// recognizable; unknown pairs keep both sides unset.
fn split_pair(pair: &str) -> (Option<String>, Option<String>) {
    for quote in QUOTE_ASSETS {
        if pair.len() > quote.len() && pair.ends_with(quote) {
            let base = &pair[..pair.len() - quote.len()];
            return (Some(base.to_string()), Some((*quote).to_string()));
        }
    }
    (None, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_split_pair() {
        assert_eq!(
            split_pair("BTCUSDT"),
            (Some("BTC".to_string()), Some("USDT".to_string()))
        );
        assert_eq!(
            split_pair("ETHBTC"),
            (Some("ETH".to_string()), Some("BTC".to_string()))
        );
        assert_eq!(split_pair("WEIRDPAIR"), (None, None));
        // The quote alone is not a pair
        assert_eq!(split_pair("USDT"), (None, None));
    }

    #[test]
    fn test_kline_to_bar() {
        let kline: Vec<Value> = serde_json::from_str(
            r#"[1704067200000, "42283.58", "42554.57", "42261.02", "42475.23",
                "18302.49", 1704153599999, "775245998.30", 631108, "0", "0", "0"]"#,
        )
        .unwrap();

        let bar = kline_to_bar(
            &kline,
            "BTCUSDT",
            &Some("BTC".to_string()),
            &Some("USDT".to_string()),
        )
        .unwrap();

        assert_eq!(bar.date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(bar.open, 42283.58);
        assert_eq!(bar.close, 42475.23);
        assert_eq!(bar.volume, Some(18302.49));
        assert_eq!(bar.quote_asset_volume, Some(775245998.30));
        assert_eq!(bar.base_asset.as_deref(), Some("BTC"));
    }

    #[test]
    fn test_malformed_kline_is_skipped() {
        let kline: Vec<Value> =
            serde_json::from_str(r#"[1704067200000, "not-a-number", "1", "1", "1", "1"]"#).unwrap();
        assert!(kline_to_bar(&kline, "BTCUSDT", &None, &None).is_none());

        let empty: Vec<Value> = Vec::new();
        assert!(kline_to_bar(&empty, "BTCUSDT", &None, &None).is_none());
    }
}
