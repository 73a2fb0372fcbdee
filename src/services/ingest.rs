//! Startup backfill of daily bars from the market-data source.

use std::sync::Arc;

use tracing::{error, info};

use crate::services::BarStore;
use crate::sources::BinanceClient;

/// Backfills daily history for configured trading pairs.
pub struct IngestService {
    client: BinanceClient,
    store: Arc<BarStore>,
}

impl IngestService {
    pub fn new(client: BinanceClient, store: Arc<BarStore>) -> Self {
        Self { client, store }
    }

    /// Backfill each symbol in turn. Per-symbol failures are logged and
    /// skipped so one bad pair cannot stall the rest.
    pub async fn sync_symbols(&self, symbols: &[String], history_days: i64) {
        info!("Backfilling {} symbols from Binance", symbols.len());
        for symbol in symbols {
            match self.sync_symbol(symbol, history_days).await {
                Ok(written) => info!("Backfilled {} bars for {}", written, symbol),
                Err(e) => error!("Backfill failed for {}: {}", symbol, e),
            }
        }
    }

    async fn sync_symbol(&self, symbol: &str, history_days: i64) -> anyhow::Result<usize> {
        let bars = self.client.fetch_daily_history(symbol, history_days).await?;
        if bars.is_empty() {
            return Ok(0);
        }
        Ok(self.store.insert_bars(&bars)?)
    }
}
