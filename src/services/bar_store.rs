//! SQLite persistence for daily bars.
//!
//! Bars are unique per (symbol, date) and the history queries always
//! return rows oldest-first, which the timeframe aggregator relies on.

use std::path::Path;
use std::sync::Mutex;

use chrono::NaiveDate;
use rusqlite::{params, Connection, Row};
use tracing::{error, info};

use crate::types::Bar;

/// SQLite-backed store for daily OHLCV bars.
pub struct BarStore {
    conn: Mutex<Connection>,
}

impl BarStore {
    /// Open (or create) a store at the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, rusqlite::Error> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Create an in-memory store (for testing).
    pub fn new_in_memory() -> Result<Self, rusqlite::Error> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Initialize database schema.
    fn init_schema(&self) -> Result<(), rusqlite::Error> {
        let conn = self.conn.lock().unwrap();

        conn.execute(
            "CREATE TABLE IF NOT EXISTS bars (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                symbol TEXT NOT NULL,
                date TEXT NOT NULL,
                open REAL NOT NULL,
                high REAL NOT NULL,
                low REAL NOT NULL,
                close REAL NOT NULL,
                volume REAL,
                quote_asset_volume REAL,
                base_asset TEXT,
                quote_asset TEXT,
                UNIQUE(symbol, date)
            )",
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_bars_symbol ON bars(symbol)",
            [],
        )?;
        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_bars_symbol_date ON bars(symbol, date)",
            [],
        )?;

        info!("Bar store schema initialized");
        Ok(())
    }

    /// Upsert a batch of bars in one transaction. Returns rows written.
    pub fn insert_bars(&self, bars: &[Bar]) -> Result<usize, rusqlite::Error> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;
        let mut written = 0;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO bars (symbol, date, open, high, low, close,
                                   volume, quote_asset_volume, base_asset, quote_asset)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
                 ON CONFLICT(symbol, date) DO UPDATE SET
                     open = excluded.open,
                     high = excluded.high,
                     low = excluded.low,
                     close = excluded.close,
                     volume = excluded.volume,
                     quote_asset_volume = excluded.quote_asset_volume",
            )?;
            for bar in bars {
                written += stmt.execute(params![
                    bar.symbol,
                    bar.date.to_string(),
                    bar.open,
                    bar.high,
                    bar.low,
                    bar.close,
                    bar.volume,
                    bar.quote_asset_volume,
                    bar.base_asset,
                    bar.quote_asset,
                ])?;
            }
        }
        tx.commit()?;
        Ok(written)
    }

    /// Full history for a symbol, oldest first. Symbol match is
    /// case-insensitive.
    pub fn fetch_history(&self, symbol: &str) -> Result<Vec<Bar>, rusqlite::Error> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, symbol, date, open, high, low, close,
                    volume, quote_asset_volume, base_asset, quote_asset
             FROM bars WHERE symbol = ?1 COLLATE NOCASE
             ORDER BY date ASC",
        )?;
        let rows = stmt.query_map(params![symbol], row_to_bar)?;
        rows.collect()
    }

    /// History for a symbol restricted to a date range, oldest first.
    pub fn fetch_range(
        &self,
        symbol: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Bar>, rusqlite::Error> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, symbol, date, open, high, low, close,
                    volume, quote_asset_volume, base_asset, quote_asset
             FROM bars WHERE symbol = ?1 COLLATE NOCASE
               AND date BETWEEN ?2 AND ?3
             ORDER BY date ASC",
        )?;
        let rows = stmt.query_map(params![symbol, from.to_string(), to.to_string()], row_to_bar)?;
        rows.collect()
    }

    /// Look up a single bar by row id.
    pub fn fetch_by_id(&self, id: i64) -> Option<Bar> {
        let conn = self.conn.lock().unwrap();
        let result = conn.query_row(
            "SELECT id, symbol, date, open, high, low, close,
                    volume, quote_asset_volume, base_asset, quote_asset
             FROM bars WHERE id = ?1",
            params![id],
            row_to_bar,
        );

        match result {
            Ok(bar) => Some(bar),
            Err(rusqlite::Error::QueryReturnedNoRows) => None,
            Err(e) => {
                error!("Error fetching bar {}: {}", id, e);
                None
            }
        }
    }

    /// Paged listing across all symbols, ordered by symbol then date.
    pub fn fetch_page(&self, limit: usize, offset: usize) -> Result<Vec<Bar>, rusqlite::Error> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, symbol, date, open, high, low, close,
                    volume, quote_asset_volume, base_asset, quote_asset
             FROM bars ORDER BY symbol ASC, date ASC
             LIMIT ?1 OFFSET ?2",
        )?;
        let rows = stmt.query_map(params![limit as i64, offset as i64], row_to_bar)?;
        rows.collect()
    }

    /// Distinct symbols matching a substring, case-insensitive.
    pub fn search_symbols(&self, query: &str) -> Result<Vec<String>, rusqlite::Error> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT DISTINCT symbol FROM bars
             WHERE symbol LIKE '%' || ?1 || '%' COLLATE NOCASE
             ORDER BY symbol ASC",
        )?;
        let rows = stmt.query_map(params![query], |row| row.get(0))?;
        rows.collect()
    }

    /// All distinct symbols in the store.
    pub fn list_symbols(&self) -> Result<Vec<String>, rusqlite::Error> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare("SELECT DISTINCT symbol FROM bars ORDER BY symbol ASC")?;
        let rows = stmt.query_map([], |row| row.get(0))?;
        rows.collect()
    }

    /// Total number of stored bars.
    pub fn bar_count(&self) -> usize {
        let conn = self.conn.lock().unwrap();
        conn.query_row("SELECT COUNT(*) FROM bars", [], |row| row.get::<_, i64>(0))
            .map(|n| n as usize)
            .unwrap_or(0)
    }
}

/// Map a result row onto a Bar.
fn row_to_bar(row: &Row) -> Result<Bar, rusqlite::Error> {
    let date_str: String = row.get(2)?;
    let date = date_str.parse::<NaiveDate>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(2, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(Bar {
        id: Some(row.get(0)?),
        symbol: row.get(1)?,
        date,
        open: row.get(3)?,
        high: row.get(4)?,
        low: row.get(5)?,
        close: row.get(6)?,
        volume: row.get(7)?,
        quote_asset_volume: row.get(8)?,
        base_asset: row.get(9)?,
        quote_asset: row.get(10)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn bar(symbol: &str, d: NaiveDate, close: f64) -> Bar {
        Bar {
            id: None,
            symbol: symbol.to_string(),
            date: d,
            open: close - 1.0,
            high: close + 2.0,
            low: close - 2.0,
            close,
            volume: Some(100.0),
            quote_asset_volume: None,
            base_asset: None,
            quote_asset: None,
        }
    }

    #[test]
    fn test_fetch_history_is_date_ascending() {
        let store = BarStore::new_in_memory().unwrap();
        // Insert out of order on purpose
        store
            .insert_bars(&[
                bar("BTCUSDT", date(2024, 1, 3), 102.0),
                bar("BTCUSDT", date(2024, 1, 1), 100.0),
                bar("BTCUSDT", date(2024, 1, 2), 101.0),
            ])
            .unwrap();

        let history = store.fetch_history("BTCUSDT").unwrap();
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].date, date(2024, 1, 1));
        assert_eq!(history[2].date, date(2024, 1, 3));
        assert!(history[0].id.is_some());
    }

    #[test]
    fn test_symbol_match_is_case_insensitive() {
        let store = BarStore::new_in_memory().unwrap();
        store
            .insert_bars(&[bar("BTCUSDT", date(2024, 1, 1), 100.0)])
            .unwrap();

        assert_eq!(store.fetch_history("btcusdt").unwrap().len(), 1);
        assert_eq!(store.fetch_history("BtcUsdt").unwrap().len(), 1);
    }

    #[test]
    fn test_upsert_replaces_same_day() {
        let store = BarStore::new_in_memory().unwrap();
        store
            .insert_bars(&[bar("BTCUSDT", date(2024, 1, 1), 100.0)])
            .unwrap();
        store
            .insert_bars(&[bar("BTCUSDT", date(2024, 1, 1), 200.0)])
            .unwrap();

        let history = store.fetch_history("BTCUSDT").unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].close, 200.0);
    }

    #[test]
    fn test_fetch_range() {
        let store = BarStore::new_in_memory().unwrap();
        store
            .insert_bars(&[
                bar("BTCUSDT", date(2024, 1, 1), 100.0),
                bar("BTCUSDT", date(2024, 1, 15), 110.0),
                bar("BTCUSDT", date(2024, 2, 1), 120.0),
            ])
            .unwrap();

        let range = store
            .fetch_range("BTCUSDT", date(2024, 1, 1), date(2024, 1, 31))
            .unwrap();
        assert_eq!(range.len(), 2);
        assert_eq!(range[1].date, date(2024, 1, 15));
    }

    #[test]
    fn test_fetch_by_id() {
        let store = BarStore::new_in_memory().unwrap();
        store
            .insert_bars(&[bar("ETHUSDT", date(2024, 1, 1), 3000.0)])
            .unwrap();

        let id = store.fetch_history("ETHUSDT").unwrap()[0].id.unwrap();
        let fetched = store.fetch_by_id(id).unwrap();
        assert_eq!(fetched.symbol, "ETHUSDT");
        assert!(store.fetch_by_id(id + 999).is_none());
    }

    #[test]
    fn test_search_symbols() {
        let store = BarStore::new_in_memory().unwrap();
        store
            .insert_bars(&[
                bar("BTCUSDT", date(2024, 1, 1), 100.0),
                bar("ETHUSDT", date(2024, 1, 1), 3000.0),
                bar("ETHBTC", date(2024, 1, 1), 0.05),
            ])
            .unwrap();

        let matches = store.search_symbols("usdt").unwrap();
        assert_eq!(matches, vec!["BTCUSDT", "ETHUSDT"]);
        let matches = store.search_symbols("eth").unwrap();
        assert_eq!(matches, vec!["ETHBTC", "ETHUSDT"]);
    }

    #[test]
    fn test_fetch_page_and_count() {
        let store = BarStore::new_in_memory().unwrap();
        store
            .insert_bars(&[
                bar("AAAUSDT", date(2024, 1, 1), 1.0),
                bar("AAAUSDT", date(2024, 1, 2), 1.1),
                bar("BBBUSDT", date(2024, 1, 1), 2.0),
            ])
            .unwrap();

        assert_eq!(store.bar_count(), 3);
        let page = store.fetch_page(2, 0).unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].symbol, "AAAUSDT");
        let page = store.fetch_page(2, 2).unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].symbol, "BBBUSDT");
    }

    #[test]
    fn test_list_symbols() {
        let store = BarStore::new_in_memory().unwrap();
        store
            .insert_bars(&[
                bar("BTCUSDT", date(2024, 1, 1), 100.0),
                bar("BTCUSDT", date(2024, 1, 2), 101.0),
                bar("ETHUSDT", date(2024, 1, 1), 3000.0),
            ])
            .unwrap();

        assert_eq!(store.list_symbols().unwrap(), vec!["BTCUSDT", "ETHUSDT"]);
    }
}
