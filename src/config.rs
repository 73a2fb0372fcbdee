use std::env;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// SQLite database file path.
    pub database_path: String,
    /// Python interpreter used for the forecast scripts.
    pub python_cmd: String,
    /// Directory holding the forecast scripts.
    pub scripts_dir: String,
    /// Trading pairs to backfill from Binance at startup (empty = skip).
    pub ingest_symbols: Vec<String>,
    /// Days of daily history to backfill per symbol.
    pub ingest_history_days: i64,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let ingest_symbols = env::var("INGEST_SYMBOLS")
            .map(|s| parse_symbol_list(&s))
            .unwrap_or_default();

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            database_path: env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "candela.db".to_string()),
            python_cmd: env::var("PYTHON_CMD").unwrap_or_else(|_| "python3".to_string()),
            scripts_dir: env::var("SCRIPTS_DIR").unwrap_or_else(|_| "scripts".to_string()),
            ingest_symbols,
            ingest_history_days: env::var("INGEST_HISTORY_DAYS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3650),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Parse a comma-separated symbol list, uppercased and with blanks dropped.
fn parse_symbol_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_uppercase())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_symbol_list() {
        let symbols = parse_symbol_list("btcusdt, ETHUSDT ,solusdt");
        assert_eq!(symbols, vec!["BTCUSDT", "ETHUSDT", "SOLUSDT"]);
    }

    #[test]
    fn test_parse_symbol_list_drops_blanks() {
        let symbols = parse_symbol_list("BTCUSDT,, ,ETHUSDT");
        assert_eq!(symbols, vec!["BTCUSDT", "ETHUSDT"]);
    }

    #[test]
    fn test_parse_symbol_list_empty() {
        assert!(parse_symbol_list("").is_empty());
    }

    #[test]
    fn test_config_construction() {
        let config = Config {
            host: "localhost".to_string(),
            port: 8080,
            database_path: "test.db".to_string(),
            python_cmd: "python3".to_string(),
            scripts_dir: "scripts".to_string(),
            ingest_symbols: vec!["BTCUSDT".to_string()],
            ingest_history_days: 365,
        };

        assert_eq!(config.port, 8080);
        assert_eq!(config.ingest_symbols.len(), 1);
        assert_eq!(config.ingest_history_days, 365);
    }
}
