//! Price forecasting via external model scripts.
//!
//! The regression and LSTM models live outside this crate; this module
//! shells out to them, captures their output, and parses the JSON
//! payload they print. Scripts log progress to stderr and print exactly
//! one JSON object to stdout, possibly an `{"error": ...}` payload on
//! failure.

use std::path::PathBuf;
use std::process::Stdio;

use serde::de::DeserializeOwned;
use tokio::process::Command;
use tracing::{debug, error, info};

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::types::{LstmForecast, PriceForecast};

/// Quote assets a symbol may already carry.
const QUOTE_SUFFIXES: [&str; 3] = ["USDT", "USDC", "BUSD"];

/// Forecaster backed by the configured Python scripts.
///
/// The subprocess detail stays private; swapping in a model served some
/// other way replaces this struct without touching the API layer.
pub struct ScriptForecaster {
    python_cmd: String,
    scripts_dir: PathBuf,
}

impl ScriptForecaster {
    pub fn new(config: &Config) -> Self {
        Self {
            python_cmd: config.python_cmd.clone(),
            scripts_dir: PathBuf::from(&config.scripts_dir),
        }
    }

    /// Next-day close from the regression script.
    pub async fn predict_close(&self, symbol: &str) -> Result<PriceForecast> {
        let pair = normalize_symbol(symbol);
        info!("Running close forecast for {} (pair: {})", symbol, pair);

        let output = self.run_script("predict.py", &[pair.as_str()]).await?;
        let mut forecast: PriceForecast = parse_script_json(&output)?;
        // Report under the symbol the caller asked for, not the pair
        forecast.symbol = symbol.to_uppercase();
        Ok(forecast)
    }

    /// Multi-day forecast from the LSTM script.
    pub async fn predict_sequence(
        &self,
        symbol: &str,
        lookback: u32,
        days: u32,
    ) -> Result<LstmForecast> {
        let pair = symbol.to_uppercase();
        info!(
            "Running LSTM forecast for {} (lookback: {}, days: {})",
            pair, lookback, days
        );

        let lookback_arg = lookback.to_string();
        let days_arg = days.to_string();
        let output = self
            .run_script(
                "lstm.py",
                &[pair.as_str(), lookback_arg.as_str(), days_arg.as_str()],
            )
            .await?;
        parse_script_json(&output)
    }

    /// Run one script and return its combined output, stdout first.
    async fn run_script(&self, script: &str, args: &[&str]) -> Result<String> {
        let path = self.scripts_dir.join(script);
        if !path.exists() {
            return Err(AppError::Internal(format!(
                "Forecast script not found: {}",
                path.display()
            )));
        }

        debug!("Executing {} {:?}", path.display(), args);
        let output = Command::new(&self.python_cmd)
            .arg(&path)
            .args(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        if !output.status.success() {
            // Scripts report expected failures as an error JSON payload
            if let Some(message) = extract_error(&combined) {
                return Err(AppError::BadRequest(message));
            }
            error!("Forecast script {} exited with {}", script, output.status);
            return Err(AppError::Forecast(format!(
                "{script} exited with {}",
                output.status
            )));
        }

        Ok(combined)
    }
}

/// Parse the first JSON object in a script's output, tolerating trailing
/// log lines.
fn parse_script_json<T: DeserializeOwned>(output: &str) -> Result<T> {
    let start = output.find('{').ok_or_else(|| {
        AppError::Forecast("No JSON output from forecast script".to_string())
    })?;

    let mut deserializer = serde_json::Deserializer::from_str(&output[start..]);
    Ok(T::deserialize(&mut deserializer)?)
}

/// Pull an `{"error": ...}` payload out of failed script output.
fn extract_error(output: &str) -> Option<String> {
    let value: serde_json::Value = parse_script_json(output).ok()?;
    value
        .get("error")
        .and_then(|e| e.as_str())
        .map(str::to_string)
}

/// Append a stable quote asset unless the symbol already carries one.
fn normalize_symbol(symbol: &str) -> String {
    let upper = symbol.to_uppercase();
    if QUOTE_SUFFIXES.iter().any(|q| upper.ends_with(q)) {
        return upper;
    }
    if upper.len() > 3 && (upper.ends_with("BTC") || upper.ends_with("ETH")) {
        return upper;
    }
    format!("{upper}USDT")
}
