pub mod aggregate;
pub mod analysis;
pub mod bar_store;
pub mod forecast;
pub mod ingest;

pub use bar_store::BarStore;
pub use forecast::ScriptForecaster;
pub use ingest::IngestService;
