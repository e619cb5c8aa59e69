pub mod analytics;
pub mod autotrader;
pub mod cache;
pub mod dataset;
pub mod series;
pub mod settings;
pub mod snapshot;
pub mod status;
pub mod timeframe;
pub mod trade;
