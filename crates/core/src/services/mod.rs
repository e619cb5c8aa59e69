pub mod account_service;
pub mod autotrader_service;
pub mod dataset_service;
pub mod equity_service;
pub mod normalizer;
pub mod summary_service;
pub mod timeframe;
pub mod trade_service;
