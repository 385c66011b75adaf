pub mod booking;
pub mod config;
pub mod display;
pub mod error;
pub mod ledger;
pub mod notify;
pub mod orchestrator;
pub mod parser;
