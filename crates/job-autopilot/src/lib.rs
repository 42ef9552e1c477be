pub mod browser;
pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
