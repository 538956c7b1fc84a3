//! PharmaGuard application wiring: configuration and the refresh pipeline.

pub mod config;
pub mod dashboard;

pub use config::{AppConfig, UsageStrategyKind};
pub use dashboard::{Dashboard, DashboardSnapshot};
