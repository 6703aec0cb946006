//! Core domain types for shopsight.
//!
//! Holds the canonical [`Product`] record, the mutable [`FilterState`], the
//! derived statistic types consumed by the analytics engines, and the
//! env-driven application configuration. No I/O lives here.

pub mod app_config;
pub mod config;
pub mod error;
pub mod filters;
pub mod products;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::ConfigError;
pub use filters::{FilterState, FilterView, PriceRange};
pub use products::{CategoryHealth, CategoryStat, HealthBand, KpiSummary, Product};
