//! # P3A Core
//!
//! Ambient plumbing shared by the reporting crates: configuration loading,
//! core error types and optional logging setup.

pub mod config;
pub mod error;
pub mod logging;

pub use crate::config::{
    Config, GlobalConfig, ReportingConfig, SeparatorPolicy, StarConfig, load_config,
};
pub use error::CoreError;
