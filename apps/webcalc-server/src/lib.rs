//! webcalc server library: configuration, logging and the HTTP host.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod logging;
pub mod server;
pub mod signals;

pub use config::{AppConfig, CliOverrides, ConfigError};
