//! Domain layer for the calculator module.

pub mod service;

pub use service::Service;
