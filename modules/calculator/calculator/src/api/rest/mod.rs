//! HTTP boundary of the calculator module.
//!
//! Everything here is transport: parsing form fields, rendering the page,
//! mapping domain errors to problems. Arithmetic stays in `domain`.

pub mod dto;
pub mod error;
pub mod form;
pub mod handlers;
pub mod openapi;
pub mod page;
pub mod routes;
