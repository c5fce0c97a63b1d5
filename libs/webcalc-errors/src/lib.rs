//! Problem Details for the webcalc HTTP surface.
//!
//! The JSON endpoints report failures as RFC 9457 documents. This crate only
//! holds the data model; the `axum` feature makes [`Problem`] a response type.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod problem;

pub use problem::{APPLICATION_PROBLEM_JSON, Problem};

/// Attach the request path and, when known, the request id to a problem.
#[must_use]
pub fn finalize(mut p: Problem, instance: &str, trace_id: Option<String>) -> Problem {
    p = p.with_instance(instance);
    if let Some(tid) = trace_id {
        p = p.with_trace_id(tid);
    }
    p
}
