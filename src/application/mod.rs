//! Application services (use cases).
//!
//! These services drive the query port, apply domain aggregation, and hand
//! finished views to the presentation and export adapters.

pub mod cache;
pub mod dashboard;
pub mod pipeline;
pub mod presentation;
