//! SQL adapter for the CRM query catalog.
//!
//! - [`catalog`]: named statements per dialect
//! - [`connection`]: backend detection and r2d2 pools
//! - [`row`]: typed result rows
//! - [`source`]: the [`CrmSource`](crate::port::outbound::source::CrmSource)
//!   implementation

pub mod catalog;
pub mod connection;
pub mod row;
pub mod source;

pub use catalog::{CatalogQuery, Dialect};
pub use source::DieselCrmSource;
