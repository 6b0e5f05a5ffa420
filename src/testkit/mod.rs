//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`source`]: In-memory [`CrmSource`](crate::port::outbound::source::CrmSource)
//!   implementations: `StaticSource`, `FailingSource`.
//! - [`database`]: An in-memory SQLite database seeded with the CRM schema.

#[cfg(feature = "sqlite")]
pub mod database;
pub mod source;
