//! CRM dashboard - read-only KPI reporting over a CRM database.
//!
//! This crate loads lead and sales-order data from a relational CRM schema,
//! aggregates it into a small set of key performance indicators, and renders
//! them as terminal tiles, charts, and a detail table. The detail report can
//! be exported as a two-sheet XLSX workbook or as CSV.
//!
//! # Architecture
//!
//! Data flows one way through three layers:
//!
//! ```text
//!  Query Catalog ──► Aggregation Pipeline ──► Presentation & Export
//!  (adapter::outbound::sql)  (domain + application)  (adapter::inbound::cli,
//!                                                     adapter::outbound::export)
//! ```
//!
//! # Modules
//!
//! - [`config`] - Configuration loading from TOML and environment variables
//! - [`domain`] - Row types, snapshot, and the aggregation rules
//! - [`port`] - The [`port::outbound::source::CrmSource`] contract
//! - [`application`] - Pipeline, memoization cache, and KPI tile formatting
//! - [`adapter`] - Diesel-backed source, spreadsheet export, and the CLI
//! - [`error`] - Error types for the crate
//!
//! # Features
//!
//! - `sqlite` (default) - SQLite backend via bundled libsqlite3
//! - `postgres` - PostgreSQL backend via libpq
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use crm_dashboard::adapter::outbound::sql::DieselCrmSource;
//! use crm_dashboard::application::dashboard::Dashboard;
//! use crm_dashboard::config::Config;
//!
//! let config = Config::from_env()?;
//! let source = DieselCrmSource::connect(&config.database)?;
//! let dashboard = Dashboard::new(Arc::new(source), config.dashboard.cache_ttl());
//! if let Some(view) = dashboard.load() {
//!     println!("{} leads", view.snapshot.total_leads);
//! }
//! # Ok::<(), crm_dashboard::error::Error>(())
//! ```

pub mod adapter;
pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;

#[cfg(not(any(feature = "sqlite", feature = "postgres")))]
compile_error!("enable at least one database backend feature: `sqlite` or `postgres`");
