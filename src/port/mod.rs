//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! ```text
//!   ┌──────────────┐   CrmSource   ┌────────────────────┐
//!   │ Application  │ ────────────► │ Diesel SQL adapter │
//!   └──────────────┘               └────────────────────┘
//! ```

pub mod outbound;
