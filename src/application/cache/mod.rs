//! In-memory caches used by application services.
//!
//! - [`Memo`]: a single memoized value with TTL expiry and explicit
//!   invalidation

mod memo;

pub use memo::Memo;
