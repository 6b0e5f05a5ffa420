//! Single-value memoization with TTL expiry and explicit invalidation.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;

use crate::error::Result;

/// A memoized value shared behind an [`Arc`].
///
/// The value is computed on first use and reused until it expires (when a
/// TTL is set) or [`Memo::invalidate`] is called. A failed computation
/// stores nothing, so the next call retries from scratch.
#[derive(Debug)]
pub struct Memo<T> {
    slot: Mutex<Option<Cached<T>>>,
    ttl: Option<Duration>,
}

#[derive(Debug)]
struct Cached<T> {
    value: Arc<T>,
    stored_at: DateTime<Utc>,
}

impl<T> Memo<T> {
    /// Create an empty memo. `None` keeps values until invalidated.
    #[must_use]
    pub fn new(ttl: Option<Duration>) -> Self {
        Self {
            slot: Mutex::new(None),
            ttl,
        }
    }

    #[must_use]
    pub fn ttl(&self) -> Option<Duration> {
        self.ttl
    }

    /// The cached value, if present and not expired.
    #[must_use]
    pub fn get(&self) -> Option<Arc<T>> {
        self.get_at(Utc::now())
    }

    /// Return the cached value or compute, store, and return a fresh one.
    ///
    /// The lock is held while `load` runs, so concurrent callers wait for a
    /// single computation instead of repeating it.
    pub fn get_or_try_insert_with<F>(&self, load: F) -> Result<Arc<T>>
    where
        F: FnOnce() -> Result<T>,
    {
        self.get_or_try_insert_at(Utc::now(), load)
    }

    /// Drop the cached value so the next access recomputes it.
    pub fn invalidate(&self) {
        self.slot.lock().take();
    }

    /// When the current value was stored, if any (expired or not).
    #[must_use]
    pub fn stored_at(&self) -> Option<DateTime<Utc>> {
        self.slot.lock().as_ref().map(|cached| cached.stored_at)
    }

    /// A TTL that reaches past the representable calendar never expires.
    fn is_fresh(&self, cached: &Cached<T>, now: DateTime<Utc>) -> bool {
        match self.ttl {
            Some(ttl) => cached
                .stored_at
                .checked_add_signed(ttl)
                .map_or(true, |expires_at| expires_at > now),
            None => true,
        }
    }

    fn get_at(&self, now: DateTime<Utc>) -> Option<Arc<T>> {
        let slot = self.slot.lock();
        slot.as_ref()
            .filter(|cached| self.is_fresh(cached, now))
            .map(|cached| Arc::clone(&cached.value))
    }

    fn get_or_try_insert_at<F>(&self, now: DateTime<Utc>, load: F) -> Result<Arc<T>>
    where
        F: FnOnce() -> Result<T>,
    {
        let mut slot = self.slot.lock();
        if let Some(cached) = slot.as_ref().filter(|cached| self.is_fresh(cached, now)) {
            return Ok(Arc::clone(&cached.value));
        }

        // Expired values are dropped before reloading so a failure leaves the
        // memo empty rather than serving stale data.
        *slot = None;
        let value = Arc::new(load()?);
        *slot = Some(Cached {
            value: Arc::clone(&value),
            stored_at: now,
        });
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::cell::Cell;

    #[test]
    fn computes_once_until_invalidated() {
        let memo = Memo::new(None);
        let calls = Cell::new(0);
        let load = || {
            calls.set(calls.get() + 1);
            Ok(calls.get())
        };

        assert_eq!(*memo.get_or_try_insert_with(load).unwrap(), 1);
        assert_eq!(*memo.get_or_try_insert_with(load).unwrap(), 1);
        assert_eq!(calls.get(), 1);

        memo.invalidate();
        assert!(memo.get().is_none());
        assert_eq!(*memo.get_or_try_insert_with(load).unwrap(), 2);
    }

    #[test]
    fn failures_are_not_cached() {
        let memo: Memo<u32> = Memo::new(None);

        let result = memo.get_or_try_insert_with(|| Err(Error::Connection("down".into())));
        assert!(result.is_err());
        assert!(memo.get().is_none());
        assert!(memo.stored_at().is_none());

        assert_eq!(*memo.get_or_try_insert_with(|| Ok(7)).unwrap(), 7);
    }

    #[test]
    fn expired_values_are_recomputed() {
        let memo = Memo::new(Some(Duration::seconds(60)));
        let start = Utc::now();

        memo.get_or_try_insert_at(start, || Ok("first")).unwrap();
        assert!(memo.get_at(start + Duration::seconds(59)).is_some());
        assert!(memo.get_at(start + Duration::seconds(60)).is_none());

        let value = memo
            .get_or_try_insert_at(start + Duration::seconds(61), || Ok("second"))
            .unwrap();
        assert_eq!(*value, "second");
    }

    #[test]
    fn ttl_beyond_calendar_range_never_expires() {
        let ttl = Duration::try_seconds(10_000_000_000_000).unwrap();
        let memo = Memo::new(Some(ttl));
        let calls = Cell::new(0);
        let load = || {
            calls.set(calls.get() + 1);
            Ok(calls.get())
        };

        assert_eq!(*memo.get_or_try_insert_with(load).unwrap(), 1);
        assert_eq!(*memo.get_or_try_insert_with(load).unwrap(), 1);
        assert!(memo.get().is_some());
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn failed_reload_after_expiry_leaves_memo_empty() {
        let memo = Memo::new(Some(Duration::seconds(1)));
        let start = Utc::now();

        memo.get_or_try_insert_at(start, || Ok(1)).unwrap();
        let later = start + Duration::seconds(5);
        let result = memo.get_or_try_insert_at(later, || Err(Error::Connection("down".into())));

        assert!(result.is_err());
        assert!(memo.stored_at().is_none());
    }
}
