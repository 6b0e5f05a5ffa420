//! The dashboard service: cached render-cycle data with a single failure
//! boundary.

use std::backtrace::Backtrace;
use std::sync::Arc;

use chrono::Duration;
use tracing::{error, info};

use super::cache::Memo;
use super::pipeline::{load_view, DashboardView};
use crate::domain::aggregate::DetailReducers;
use crate::error::{Error, Result};
use crate::port::outbound::source::CrmSource;

/// Serves [`DashboardView`]s to the presentation layer.
///
/// Results are memoized until the TTL lapses or [`Dashboard::refresh`] is
/// called. Failed loads are never cached.
pub struct Dashboard {
    source: Arc<dyn CrmSource>,
    cache: Memo<DashboardView>,
    reducers: DetailReducers,
}

impl Dashboard {
    pub fn new(source: Arc<dyn CrmSource>, ttl: Option<Duration>) -> Self {
        Self {
            source,
            cache: Memo::new(ttl),
            reducers: DetailReducers::default(),
        }
    }

    /// Replace the per-column detail reducers.
    #[must_use]
    pub fn with_reducers(mut self, reducers: DetailReducers) -> Self {
        self.reducers = reducers;
        self
    }

    /// Cached view or a fresh load, propagating any failure.
    pub fn try_load(&self) -> Result<Arc<DashboardView>> {
        self.cache
            .get_or_try_insert_with(|| load_view(self.source.as_ref(), &self.reducers))
    }

    /// Cached view or a fresh load.
    ///
    /// Any failure is logged with its cause chain and a backtrace and turned
    /// into `None` ("no data available").
    pub fn load(&self) -> Option<Arc<DashboardView>> {
        match self.try_load() {
            Ok(view) => {
                info!(
                    total_leads = view.snapshot.total_leads,
                    won_leads = view.snapshot.won_leads,
                    report_rows = view.report.len(),
                    "Dashboard data ready"
                );
                Some(view)
            }
            Err(e) => {
                log_failure(&e);
                None
            }
        }
    }

    /// Drop cached data so the next load re-runs every query.
    pub fn refresh(&self) {
        self.cache.invalidate();
        info!("Dashboard cache invalidated");
    }

    /// The cached view, if one is present and fresh.
    #[must_use]
    pub fn cached(&self) -> Option<Arc<DashboardView>> {
        self.cache.get()
    }

    #[must_use]
    pub fn source(&self) -> &Arc<dyn CrmSource> {
        &self.source
    }
}

fn log_failure(err: &Error) {
    let mut causes = Vec::new();
    let mut next = std::error::Error::source(err);
    while let Some(cause) = next {
        causes.push(cause.to_string());
        next = cause.source();
    }

    error!(
        error = %err,
        cause = %causes.join(": "),
        connectivity = err.is_connectivity(),
        backtrace = %Backtrace::force_capture(),
        "Failed to load dashboard data"
    );
}
