//! In-memory CRM sources for exercising the pipeline without a database.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::domain::{DetailReportRow, MonthlyRevenue, PipelineStageCount, RevenueRecord};
use crate::error::{Error, Result};
use crate::port::outbound::source::CrmSource;

/// A source that answers every query from fixed rows.
///
/// Counts how many load cycles it has served (calls to `total_leads`, the
/// first query of every cycle).
#[derive(Debug, Default)]
pub struct StaticSource {
    total_leads: i64,
    won_leads: i64,
    revenue: Vec<RevenueRecord>,
    stages: Vec<PipelineStageCount>,
    monthly: Vec<MonthlyRevenue>,
    detail: Vec<DetailReportRow>,
    cycles: AtomicUsize,
}

impl StaticSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_lead_counts(mut self, total: i64, won: i64) -> Self {
        self.total_leads = total;
        self.won_leads = won;
        self
    }

    #[must_use]
    pub fn with_revenue(mut self, rows: Vec<RevenueRecord>) -> Self {
        self.revenue = rows;
        self
    }

    #[must_use]
    pub fn with_stages(mut self, rows: Vec<PipelineStageCount>) -> Self {
        self.stages = rows;
        self
    }

    #[must_use]
    pub fn with_monthly(mut self, rows: Vec<MonthlyRevenue>) -> Self {
        self.monthly = rows;
        self
    }

    #[must_use]
    pub fn with_detail(mut self, rows: Vec<DetailReportRow>) -> Self {
        self.detail = rows;
        self
    }

    /// Number of load cycles served so far.
    #[must_use]
    pub fn cycles(&self) -> usize {
        self.cycles.load(Ordering::SeqCst)
    }
}

impl CrmSource for StaticSource {
    fn total_leads(&self) -> Result<i64> {
        self.cycles.fetch_add(1, Ordering::SeqCst);
        Ok(self.total_leads)
    }

    fn won_leads(&self) -> Result<i64> {
        Ok(self.won_leads)
    }

    fn revenue(&self) -> Result<Vec<RevenueRecord>> {
        Ok(self.revenue.clone())
    }

    fn pipeline_stage_counts(&self) -> Result<Vec<PipelineStageCount>> {
        Ok(self.stages.clone())
    }

    fn monthly_revenue(&self) -> Result<Vec<MonthlyRevenue>> {
        Ok(self.monthly.clone())
    }

    fn detail_report(&self) -> Result<Vec<DetailReportRow>> {
        Ok(self.detail.clone())
    }
}

/// Wraps a [`StaticSource`] and fails one named query with a simulated
/// connectivity error.
#[derive(Debug)]
pub struct FailingSource {
    inner: StaticSource,
    failing: &'static str,
}

impl FailingSource {
    /// `failing` is a catalog query name such as `"won_leads"`.
    #[must_use]
    pub fn new(inner: StaticSource, failing: &'static str) -> Self {
        Self { inner, failing }
    }

    #[must_use]
    pub fn cycles(&self) -> usize {
        self.inner.cycles()
    }

    fn check(&self, query: &str) -> Result<()> {
        if query == self.failing {
            return Err(Error::Connection(format!(
                "simulated connectivity failure during {query}"
            )));
        }
        Ok(())
    }
}

impl CrmSource for FailingSource {
    fn total_leads(&self) -> Result<i64> {
        self.check("total_leads")?;
        self.inner.total_leads()
    }

    fn won_leads(&self) -> Result<i64> {
        self.check("won_leads")?;
        self.inner.won_leads()
    }

    fn revenue(&self) -> Result<Vec<RevenueRecord>> {
        self.check("revenue")?;
        self.inner.revenue()
    }

    fn pipeline_stage_counts(&self) -> Result<Vec<PipelineStageCount>> {
        self.check("pipeline_stage_counts")?;
        self.inner.pipeline_stage_counts()
    }

    fn monthly_revenue(&self) -> Result<Vec<MonthlyRevenue>> {
        self.check("monthly_revenue")?;
        self.inner.monthly_revenue()
    }

    fn detail_report(&self) -> Result<Vec<DetailReportRow>> {
        self.check("detail_report")?;
        self.inner.detail_report()
    }
}
