//! Diesel-backed [`CrmSource`].

use std::time::Duration;

use tracing::{debug, info};

use super::catalog::{CatalogQuery, Dialect};
use super::connection::{create_pool, load_rows, DbPool};
use super::row::{CountRow, DetailRow, MonthlyRevenueRow, RevenueRow, StageCountRow};
use crate::config::DatabaseConfig;
use crate::domain::{DetailReportRow, MonthlyRevenue, PipelineStageCount, RevenueRecord};
use crate::error::Result;
use crate::port::outbound::source::CrmSource;

/// Run a catalog query against whichever backend the pool holds.
macro_rules! with_pool {
    ($pool:expr, |$inner:ident| $body:expr) => {
        match $pool {
            #[cfg(feature = "postgres")]
            DbPool::Postgres($inner) => $body,
            #[cfg(feature = "sqlite")]
            DbPool::Sqlite($inner) => $body,
        }
    };
}

/// Reads the query catalog through a shared connection pool.
///
/// Each query checks out its own connection; no transaction spans queries.
pub struct DieselCrmSource {
    pool: DbPool,
    dialect: Dialect,
}

impl DieselCrmSource {
    /// Build a source from database settings.
    pub fn connect(config: &DatabaseConfig) -> Result<Self> {
        let url = config.connection_url()?;
        let source = Self::from_url(&url, config.pool_size, config.connect_timeout())?;
        info!(
            database = %config.display_url(),
            dialect = source.dialect.as_str(),
            pool_size = config.pool_size,
            "CRM source configured"
        );
        Ok(source)
    }

    /// Build a source for an explicit URL.
    pub fn from_url(url: &str, pool_size: u32, timeout: Duration) -> Result<Self> {
        let pool = create_pool(url, pool_size, timeout)?;
        let dialect = pool.dialect();
        Ok(Self { pool, dialect })
    }

    #[must_use]
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    fn rows<R, T>(&self, query: CatalogQuery) -> Result<Vec<T>>
    where
        R: Into<T>,
        Self: LoadRows<R>,
    {
        let rows: Vec<R> = self.load(query)?;
        debug!(query = query.name(), rows = rows.len(), "Catalog query finished");
        Ok(rows.into_iter().map(Into::into).collect())
    }

    fn scalar(&self, query: CatalogQuery) -> Result<i64> {
        let rows: Vec<CountRow> = self.load(query)?;
        let value = rows.first().map_or(0, |row| row.value);
        debug!(query = query.name(), value, "Catalog query finished");
        Ok(value)
    }
}

/// Row types loadable from every compiled-in backend.
trait LoadRows<R> {
    fn load(&self, query: CatalogQuery) -> Result<Vec<R>>;
}

macro_rules! impl_load_rows {
    ($($row:ty),* $(,)?) => {
        $(
            impl LoadRows<$row> for DieselCrmSource {
                fn load(&self, query: CatalogQuery) -> Result<Vec<$row>> {
                    let sql = query.sql(self.dialect);
                    with_pool!(&self.pool, |pool| load_rows::<_, $row>(pool, query, sql))
                }
            }
        )*
    };
}

impl_load_rows!(CountRow, RevenueRow, StageCountRow, MonthlyRevenueRow, DetailRow);

impl CrmSource for DieselCrmSource {
    fn total_leads(&self) -> Result<i64> {
        self.scalar(CatalogQuery::TotalLeads)
    }

    fn won_leads(&self) -> Result<i64> {
        self.scalar(CatalogQuery::WonLeads)
    }

    fn revenue(&self) -> Result<Vec<RevenueRecord>> {
        self.rows::<RevenueRow, _>(CatalogQuery::Revenue)
    }

    fn pipeline_stage_counts(&self) -> Result<Vec<PipelineStageCount>> {
        self.rows::<StageCountRow, _>(CatalogQuery::PipelineStageCounts)
    }

    fn monthly_revenue(&self) -> Result<Vec<MonthlyRevenue>> {
        self.rows::<MonthlyRevenueRow, _>(CatalogQuery::MonthlyRevenue)
    }

    fn detail_report(&self) -> Result<Vec<DetailReportRow>> {
        self.rows::<DetailRow, _>(CatalogQuery::DetailReport)
    }
}

impl std::fmt::Debug for DieselCrmSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DieselCrmSource")
            .field("dialect", &self.dialect)
            .finish_non_exhaustive()
    }
}
