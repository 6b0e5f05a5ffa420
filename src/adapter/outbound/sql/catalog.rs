//! The fixed, named SQL statements the dashboard reads.
//!
//! Every statement is parameterless and returns the same column names and
//! types on both dialects: counts as `BIGINT`, amounts cast to double
//! precision. Only month formatting differs between PostgreSQL and SQLite.

/// SQL dialect of the connected backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Postgres,
    Sqlite,
}

impl Dialect {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Postgres => "postgres",
            Self::Sqlite => "sqlite",
        }
    }

    fn month_of(self, column: &str) -> String {
        match self {
            Self::Postgres => format!("TO_CHAR({column}, 'YYYY-MM')"),
            Self::Sqlite => format!("strftime('%Y-%m', {column})"),
        }
    }
}

/// A named catalog query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogQuery {
    TotalLeads,
    WonLeads,
    Revenue,
    PipelineStageCounts,
    MonthlyRevenue,
    DetailReport,
}

const TOTAL_LEADS_SQL: &str = "SELECT COUNT(*) AS value FROM crm_lead";

const WON_LEADS_SQL: &str = "SELECT COUNT(*) AS value FROM crm_lead \
     WHERE stage_id IN (SELECT id FROM crm_stage WHERE name = 'Won')";

const REVENUE_SQL: &str = "SELECT CAST(opportunity_id AS BIGINT) AS lead_id, \
     CAST(amount_total AS DOUBLE PRECISION) AS amount_total \
     FROM sale_order \
     WHERE state = 'sale' \
     ORDER BY id";

const PIPELINE_STAGE_COUNTS_SQL: &str = "SELECT s.name AS stage, COUNT(l.id) AS cnt \
     FROM crm_lead l \
     JOIN crm_stage s ON l.stage_id = s.id \
     GROUP BY s.name \
     ORDER BY cnt DESC, s.name";

const DETAIL_REPORT_SQL: &str = "SELECT CAST(l.id AS BIGINT) AS lead_id, \
     COALESCE(l.name, '') AS lead_name, \
     u.login AS sales_person, \
     s.name AS stage, \
     CAST(COALESCE(so.amount_total, 0) AS DOUBLE PRECISION) AS revenue \
     FROM crm_lead l \
     LEFT JOIN res_users u ON l.user_id = u.id \
     LEFT JOIN crm_stage s ON l.stage_id = s.id \
     LEFT JOIN sale_order so ON so.opportunity_id = l.id \
     ORDER BY l.id, so.id";

impl CatalogQuery {
    /// Every catalog query, in pipeline order.
    pub const ALL: [CatalogQuery; 6] = [
        CatalogQuery::TotalLeads,
        CatalogQuery::WonLeads,
        CatalogQuery::Revenue,
        CatalogQuery::PipelineStageCounts,
        CatalogQuery::MonthlyRevenue,
        CatalogQuery::DetailReport,
    ];

    /// Stable name used in logs and errors.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::TotalLeads => "total_leads",
            Self::WonLeads => "won_leads",
            Self::Revenue => "revenue",
            Self::PipelineStageCounts => "pipeline_stage_counts",
            Self::MonthlyRevenue => "monthly_revenue",
            Self::DetailReport => "detail_report",
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::TotalLeads => "Count of all leads",
            Self::WonLeads => "Count of leads in the 'Won' stage",
            Self::Revenue => "Confirmed order amounts per linked lead",
            Self::PipelineStageCounts => "Lead count per stage, largest first",
            Self::MonthlyRevenue => "Confirmed revenue per month",
            Self::DetailReport => "Lead, owner, stage and order revenue",
        }
    }

    /// SQL text for `dialect`.
    #[must_use]
    pub fn sql(self, dialect: Dialect) -> String {
        match self {
            Self::TotalLeads => TOTAL_LEADS_SQL.to_string(),
            Self::WonLeads => WON_LEADS_SQL.to_string(),
            Self::Revenue => REVENUE_SQL.to_string(),
            Self::PipelineStageCounts => PIPELINE_STAGE_COUNTS_SQL.to_string(),
            Self::MonthlyRevenue => format!(
                "SELECT {month} AS month, \
                 CAST(SUM(amount_total) AS DOUBLE PRECISION) AS total \
                 FROM sale_order \
                 WHERE state = 'sale' AND date_order IS NOT NULL \
                 GROUP BY 1 \
                 ORDER BY 1",
                month = dialect.month_of("date_order")
            ),
            Self::DetailReport => DETAIL_REPORT_SQL.to_string(),
        }
    }
}
