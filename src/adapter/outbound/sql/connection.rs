//! Backend detection and connection pooling using Diesel and r2d2.
//!
//! Pools are built unchecked: no connection is opened until the first query
//! runs, so an unreachable database surfaces as an [`Error::Connection`]
//! inside a render cycle rather than at startup.

use std::time::Duration;

use diesel::query_builder::SqlQuery;
use diesel::query_dsl::methods::LoadQuery;
use diesel::r2d2::{ConnectionManager, Pool, R2D2Connection};
use diesel::RunQueryDsl;

use super::catalog::{CatalogQuery, Dialect};
use crate::error::{ConfigError, Error, Result};

/// A pool for whichever backend the URL selected.
pub enum DbPool {
    #[cfg(feature = "postgres")]
    Postgres(Pool<ConnectionManager<diesel::PgConnection>>),
    #[cfg(feature = "sqlite")]
    Sqlite(Pool<ConnectionManager<diesel::SqliteConnection>>),
}

impl DbPool {
    #[must_use]
    pub fn dialect(&self) -> Dialect {
        match self {
            #[cfg(feature = "postgres")]
            Self::Postgres(_) => Dialect::Postgres,
            #[cfg(feature = "sqlite")]
            Self::Sqlite(_) => Dialect::Sqlite,
        }
    }
}

/// Pick the dialect for a connection URL.
///
/// `postgres://` and `postgresql://` select PostgreSQL. `sqlite://`, `file:`
/// and plain paths select SQLite. Anything else is rejected.
pub fn detect_dialect(url: &str) -> Result<Dialect> {
    let lower = url.trim().to_ascii_lowercase();
    if lower.starts_with("postgres://") || lower.starts_with("postgresql://") {
        return Ok(Dialect::Postgres);
    }
    if lower.starts_with("sqlite://") || lower.starts_with("file:") || !lower.contains("://") {
        return Ok(Dialect::Sqlite);
    }

    let scheme = lower.split("://").next().unwrap_or_default();
    Err(ConfigError::InvalidValue {
        field: "url",
        reason: format!("unsupported scheme '{scheme}'"),
    }
    .into())
}

/// Create a pool for `url` holding at most `max_size` connections.
///
/// # Errors
/// Returns a configuration error when the URL scheme is unsupported or the
/// matching backend feature was not compiled in.
pub fn create_pool(url: &str, max_size: u32, timeout: Duration) -> Result<DbPool> {
    match detect_dialect(url)? {
        Dialect::Postgres => postgres_pool(url, max_size, timeout),
        Dialect::Sqlite => sqlite_pool(url, max_size, timeout),
    }
}

fn build<C>(url: &str, max_size: u32, timeout: Duration) -> Pool<ConnectionManager<C>>
where
    C: R2D2Connection + Send + 'static,
{
    Pool::builder()
        .max_size(max_size)
        .min_idle(Some(0))
        .test_on_check_out(true)
        .connection_timeout(timeout)
        .build_unchecked(ConnectionManager::<C>::new(url))
}

#[cfg(feature = "postgres")]
fn postgres_pool(url: &str, max_size: u32, timeout: Duration) -> Result<DbPool> {
    Ok(DbPool::Postgres(build(url, max_size, timeout)))
}

#[cfg(not(feature = "postgres"))]
fn postgres_pool(url: &str, _max_size: u32, _timeout: Duration) -> Result<DbPool> {
    Err(unsupported(url, "postgres"))
}

#[cfg(feature = "sqlite")]
fn sqlite_pool(url: &str, max_size: u32, timeout: Duration) -> Result<DbPool> {
    Ok(DbPool::Sqlite(build(url, max_size, timeout)))
}

#[cfg(not(feature = "sqlite"))]
fn sqlite_pool(url: &str, _max_size: u32, _timeout: Duration) -> Result<DbPool> {
    Err(unsupported(url, "sqlite"))
}

#[cfg(not(all(feature = "postgres", feature = "sqlite")))]
fn unsupported(url: &str, feature: &'static str) -> Error {
    let scheme = url.split(':').next().unwrap_or_default().to_string();
    ConfigError::UnsupportedBackend { scheme, feature }.into()
}

/// Check out a connection and run one catalog statement.
pub(super) fn load_rows<C, T>(
    pool: &Pool<ConnectionManager<C>>,
    query: CatalogQuery,
    sql: String,
) -> Result<Vec<T>>
where
    C: R2D2Connection + Send + 'static,
    SqlQuery: LoadQuery<'static, C, T>,
{
    let mut pooled = pool.get().map_err(|e| Error::Connection(e.to_string()))?;
    let conn: &mut C = &mut pooled;
    diesel::sql_query(sql)
        .load::<T>(conn)
        .map_err(|source| Error::Query {
            query: query.name(),
            source,
        })
}
