//! Handler for `queries`: lists the SQL catalog.

use serde_json::json;
use tabled::{Table, Tabled};

use super::command::QueriesArgs;
use super::output;
use crate::adapter::outbound::sql::connection::detect_dialect;
use crate::adapter::outbound::sql::{CatalogQuery, Dialect};
use crate::config::Config;
use crate::error::Result;

#[derive(Tabled)]
struct QueryRow {
    #[tabled(rename = "Name")]
    name: &'static str,
    #[tabled(rename = "Returns")]
    description: &'static str,
}

/// Dialect from the flag, else from the configured connection URL.
pub fn resolve_dialect(config: &Config, args: &QueriesArgs) -> Result<Dialect> {
    match args.dialect {
        Some(dialect) => Ok(dialect.into()),
        None => detect_dialect(&config.database.connection_url()?),
    }
}

/// Execute `queries`.
pub fn execute(config: &Config, args: &QueriesArgs) -> Result<()> {
    let dialect = resolve_dialect(config, args)?;

    if output::is_json() {
        let queries: Vec<_> = CatalogQuery::ALL
            .iter()
            .map(|query| {
                json!({
                    "name": query.name(),
                    "description": query.description(),
                    "sql": query.sql(dialect),
                })
            })
            .collect();
        output::json_output(json!({
            "command": "queries",
            "dialect": dialect.as_str(),
            "queries": queries,
        }));
        return Ok(());
    }
    if output::is_quiet() {
        return Ok(());
    }

    output::header(env!("CARGO_PKG_VERSION"));
    output::field("Dialect", dialect.as_str());
    output::section("Query catalog");

    let rows: Vec<QueryRow> = CatalogQuery::ALL
        .iter()
        .map(|query| QueryRow {
            name: query.name(),
            description: query.description(),
        })
        .collect();
    output::lines(&Table::new(rows).to_string());

    if output::verbosity() > 0 {
        for query in CatalogQuery::ALL {
            output::section(query.name());
            output::lines(&query.sql(dialect));
        }
    } else {
        output::hint("pass -v to print the SQL text");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::inbound::cli::command::DialectArg;

    #[test]
    fn flag_overrides_configured_backend() {
        let config = Config::default();
        let args = QueriesArgs {
            dialect: Some(DialectArg::Sqlite),
        };
        assert_eq!(resolve_dialect(&config, &args).unwrap(), Dialect::Sqlite);
    }

    #[test]
    fn default_config_is_postgres() {
        let config = Config::default();
        let dialect = resolve_dialect(&config, &QueriesArgs::default()).unwrap();
        assert_eq!(dialect, Dialect::Postgres);
    }
}
