//! Dashboard presentation and caching settings.

use chrono::Duration;
use serde::Deserialize;

use crate::error::{ConfigError, Result};

/// Presentation and cache settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Symbol prefixed to currency tiles.
    pub currency_symbol: String,
    /// Seconds a loaded snapshot stays fresh; `0` keeps it until an explicit
    /// refresh.
    pub cache_ttl_secs: u64,
    /// Width in characters of the longest chart bar.
    pub chart_width: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            currency_symbol: "₹".into(),
            cache_ttl_secs: 300,
            chart_width: 40,
        }
    }
}

impl DashboardConfig {
    /// Cache time-to-live, `None` when snapshots only expire on refresh.
    #[must_use]
    pub fn cache_ttl(&self) -> Option<Duration> {
        if self.cache_ttl_secs == 0 {
            return None;
        }
        i64::try_from(self.cache_ttl_secs)
            .ok()
            .and_then(Duration::try_seconds)
    }

    pub(super) fn validate(&self) -> Result<()> {
        if self.chart_width == 0 {
            return Err(ConfigError::InvalidValue {
                field: "chart_width",
                reason: "must be at least 1".into(),
            }
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_ttl_disables_expiry() {
        let config = DashboardConfig {
            cache_ttl_secs: 0,
            ..DashboardConfig::default()
        };
        assert!(config.cache_ttl().is_none());
    }

    #[test]
    fn default_ttl_is_five_minutes() {
        assert_eq!(
            DashboardConfig::default().cache_ttl(),
            Some(Duration::seconds(300))
        );
    }

    #[test]
    fn zero_chart_width_is_rejected() {
        let config = DashboardConfig {
            chart_width: 0,
            ..DashboardConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
