//! Path utilities for crm-dashboard.
//!
//! Per-user files live under `~/.crm-dashboard/`:
//! - `~/.crm-dashboard/config.toml` - configuration used when `--config`
//!   is not given

use std::path::PathBuf;

/// Returns the crm-dashboard home directory (`~/.crm-dashboard/`).
pub fn home_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".crm-dashboard")
}

/// Returns the default config file path (`~/.crm-dashboard/config.toml`).
pub fn default_config() -> PathBuf {
    home_dir().join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_lives_under_home() {
        let config = default_config();

        assert!(config.starts_with(home_dir()));
        assert!(config.to_string_lossy().contains(".crm-dashboard"));
    }
}
