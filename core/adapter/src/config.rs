//! Adapter configuration loading.
//!
//! Everything has a sensible default; a missing or malformed config file
//! degrades to `AdapterConfig::default()` rather than failing startup.

use std::path::PathBuf;
use std::time::Duration;

use fs_err as fs;
use serde::{Deserialize, Serialize};

use crate::paths;

/// Tunables for the adapter, loadable from an optional JSON file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdapterConfig {
    /// Override for the owned-games catalog path (defaults to the platform
    /// location).
    pub owned_games_db: Option<PathBuf>,
    /// Override for the installed-games catalog path.
    pub installed_games_db: Option<PathBuf>,
    /// How long to wait after starting the launcher before it accepts game
    /// launch commands. The launcher ignores commands sent immediately
    /// after start.
    pub settle_delay_ms: u64,
    /// Interval between attempts to hide the launcher window after start.
    pub hide_poll_interval_ms: u64,
    /// Upper bound on the hide-window wait. When it lapses the launcher is
    /// left visible and startup is still reported as successful.
    pub hide_timeout_ms: u64,
    /// Page opened for the user when the launcher is not installed.
    pub downloads_url: String,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            owned_games_db: None,
            installed_games_db: None,
            settle_delay_ms: 3_000,
            hide_poll_interval_ms: 100,
            hide_timeout_ms: 30_000,
            downloads_url: "https://www.twitch.tv/downloads".to_string(),
        }
    }
}

impl AdapterConfig {
    /// Loads the config from the user's config directory, falling back to
    /// defaults when the file is absent or unreadable.
    pub fn load() -> Self {
        config_path()
            .and_then(|p| fs::read_to_string(&p).ok())
            .and_then(|c| serde_json::from_str(&c).ok())
            .unwrap_or_default()
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn hide_poll_interval(&self) -> Duration {
        Duration::from_millis(self.hide_poll_interval_ms)
    }

    pub fn hide_timeout(&self) -> Duration {
        Duration::from_millis(self.hide_timeout_ms)
    }

    /// Owned-games catalog path: explicit override, then platform default.
    pub fn owned_catalog_path(&self) -> Option<PathBuf> {
        self.owned_games_db.clone().or_else(paths::owned_games_db)
    }

    /// Installed-games catalog path: explicit override, then platform default.
    pub fn installed_catalog_path(&self) -> Option<PathBuf> {
        self.installed_games_db
            .clone()
            .or_else(paths::installed_games_db)
    }
}

/// Returns the path to the adapter's config file.
fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("twitch-adapter").join("config.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_observed_launcher_behavior() {
        let config = AdapterConfig::default();
        assert_eq!(config.settle_delay(), Duration::from_secs(3));
        assert_eq!(config.hide_poll_interval(), Duration::from_millis(100));
        assert_eq!(config.downloads_url, "https://www.twitch.tv/downloads");
    }

    #[test]
    fn partial_config_file_keeps_remaining_defaults() {
        let config: AdapterConfig =
            serde_json::from_str(r#"{"settle_delay_ms": 500}"#).expect("parse");
        assert_eq!(config.settle_delay(), Duration::from_millis(500));
        assert_eq!(config.hide_timeout_ms, 30_000);
    }

    #[test]
    fn explicit_catalog_override_wins() {
        let config = AdapterConfig {
            owned_games_db: Some(PathBuf::from("/tmp/owned.sqlite")),
            ..AdapterConfig::default()
        };
        assert_eq!(
            config.owned_catalog_path(),
            Some(PathBuf::from("/tmp/owned.sqlite"))
        );
    }
}
