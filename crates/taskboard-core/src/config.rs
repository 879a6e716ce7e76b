use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Delays used by the board engine and the simulated remote gateway.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TimingConfig {
    /// How long the drag overlay survives after a gesture ends.
    pub settle_delay_ms: u64,
    pub columns_latency_ms: u64,
    pub tasks_latency_ms: u64,
    pub users_latency_ms: u64,
    pub update_latency_ms: u64,
    pub create_latency_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            settle_delay_ms: 100,
            columns_latency_ms: 3000,
            tasks_latency_ms: 3000,
            users_latency_ms: 500,
            update_latency_ms: 100,
            create_latency_ms: 500,
        }
    }
}

impl TimingConfig {
    /// Timing with every gateway latency removed. The settle delay is kept.
    pub fn instant() -> Self {
        Self {
            columns_latency_ms: 0,
            tasks_latency_ms: 0,
            users_latency_ms: 0,
            update_latency_ms: 0,
            create_latency_ms: 0,
            ..Self::default()
        }
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn columns_latency(&self) -> Duration {
        Duration::from_millis(self.columns_latency_ms)
    }

    pub fn tasks_latency(&self) -> Duration {
        Duration::from_millis(self.tasks_latency_ms)
    }

    pub fn users_latency(&self) -> Duration {
        Duration::from_millis(self.users_latency_ms)
    }

    pub fn update_latency(&self) -> Duration {
        Duration::from_millis(self.update_latency_ms)
    }

    pub fn create_latency(&self) -> Duration {
        Duration::from_millis(self.create_latency_ms)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    #[serde(default)]
    pub timing: TimingConfig,
}

impl AppConfig {
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            dirs::home_dir().map(|home| home.join(".config/taskboard/config.toml"))
        }
        #[cfg(target_os = "linux")]
        {
            dirs::config_dir().map(|config| config.join("taskboard/config.toml"))
        }
        #[cfg(target_os = "windows")]
        {
            dirs::config_dir().map(|config| config.join("taskboard\\config.toml"))
        }
        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        {
            None
        }
    }

    pub fn load() -> Self {
        if let Some(config_path) = Self::config_path() {
            if config_path.exists() {
                if let Ok(content) = std::fs::read_to_string(&config_path) {
                    return Self::from_toml_str(&content);
                }
            }
        }
        Self::default()
    }

    /// Parse a config document, falling back to defaults when it is malformed.
    pub fn from_toml_str(content: &str) -> Self {
        match toml::from_str(content) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Ignoring malformed config: {}", e);
                Self::default()
            }
        }
    }

    /// Directory holding the persisted board keys.
    pub fn effective_data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .or_else(|| dirs::data_dir().map(|dir| dir.join("taskboard")))
            .unwrap_or_else(|| PathBuf::from(".taskboard"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timing_matches_gateway_latencies() {
        let timing = TimingConfig::default();
        assert_eq!(timing.settle_delay(), Duration::from_millis(100));
        assert_eq!(timing.tasks_latency(), Duration::from_secs(3));
        assert_eq!(timing.update_latency(), Duration::from_millis(100));
    }

    #[test]
    fn test_instant_timing_keeps_settle_delay() {
        let timing = TimingConfig::instant();
        assert_eq!(timing.columns_latency(), Duration::ZERO);
        assert_eq!(timing.create_latency(), Duration::ZERO);
        assert_eq!(timing.settle_delay_ms, 100);
    }

    #[test]
    fn test_partial_timing_table() {
        let config = AppConfig::from_toml_str(
            r#"
            data_dir = "/tmp/board"

            [timing]
            settle_delay_ms = 20
            "#,
        );
        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/board")));
        assert_eq!(config.timing.settle_delay_ms, 20);
        assert_eq!(config.timing.tasks_latency_ms, 3000);
    }

    #[test]
    fn test_malformed_config_falls_back_to_default() {
        let config = AppConfig::from_toml_str("timing = 12");
        assert!(config.data_dir.is_none());
        assert_eq!(config.timing, TimingConfig::default());
    }

    #[test]
    fn test_explicit_data_dir_wins() {
        let config = AppConfig {
            data_dir: Some(PathBuf::from("board-data")),
            ..Default::default()
        };
        assert_eq!(config.effective_data_dir(), PathBuf::from("board-data"));
    }
}
