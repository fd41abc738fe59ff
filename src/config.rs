use crate::error::{ClientError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_CONFIG_PATH: &str = "client_config.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    /// ロビー待ちのポーリング間隔
    pub lobby_poll_ms: u64,
    /// 手番待ちのポーリング間隔
    pub turn_poll_ms: u64,
    pub win_check_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            base_url: "http://localhost:7861".to_string(),
            lobby_poll_ms: 1000,
            turn_poll_ms: 200,
            win_check_ms: 1000,
        }
    }
}

impl ClientConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config_str = std::fs::read_to_string(path)
            .map_err(|e| ClientError::Config(format!("{}: {}", path.display(), e)))?;
        let config: ClientConfig = serde_json::from_str(&config_str)
            .map_err(|e| ClientError::Config(format!("{}: {}", path.display(), e)))?;
        Ok(config)
    }

    /// ファイルが無ければデフォルト。壊れていればエラー
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn lobby_poll_interval(&self) -> Duration {
        Duration::from_millis(self.lobby_poll_ms)
    }

    pub fn turn_poll_interval(&self) -> Duration {
        Duration::from_millis(self.turn_poll_ms)
    }

    pub fn win_check_interval(&self) -> Duration {
        Duration::from_millis(self.win_check_ms)
    }
}
