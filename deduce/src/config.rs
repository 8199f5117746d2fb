//! Service configuration, read from TOML.
//!
//! ```toml
//! [server]
//! bind_addr = "127.0.0.1:8830"
//!
//! [snapshot]
//! path = "deduce-sessions.json"
//! interval_secs = 30
//! ```
//!
//! Every key is optional; missing keys take the defaults below.

use crate::error::{DeduceError, DeduceResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DeduceConfig {
    pub server: ServerConfig,
    pub snapshot: SnapshotConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8830".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotConfig {
    pub path: PathBuf,
    pub interval_secs: u64,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("deduce-sessions.json"),
            interval_secs: 30,
        }
    }
}

impl SnapshotConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

impl DeduceConfig {
    pub fn from_toml(content: &str) -> DeduceResult<Self> {
        let config: DeduceConfig =
            toml::from_str(content).map_err(|e| DeduceError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> DeduceResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| DeduceError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml(&content)
    }

    pub fn validate(&self) -> DeduceResult<()> {
        if self.snapshot.interval_secs == 0 {
            return Err(DeduceError::Config(
                "snapshot.interval_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
