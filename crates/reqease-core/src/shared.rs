//! Shared configuration for the Req-Ease crates.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Global application configuration. Load from TOML or env.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoreConfig {
    /// Application identity shown by consumers.
    pub app_name: String,
    /// Base directory for the sled database backing the knowledge store.
    pub storage_path: String,
    /// How many entries recent listings show by default.
    pub recent_limit: usize,
}

impl CoreConfig {
    /// Directory of the knowledge database, derived from `storage_path`.
    pub fn kb_path(&self) -> PathBuf {
        Path::new(&self.storage_path).join("reqease_kb")
    }

    /// Load config from file and environment. Precedence: env `REQEASE_CONFIG`
    /// path > `config/console.toml` > defaults.
    pub fn load() -> Result<Self, config::ConfigError> {
        let config_path =
            std::env::var("REQEASE_CONFIG").unwrap_or_else(|_| "config/console".to_string());
        let builder = config::Config::builder()
            .set_default("app_name", "Req-Ease")?
            .set_default("storage_path", "./data")?
            .set_default("recent_limit", 5_i64)?;

        let path = Path::new(&config_path);
        let builder = if path.exists() {
            builder.add_source(config::File::from(path))
        } else {
            builder
        };

        builder
            .add_source(config::Environment::with_prefix("REQEASE").separator("__"))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_a_config_file() {
        let config = CoreConfig::load().unwrap();
        assert_eq!(config.app_name, "Req-Ease");
        assert_eq!(config.recent_limit, 5);
        assert_eq!(config.kb_path(), PathBuf::from("./data").join("reqease_kb"));
    }
}
