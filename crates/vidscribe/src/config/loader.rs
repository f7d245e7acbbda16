use std::path::Path;

use crate::config::schema::Config;
use crate::error::ConfigError;

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    load_config_from_str(&content)
}

pub fn load_config_from_str(content: &str) -> Result<Config, ConfigError> {
    let config: Config = serde_json::from_str(content)?;

    validate_config(&config)?;

    Ok(config)
}

/// Loads the config file when it exists, built-in defaults otherwise.
pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    if path.exists() {
        load_config(path)
    } else {
        log::info!("Config file {} not found, using defaults", path.display());
        Ok(Config::default())
    }
}

fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::Validation {
            message: "server.port must be non-zero".to_string(),
        });
    }

    if config.worker.poll_interval_secs == 0 {
        return Err(ConfigError::Validation {
            message: "worker.poll_interval_secs must be at least 1".to_string(),
        });
    }

    if let Some(ref url) = config.dispatch.webhook_url {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ConfigError::Validation {
                message: format!("dispatch.webhook_url must be an HTTP(S) URL, got '{}'", url),
            });
        }
    }

    Ok(())
}
