use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct UploadConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub storage: StorageConfig,
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory that receives uploaded files, created at startup if missing.
    pub upload_dir: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObservabilityConfig {
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
}

impl UploadConfig {
    pub fn load() -> Result<Self, AppError> {
        // Load common config (handles .env and APP__ prefix)
        let common_config = core_config::Config::load()?;

        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        Ok(UploadConfig {
            common: common_config,
            storage: StorageConfig {
                upload_dir: get_env("UPLOAD_DIR", Some("uploads"), is_prod)?,
            },
            observability: ObservabilityConfig {
                log_level: get_env("LOG_LEVEL", Some("info"), false)?,
                otlp_endpoint: env::var("OTLP_ENDPOINT").ok().filter(|v| !v.is_empty()),
            },
        })
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_env_falls_back_to_default_outside_production() {
        let value = get_env("UPLOAD_SERVICE_TEST_UNSET_KEY", Some("uploads"), false).unwrap();
        assert_eq!(value, "uploads");
    }

    #[test]
    fn get_env_requires_value_in_production() {
        let err = get_env("UPLOAD_SERVICE_TEST_UNSET_KEY", Some("uploads"), true).unwrap_err();
        assert!(matches!(err, AppError::ConfigError(_)));
        assert!(err.to_string().contains("UPLOAD_SERVICE_TEST_UNSET_KEY"));
    }

    #[test]
    fn get_env_without_default_is_an_error() {
        let err = get_env("UPLOAD_SERVICE_TEST_UNSET_KEY", None, false).unwrap_err();
        assert!(err.to_string().contains("is required but not set"));
    }
}
