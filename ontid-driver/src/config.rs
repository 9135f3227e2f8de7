use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub ledger: LedgerConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct LedgerConfig {
    /// JSON-RPC endpoint of the Ontology node queried for DDOs.
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,
    /// Ledger request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_rpc_url() -> String {
    "http://dappnode1.ont.io:20336/".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            rpc_url: default_rpc_url(),
            request_timeout: default_request_timeout(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration, then apply `ONTID_*` environment overrides.
    ///
    /// A path given explicitly (flag or `ONTID_CONFIG_PATH`) must exist.
    /// Otherwise `config.toml` is used when present, and the built-in
    /// defaults when not, so the driver runs with no configuration at all.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, AppError> {
        let explicit = config_path
            .or_else(|| std::env::var("ONTID_CONFIG_PATH").ok().map(PathBuf::from));

        let mut config = match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(AppError::Config(format!(
                        "configuration file not found: {}",
                        path.display()
                    )));
                }
                Self::parse_file(&path)?
            }
            None => {
                let path = PathBuf::from("config.toml");
                if path.exists() {
                    Self::parse_file(&path)?
                } else {
                    Self::default()
                }
            }
        };

        // Apply env var overrides
        if let Ok(host) = std::env::var("ONTID_SERVER_HOST") {
            config.server.host = host;
        }
        if let Ok(port) = std::env::var("ONTID_SERVER_PORT") {
            config.server.port = port
                .parse()
                .map_err(|e| AppError::Config(format!("invalid ONTID_SERVER_PORT: {e}")))?;
        }
        if let Ok(url) = std::env::var("ONTID_LEDGER_RPC_URL") {
            config.ledger.rpc_url = url;
        }
        if let Ok(timeout) = std::env::var("ONTID_LEDGER_TIMEOUT") {
            config.ledger.request_timeout = timeout
                .parse()
                .map_err(|e| AppError::Config(format!("invalid ONTID_LEDGER_TIMEOUT: {e}")))?;
        }
        if let Ok(level) = std::env::var("ONTID_LOG_LEVEL") {
            config.log.level = level;
        }
        if let Ok(format) = std::env::var("ONTID_LOG_FORMAT") {
            config.log.format = match format.to_lowercase().as_str() {
                "json" => LogFormat::Json,
                "text" => LogFormat::Text,
                other => {
                    return Err(AppError::Config(format!(
                        "invalid ONTID_LOG_FORMAT '{other}', expected 'text' or 'json'"
                    )));
                }
            };
        }

        Ok(config)
    }

    fn parse_file(path: &std::path::Path) -> Result<Self, AppError> {
        let contents = std::fs::read_to_string(path).map_err(AppError::Io)?;
        toml::from_str::<AppConfig>(&contents)
            .map_err(|e| AppError::Config(format!("failed to parse {}: {e}", path.display())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_every_section() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.ledger.rpc_url, "http://dappnode1.ont.io:20336/");
        assert_eq!(config.ledger.request_timeout, 30);
        assert_eq!(config.log.level, "info");
        assert_eq!(config.log.format, LogFormat::Text);
    }

    #[test]
    fn partial_file_keeps_defaults_elsewhere() {
        let config: AppConfig = toml::from_str(
            r#"
            [ledger]
            rpc_url = "http://polaris1.ont.io:20336/"

            [log]
            format = "json"
            "#,
        )
        .unwrap();
        assert_eq!(config.ledger.rpc_url, "http://polaris1.ont.io:20336/");
        assert_eq!(config.ledger.request_timeout, 30);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.log.format, LogFormat::Json);
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn missing_explicit_path_is_an_error() {
        let result = AppConfig::load(Some(PathBuf::from("/definitely/not/here.toml")));
        assert!(matches!(result, Err(AppError::Config(_))));
    }
}
