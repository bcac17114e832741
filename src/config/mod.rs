use std::env;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use crate::efiling::DEFAULT_MAX_UPLOAD_BYTES;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_LOG_LEVEL: &str = "info";

/// Deployment stage, read from `APP_ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl From<&str> for AppEnvironment {
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Everything the wizard service and CLI read from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub registry: RegistryConfig,
    pub efiling: EfilingConfig,
}

impl AppConfig {
    /// Reads `.env` when present, then the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            environment: var("APP_ENV")
                .as_deref()
                .map(AppEnvironment::from)
                .unwrap_or(AppEnvironment::Development),
            server: ServerConfig::from_env()?,
            telemetry: TelemetryConfig {
                log_level: var("APP_LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            },
            registry: RegistryConfig {
                locations_csv: var("FLA_LOCATIONS_CSV").map(PathBuf::from),
            },
            efiling: EfilingConfig::from_env()?,
        })
    }
}

/// A set, non-blank variable.
fn var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let port = match var("APP_PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort { value: raw })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            host: var("APP_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
        })
    }

    /// `localhost` maps to the IPv4 loopback; anything else must be a
    /// literal address.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip = if self.host.eq_ignore_ascii_case("localhost") {
            IpAddr::V4(Ipv4Addr::LOCALHOST)
        } else {
            self.host
                .parse()
                .map_err(|source| ConfigError::InvalidHost {
                    value: self.host.clone(),
                    source,
                })?
        };

        Ok(SocketAddr::new(ip, self.port))
    }
}

#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// An `EnvFilter` directive list; `RUST_LOG` overrides it.
    pub log_level: String,
}

/// Where court locations are read from. `None` selects the built-in directory.
#[derive(Debug, Clone, Default)]
pub struct RegistryConfig {
    pub locations_csv: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct EfilingConfig {
    pub max_upload_bytes: u64,
}

impl EfilingConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let max_upload_bytes = match var("FLA_MAX_UPLOAD_BYTES") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(limit) if limit > 0 => limit,
                _ => return Err(ConfigError::InvalidUploadLimit { value: raw }),
            },
            None => DEFAULT_MAX_UPLOAD_BYTES,
        };
        Ok(Self { max_upload_bytes })
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort {
        value: String,
    },
    InvalidHost {
        value: String,
        source: std::net::AddrParseError,
    },
    InvalidUploadLimit {
        value: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort { value } => {
                write!(f, "APP_PORT '{value}' is not a port number")
            }
            ConfigError::InvalidHost { value, .. } => {
                write!(f, "APP_HOST '{value}' is neither localhost nor an IP address")
            }
            ConfigError::InvalidUploadLimit { value } => write!(
                f,
                "FLA_MAX_UPLOAD_BYTES '{value}' is not a positive byte count"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source, .. } => Some(source),
            ConfigError::InvalidPort { .. } | ConfigError::InvalidUploadLimit { .. } => None,
        }
    }
}
