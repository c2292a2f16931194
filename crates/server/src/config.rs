use std::{
    net::{AddrParseError, SocketAddr},
    num::ParseIntError,
    time::Duration,
};
use thiserror::Error;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_ANALYSIS_RETENTION_SECS: u64 = 60 * 60;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable {0}")]
    Missing(&'static str),

    #[error("Invalid BIND_ADDR {value}: {source}")]
    InvalidBindAddr {
        value: String,
        source: AddrParseError,
    },

    #[error("Invalid ANALYSIS_RETENTION_SECS {value}: {source}")]
    InvalidRetention {
        value: String,
        source: ParseIntError,
    },
}

/// Runtime settings, read from the environment (and `.env` when present)
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub oidc_issuer_url: String,
    pub bind_addr: SocketAddr,
    /// Analyzer endpoint. Without it every analysis uses the fallback result
    pub analyzer_url: Option<String>,
    /// How long a finished analysis stays readable
    pub analysis_retention: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|value| !value.is_empty())
                .ok_or(ConfigError::Missing(key))
        };

        let raw_addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr: SocketAddr =
            raw_addr
                .parse()
                .map_err(|source| ConfigError::InvalidBindAddr {
                    value: raw_addr.clone(),
                    source,
                })?;

        let analysis_retention = match lookup("ANALYSIS_RETENTION_SECS") {
            Some(value) => value
                .parse()
                .map(Duration::from_secs)
                .map_err(|source| ConfigError::InvalidRetention { value, source })?,
            None => Duration::from_secs(DEFAULT_ANALYSIS_RETENTION_SECS),
        };

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            oidc_issuer_url: required("OIDC_ISSUER_URL")?,
            bind_addr,
            analyzer_url: lookup("ANALYZER_URL").filter(|value| !value.is_empty()),
            analysis_retention,
        })
    }
}
