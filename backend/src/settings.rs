//! Application settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `UNBOTHERED_*` environment variables, and
//! configuration files. Every key is optional; accessors apply defaults.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::outbound::ollama::OllamaSettings;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
pub const DEFAULT_GENERATION_ENDPOINT: &str = "http://localhost:11434";
pub const DEFAULT_GENERATION_TIMEOUT_SECS: u64 = 60;

/// A configured value could not be interpreted.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address `{value}`: {source}")]
    BindAddr {
        value: String,
        source: std::net::AddrParseError,
    },
    #[error("invalid generation endpoint `{value}`: {source}")]
    GenerationEndpoint {
        value: String,
        source: url::ParseError,
    },
    #[error("generation timeout must be at least one second")]
    ZeroGenerationTimeout,
}

/// Runtime configuration for the journal backend.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "UNBOTHERED")]
pub struct AppSettings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection string. Entries are kept in memory when unset.
    pub database_url: Option<String>,
    pub db_max_connections: Option<u32>,
    /// Base URL of the Ollama server.
    pub generation_endpoint: Option<String>,
    pub generation_model: Option<String>,
    pub generation_temperature: Option<f32>,
    pub generation_max_tokens: Option<u32>,
    /// Upper bound on a single generation call, in seconds.
    pub generation_timeout_secs: Option<u64>,
}

impl AppSettings {
    /// Parsed bind address, falling back to `0.0.0.0:3000`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::BindAddr`] when the value is not a socket
    /// address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections.unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
    }

    /// Generation deadline, falling back to 60 seconds.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::ZeroGenerationTimeout`] for `0`, which would
    /// fail every generation call.
    pub fn generation_timeout(&self) -> Result<Duration, SettingsError> {
        match self
            .generation_timeout_secs
            .unwrap_or(DEFAULT_GENERATION_TIMEOUT_SECS)
        {
            0 => Err(SettingsError::ZeroGenerationTimeout),
            secs => Ok(Duration::from_secs(secs)),
        }
    }

    /// Ollama adapter settings derived from the `generation_*` keys.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::GenerationEndpoint`] when the endpoint is not
    /// an absolute URL, or [`SettingsError::ZeroGenerationTimeout`].
    pub fn ollama(&self) -> Result<OllamaSettings, SettingsError> {
        let value = self
            .generation_endpoint
            .as_deref()
            .unwrap_or(DEFAULT_GENERATION_ENDPOINT);
        let endpoint = Url::parse(value).map_err(|source| SettingsError::GenerationEndpoint {
            value: value.to_owned(),
            source,
        })?;

        let mut ollama = OllamaSettings::new(endpoint);
        if let Some(model) = &self.generation_model {
            ollama.model = model.clone();
        }
        if let Some(temperature) = self.generation_temperature {
            ollama.temperature = temperature;
        }
        if let Some(max_tokens) = self.generation_max_tokens {
            ollama.max_tokens = max_tokens;
        }
        ollama.request_timeout = self.generation_timeout()?;
        Ok(ollama)
    }
}
