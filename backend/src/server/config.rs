//! Application settings and the derived server configuration.
//!
//! [`AppSettings`] is loaded by OrthoConfig from CLI flags, `DEVHUNT_*`
//! environment variables and configuration files. [`ServerConfig`] is what
//! the server factory consumes once the session key and pool are resolved.

use std::net::SocketAddr;
use std::path::PathBuf;

use actix_web::cookie::{Key, SameSite};
use ortho_config::OrthoConfig;
use serde::Deserialize;

#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetrics;

use devhunt::outbound::persistence::DbPool;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_SESSION_KEY_FILE: &str = "/var/run/secrets/session_key";

/// Settings read at startup.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "DEVHUNT")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL. Without it every entity is served by the fallback store.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
    /// File holding the session signing key material.
    pub session_key_file: Option<PathBuf>,
    /// Accept a generated session key when the key file is unusable.
    #[ortho_config(default = false)]
    pub session_allow_ephemeral: bool,
    /// Mark the session cookie `Secure`.
    pub cookie_secure: Option<bool>,
    /// Serve votes and comments for slugs with no persisted row.
    pub fallback_enabled: Option<bool>,
    /// Apply embedded migrations before serving.
    pub run_migrations: Option<bool>,
    /// Expose Prometheus metrics at `/metrics` (requires the `metrics` feature).
    pub metrics_enabled: Option<bool>,
    /// Accept the built-in demo accounts at `/api/v1/login`.
    pub demo_login_enabled: Option<bool>,
}

/// Invalid setting values.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address {value:?}: {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
}

impl AppSettings {
    /// Parsed listen address, defaulting to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|source| SettingsError::BindAddr {
            value: raw.to_owned(),
            source,
        })
    }

    /// Database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
            .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
    }

    pub fn session_key_file(&self) -> PathBuf {
        self.session_key_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_KEY_FILE))
    }

    /// Ephemeral keys are always allowed in debug builds.
    pub fn allow_ephemeral_key(&self) -> bool {
        cfg!(debug_assertions) || self.session_allow_ephemeral
    }

    pub fn cookie_secure(&self) -> bool {
        self.cookie_secure.unwrap_or(true)
    }

    pub fn fallback_enabled(&self) -> bool {
        self.fallback_enabled.unwrap_or(true)
    }

    pub fn run_migrations(&self) -> bool {
        self.run_migrations.unwrap_or(true)
    }

    /// Demo accounts are accepted by default in debug builds only.
    pub fn demo_login_enabled(&self) -> bool {
        self.demo_login_enabled.unwrap_or(cfg!(debug_assertions))
    }

    #[cfg_attr(
        not(any(test, feature = "metrics")),
        expect(dead_code, reason = "read only when the metrics feature is enabled")
    )]
    pub fn metrics_enabled(&self) -> bool {
        self.metrics_enabled.unwrap_or(true)
    }
}

/// Resolved configuration for [`super::create_server`].
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) fallback_enabled: bool,
    pub(crate) demo_login_enabled: bool,
    #[cfg(feature = "metrics")]
    pub(crate) prometheus: Option<PrometheusMetrics>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            same_site: SameSite::Lax,
            bind_addr,
            db_pool: None,
            fallback_enabled: true,
            demo_login_enabled: cfg!(debug_assertions),
            #[cfg(feature = "metrics")]
            prometheus: None,
        }
    }

    /// Back repositories with PostgreSQL instead of fixtures.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    #[must_use]
    pub fn with_fallback(mut self, enabled: bool) -> Self {
        self.fallback_enabled = enabled;
        self
    }

    #[must_use]
    pub fn with_demo_login(mut self, enabled: bool) -> Self {
        self.demo_login_enabled = enabled;
        self
    }

    #[cfg(feature = "metrics")]
    #[must_use]
    pub fn with_metrics(mut self, prometheus: Option<PrometheusMetrics>) -> Self {
        self.prometheus = prometheus;
        self
    }
}
