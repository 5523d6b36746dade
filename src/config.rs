use std::env;
use std::path::PathBuf;

use anyhow::Context;
use axum::http::HeaderName;

/// Where the owner identity of a request comes from.
#[derive(Debug, Clone)]
pub struct IdentityConfig {
    /// Header carrying the subject claim of the authenticated caller.
    pub header: HeaderName,
    /// Owner used when the header is absent. Development only.
    pub default_owner: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub db_max_connections: u32,
    pub host: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
    pub identity: IdentityConfig,
    pub static_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build a config from any variable source; unset keys use defaults.
    pub fn from_vars<F>(var: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let owner_header = var("OWNER_HEADER").unwrap_or_else(|| "x-user-sub".into());

        let allowed_origins: Vec<String> = var("ALLOWED_ORIGINS")
            .unwrap_or_else(|| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        // Credentialed CORS cannot use a wildcard origin.
        if allowed_origins.iter().any(|origin| origin == "*") {
            anyhow::bail!("ALLOWED_ORIGINS must list explicit origins, `*` is not allowed");
        }

        Ok(Self {
            database_url: var("DATABASE_URL")
                .unwrap_or_else(|| "sqlite:data/merit-journal.db".into()),
            db_max_connections: var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|| "5".into())
                .parse()
                .context("DB_MAX_CONNECTIONS must be a number")?,
            host: var("HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port: var("PORT")
                .unwrap_or_else(|| "3000".into())
                .parse()
                .context("PORT must be a number")?,
            allowed_origins,
            identity: IdentityConfig {
                header: HeaderName::try_from(owner_header.as_str())
                    .with_context(|| format!("OWNER_HEADER `{owner_header}` is not a valid header name"))?,
                default_owner: var("DEFAULT_OWNER_ID").filter(|s| !s.trim().is_empty()),
            },
            static_dir: var("STATIC_DIR").unwrap_or_else(|| "static".into()).into(),
        })
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
