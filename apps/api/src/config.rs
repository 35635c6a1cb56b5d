use anyhow::{Context, Result};

use crate::models::tenant::TenantId;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub rust_log: String,
    /// Tenant served by the un-namespaced `/api/bills` and `/api/income` routes.
    pub default_tenant: TenantId,
    pub db_max_connections: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let default_tenant = optional_env("DEFAULT_TENANT", "default");

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            port: optional_env("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: optional_env("RUST_LOG", "info"),
            default_tenant: TenantId::new(default_tenant.clone()).with_context(|| {
                format!("DEFAULT_TENANT '{default_tenant}' is not a valid tenant slug")
            })?,
            db_max_connections: optional_env("DB_MAX_CONNECTIONS", "10")
                .parse::<u32>()
                .context("DB_MAX_CONNECTIONS must be a positive integer")?,
        })
    }

    #[cfg(test)]
    pub fn for_tests() -> Self {
        Config {
            database_url: "postgres://localhost/liveplus_test".to_string(),
            port: 0,
            rust_log: "debug".to_string(),
            default_tenant: TenantId::new("default").expect("static slug"),
            db_max_connections: 1,
        }
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
