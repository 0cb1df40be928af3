//! Configuration Module
//!
//! All settings come from environment variables (a `.env` file is loaded
//! first by `main`). Every value has a development default; malformed values
//! fail startup with the offending variable named.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use sqlx::postgres::{PgConnectOptions, PgSslMode};

/// Application settings
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port (default 8080)
    pub port: u16,

    /// Per-request timeout applied by the HTTP middleware
    pub request_timeout: Duration,

    /// Comma-separated CORS origins used in production
    pub allowed_origins: Vec<String>,

    pub database: DatabaseConfig,

    /// development, staging, production
    pub environment: Environment,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

/// Store connection and pool settings
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Full connection string; takes precedence over the discrete fields
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub ssl_mode: PgSslMode,

    pub max_connections: u32,
    pub min_connections: u32,
    pub max_lifetime: Duration,
    pub acquire_timeout: Duration,

    /// Upper bound on a single repository round trip
    pub statement_timeout: Duration,
}

impl Config {
    /// Load settings from the environment
    ///
    /// # Environment Variables
    ///
    /// - `ENVIRONMENT`: development | staging | production
    /// - `PORT`, `REQUEST_TIMEOUT_SECS`, `ALLOWED_ORIGINS`
    /// - `DATABASE_URL`, or `DB_HOST` / `DB_PORT` / `DB_USER` / `DB_PASSWORD` /
    ///   `DB_NAME` / `DB_SSL_MODE`
    /// - `DB_MAX_CONNECTIONS`, `DB_MIN_CONNECTIONS`, `DB_CONN_MAX_LIFETIME_SECS`,
    ///   `DB_ACQUIRE_TIMEOUT_SECS`, `DB_STATEMENT_TIMEOUT_SECS`
    pub fn from_env() -> Result<Self> {
        let environment = match env::var("ENVIRONMENT")
            .unwrap_or_else(|_| "development".to_string())
            .to_lowercase()
            .as_str()
        {
            "production" => Environment::Production,
            "staging" => Environment::Staging,
            _ => Environment::Development,
        };

        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();

        Ok(Config {
            port: parse_var("PORT", 8080)?,
            request_timeout: Duration::from_secs(parse_var("REQUEST_TIMEOUT_SECS", 60)?),
            allowed_origins,
            database: DatabaseConfig::from_env()?,
            environment,
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }
}

impl DatabaseConfig {
    pub fn from_env() -> Result<Self> {
        let ssl_mode = env::var("DB_SSL_MODE").unwrap_or_else(|_| "disable".to_string());
        let ssl_mode = parse_ssl_mode(&ssl_mode)?;

        let max_connections: u32 = parse_var("DB_MAX_CONNECTIONS", 10)?;
        let min_connections: u32 = parse_var("DB_MIN_CONNECTIONS", 2)?;
        if min_connections > max_connections {
            bail!("DB_MIN_CONNECTIONS ({min_connections}) exceeds DB_MAX_CONNECTIONS ({max_connections})");
        }

        Ok(DatabaseConfig {
            url: env::var("DATABASE_URL").ok().filter(|s| !s.is_empty()),
            host: env::var("DB_HOST").unwrap_or_else(|_| "localhost".to_string()),
            port: parse_var("DB_PORT", 5432)?,
            user: env::var("DB_USER").unwrap_or_else(|_| "postgres".to_string()),
            password: env::var("DB_PASSWORD").unwrap_or_else(|_| "postgres".to_string()),
            name: env::var("DB_NAME").unwrap_or_else(|_| "gas_wells".to_string()),
            ssl_mode,
            max_connections,
            min_connections,
            max_lifetime: Duration::from_secs(parse_var("DB_CONN_MAX_LIFETIME_SECS", 3600)?),
            acquire_timeout: Duration::from_secs(parse_var("DB_ACQUIRE_TIMEOUT_SECS", 5)?),
            statement_timeout: Duration::from_secs(parse_var("DB_STATEMENT_TIMEOUT_SECS", 5)?),
        })
    }

    /// Build driver connect options
    pub fn connect_options(&self) -> Result<PgConnectOptions> {
        let options = match &self.url {
            Some(url) => PgConnectOptions::from_str(url).context("DATABASE_URL is not a valid connection string")?,
            None => PgConnectOptions::new()
                .host(&self.host)
                .port(self.port)
                .username(&self.user)
                .password(&self.password)
                .database(&self.name)
                .ssl_mode(self.ssl_mode),
        };
        Ok(options)
    }
}

fn parse_var<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} must be a valid number (got {raw:?})")),
        _ => Ok(default),
    }
}

fn parse_ssl_mode(raw: &str) -> Result<PgSslMode> {
    let mode = match raw.to_lowercase().as_str() {
        "disable" => PgSslMode::Disable,
        "allow" => PgSslMode::Allow,
        "prefer" => PgSslMode::Prefer,
        "require" => PgSslMode::Require,
        "verify-ca" => PgSslMode::VerifyCa,
        "verify-full" => PgSslMode::VerifyFull,
        other => bail!("DB_SSL_MODE has unknown value {other:?}"),
    };
    Ok(mode)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        // nothing set in the test environment
        let config = Config::from_env().unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.database.statement_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_parse_ssl_mode() {
        assert!(matches!(parse_ssl_mode("require"), Ok(PgSslMode::Require)));
        assert!(matches!(parse_ssl_mode("Verify-Full"), Ok(PgSslMode::VerifyFull)));
        assert!(parse_ssl_mode("sometimes").is_err());
    }

    #[test]
    fn test_parse_var_rejects_garbage() {
        let value = parse_var::<u16>("GAS_WELLS_TEST_UNSET_VAR", 7).unwrap();
        assert_eq!(value, 7);

        env::set_var("GAS_WELLS_TEST_BAD_PORT", "eighty");
        let result = parse_var::<u16>("GAS_WELLS_TEST_BAD_PORT", 80);
        env::remove_var("GAS_WELLS_TEST_BAD_PORT");
        assert!(result.is_err());
    }

    #[test]
    fn test_discrete_connect_options() {
        let mut db = DatabaseConfig::from_env().unwrap();
        db.url = None;
        assert!(db.connect_options().is_ok());

        db.url = Some("not a url".to_string());
        assert!(db.connect_options().is_err());
    }
}
