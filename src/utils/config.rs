use crate::auth::password::HashCost;
use anyhow::{bail, Context};
use std::env;

/// Process configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub auth_token: Option<String>,
    /// Exit at startup instead of serving 503s when the store can't be opened
    pub required: bool,
}

#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub hash_cost: HashCost,
}

// Keeps credentials out of `{:?}` output.
impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &self.url)
            .field("auth_token", &self.auth_token.as_ref().map(|_| "<redacted>"))
            .field("required", &self.required)
            .finish()
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"<redacted>")
            .field("hash_cost", &self.hash_cost)
            .finish()
    }
}

impl Config {
    /// Loads `.env` if present, then reads the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let jwt_secret = lookup("JWT_SECRET")
            .filter(|s| !s.is_empty())
            .context("JWT_SECRET environment variable required")?;

        if jwt_secret.len() < 32 {
            tracing::warn!("JWT_SECRET is shorter than 32 characters");
        }

        let defaults = HashCost::default();

        Ok(Config {
            server: ServerConfig {
                host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
                port: parse_or(&lookup, "PORT", 3000)?,
            },
            database: DatabaseConfig {
                url: lookup("DATABASE_URL").unwrap_or_else(|| "students.db".to_string()),
                auth_token: lookup("DATABASE_AUTH_TOKEN").filter(|t| !t.is_empty()),
                required: parse_bool(&lookup, "REQUIRE_DATABASE")?,
            },
            auth: AuthConfig {
                jwt_secret,
                hash_cost: HashCost {
                    memory_kib: parse_or(&lookup, "PASSWORD_HASH_MEMORY_KIB", defaults.memory_kib)?,
                    iterations: parse_or(&lookup, "PASSWORD_HASH_ITERATIONS", defaults.iterations)?,
                    parallelism: parse_or(
                        &lookup,
                        "PASSWORD_HASH_PARALLELISM",
                        defaults.parallelism,
                    )?,
                },
            },
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} has an invalid value: {:?}", key, raw)),
        None => Ok(default),
    }
}

fn parse_bool<F>(lookup: &F, key: &str) -> anyhow::Result<bool>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key).map(|v| v.trim().to_ascii_lowercase()) {
        None => Ok(false),
        Some(v) => match v.as_str() {
            "" | "0" | "false" | "no" | "off" => Ok(false),
            "1" | "true" | "yes" | "on" => Ok(true),
            other => bail!("{} must be a boolean, got {:?}", key, other),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[("JWT_SECRET", "a-secret-that-is-at-least-32-chars")])
            .expect("secret alone is enough");

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.database.url, "students.db");
        assert!(config.database.auth_token.is_none());
        assert!(!config.database.required);
        assert_eq!(config.auth.hash_cost, HashCost::default());
        assert_eq!(config.bind_address(), "127.0.0.1:3000");
    }

    #[test]
    fn test_missing_secret_fails() {
        let err = config_from(&[("PORT", "8080")]).unwrap_err();

        assert!(err.to_string().contains("JWT_SECRET"));
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("JWT_SECRET", "a-secret-that-is-at-least-32-chars"),
            ("HOST", "0.0.0.0"),
            ("PORT", "8080"),
            ("DATABASE_URL", "libsql://school.turso.io"),
            ("DATABASE_AUTH_TOKEN", "tok"),
            ("REQUIRE_DATABASE", "true"),
            ("PASSWORD_HASH_ITERATIONS", "3"),
        ])
        .expect("valid config");

        assert_eq!(config.bind_address(), "0.0.0.0:8080");
        assert_eq!(config.database.url, "libsql://school.turso.io");
        assert_eq!(config.database.auth_token.as_deref(), Some("tok"));
        assert!(config.database.required);
        assert_eq!(config.auth.hash_cost.iterations, 3);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let secret = ("JWT_SECRET", "a-secret-that-is-at-least-32-chars");

        assert!(config_from(&[secret, ("PORT", "not-a-port")]).is_err());
        assert!(config_from(&[secret, ("REQUIRE_DATABASE", "maybe")]).is_err());
        assert!(config_from(&[secret, ("PASSWORD_HASH_MEMORY_KIB", "-1")]).is_err());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = config_from(&[
            ("JWT_SECRET", "super-secret-value-do-not-print!!"),
            ("DATABASE_AUTH_TOKEN", "turso-token-value"),
        ])
        .expect("valid config");

        let printed = format!("{:?}", config);

        assert!(!printed.contains("super-secret"));
        assert!(!printed.contains("turso-token-value"));
        assert!(printed.contains("<redacted>"));
    }
}
