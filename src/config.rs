use std::env;

use crate::errors::{AppError, Result};

const INSECURE_JWT_SECRET: &str = "default-insecure-key-change-this";

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// `production` makes `JWT_SECRET` mandatory.
    pub app_env: String,
    pub server_host: String,
    pub server_port: u16,
    pub database_url: String,
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
    /// Create missing tables from the entity definitions on startup.
    pub sync_schema: bool,
    pub seed_db: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get_or = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

        let server_host = get_or("SERVER_HOST", "127.0.0.1");
        let server_port = get_or("SERVER_PORT", "8080")
            .parse::<u16>()
            .map_err(|e| AppError::Config(format!("Invalid SERVER_PORT: {}", e)))?;

        let database_url = lookup("DATABASE_URL")
            .ok_or_else(|| AppError::Config("DATABASE_URL must be set".to_string()))?;

        let app_env = get_or("APP_ENV", "development").trim().to_ascii_lowercase();

        let jwt_secret = match lookup("JWT_SECRET") {
            Some(secret) if !secret.is_empty() => secret,
            _ if app_env == "production" => {
                return Err(AppError::Config("JWT_SECRET must be set in production".to_string()));
            }
            _ => {
                tracing::warn!("JWT_SECRET not set, using an insecure default");
                INSECURE_JWT_SECRET.to_string()
            }
        };

        let token_ttl_hours = get_or("TOKEN_TTL_HOURS", "24")
            .parse::<i64>()
            .ok()
            .filter(|hours| *hours > 0)
            .ok_or_else(|| AppError::Config("TOKEN_TTL_HOURS must be a positive integer".to_string()))?;

        let sync_schema = parse_flag("SYNC_SCHEMA", &get_or("SYNC_SCHEMA", "true"))?;
        let seed_db = parse_flag("SEED_DB", &get_or("SEED_DB", "false"))?;

        Ok(Self {
            app_env,
            server_host,
            server_port,
            database_url,
            jwt_secret,
            token_ttl_hours,
            sync_schema,
            seed_db,
        })
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.server_host.clone(), self.server_port)
    }
}

fn parse_flag(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(AppError::Config(format!("Invalid {} value: {}", name, other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[("DATABASE_URL", "postgres://localhost/payments")]).unwrap();

        assert_eq!(config.bind_address(), ("127.0.0.1".to_string(), 8080));
        assert_eq!(config.app_env, "development");
        assert_eq!(config.token_ttl_hours, 24);
        assert_eq!(config.jwt_secret, INSECURE_JWT_SECRET);
        assert!(config.sync_schema);
        assert!(!config.seed_db);
    }

    #[test]
    fn test_missing_database_url() {
        assert!(matches!(config_from(&[]), Err(AppError::Config(_))));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let base = ("DATABASE_URL", "postgres://localhost/payments");
        assert!(config_from(&[base, ("SERVER_PORT", "eighty")]).is_err());
        assert!(config_from(&[base, ("TOKEN_TTL_HOURS", "0")]).is_err());
        assert!(config_from(&[base, ("SEED_DB", "maybe")]).is_err());

        let config = config_from(&[base, ("SEED_DB", "TRUE"), ("JWT_SECRET", "s3cret")]).unwrap();
        assert!(config.seed_db);
        assert_eq!(config.jwt_secret, "s3cret");
    }

    #[test]
    fn test_production_requires_jwt_secret() {
        let base = ("DATABASE_URL", "postgres://localhost/payments");

        let err = config_from(&[base, ("APP_ENV", "Production")]).unwrap_err();
        assert!(matches!(err, AppError::Config(message) if message.contains("JWT_SECRET")));
        assert!(config_from(&[base, ("APP_ENV", "production"), ("JWT_SECRET", "")]).is_err());

        let config = config_from(&[base, ("APP_ENV", "production"), ("JWT_SECRET", "s3cret")]).unwrap();
        assert_eq!(config.app_env, "production");
        assert_eq!(config.jwt_secret, "s3cret");
    }
}
