//! Configuration module
//!
//! Environment-driven configuration for the API server: database, JWT,
//! CORS, receipt storage, and optional SMTP notification settings.

use std::env;

const DEFAULT_PORT: u16 = 5000;
const MAX_CONNECTIONS: u32 = 10;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const JWT_EXPIRY_HOURS: i64 = 1;
const MAX_RECEIPT_SIZE_MB: usize = 10;

/// SMTP settings for admin notification emails. Absent when the
/// deployment has no mail credentials; notification endpoints then fail
/// with a server error, mirroring the rest of the system's behavior.
#[derive(Clone, Debug)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub from: String,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub database_url: String,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    pub jwt_secret: String,
    pub jwt_expiry_hours: i64,
    pub cors_origins: Vec<String>,
    pub environment: String,
    /// Root directory for uploaded files; receipts land under
    /// `<uploads_dir>/gcash_receipts` and are served at `/uploads`.
    pub uploads_dir: String,
    pub max_receipt_size_bytes: usize,
    pub smtp: Option<SmtpConfig>,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins_str = env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());
        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .collect();

        let smtp = match (env::var("SMTP_HOST").ok(), env::var("SMTP_FROM").ok()) {
            (Some(host), Some(from)) if !host.is_empty() && !from.is_empty() => Some(SmtpConfig {
                host,
                port: env::var("SMTP_PORT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(587),
                user: env::var("SMTP_USER").unwrap_or_default(),
                password: env::var("SMTP_PASSWORD").unwrap_or_default(),
                from,
            }),
            _ => None,
        };

        let config = Config {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            database_url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?,
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| MAX_CONNECTIONS.to_string())
                .parse()
                .unwrap_or(MAX_CONNECTIONS),
            db_timeout_seconds: env::var("DB_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| CONNECTION_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(CONNECTION_TIMEOUT_SECS),
            jwt_secret: env::var("JWT_SECRET")
                .map_err(|_| anyhow::anyhow!("JWT_SECRET must be set for authentication"))?,
            jwt_expiry_hours: env::var("JWT_EXPIRY_HOURS")
                .unwrap_or_else(|_| JWT_EXPIRY_HOURS.to_string())
                .parse()
                .unwrap_or(JWT_EXPIRY_HOURS),
            cors_origins,
            environment,
            uploads_dir: env::var("UPLOADS_DIR").unwrap_or_else(|_| "uploads".to_string()),
            max_receipt_size_bytes: env::var("MAX_RECEIPT_SIZE_MB")
                .unwrap_or_else(|_| MAX_RECEIPT_SIZE_MB.to_string())
                .parse::<usize>()
                .unwrap_or(MAX_RECEIPT_SIZE_MB)
                * 1024
                * 1024,
            smtp,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.jwt_secret.len() < 32 {
            return Err(anyhow::anyhow!(
                "JWT_SECRET must be at least 32 characters long"
            ));
        }

        if !self.database_url.starts_with("postgresql://")
            && !self.database_url.starts_with("postgres://")
        {
            return Err(anyhow::anyhow!(
                "DATABASE_URL must be a valid PostgreSQL connection string"
            ));
        }

        if self.is_production() && self.cors_origins.iter().any(|o| o == "*") {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config {
            server_port: 5000,
            database_url: "postgresql://localhost/lodgera".to_string(),
            db_max_connections: 10,
            db_timeout_seconds: 30,
            jwt_secret: "0123456789abcdef0123456789abcdef".to_string(),
            jwt_expiry_hours: 1,
            cors_origins: vec!["*".to_string()],
            environment: "development".to_string(),
            uploads_dir: "uploads".to_string(),
            max_receipt_size_bytes: 10 * 1024 * 1024,
            smtp: None,
        }
    }

    #[test]
    fn accepts_valid_development_config() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn rejects_short_jwt_secret() {
        let mut config = base_config();
        config.jwt_secret = "short".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_non_postgres_database_url() {
        let mut config = base_config();
        config.database_url = "mysql://localhost/lodgera".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_wildcard_cors_in_production() {
        let mut config = base_config();
        config.environment = "production".to_string();
        assert!(config.validate().is_err());

        config.cors_origins = vec!["https://app.example.com".to_string()];
        assert!(config.validate().is_ok());
    }
}
