//! Configuration module
//!
//! Process-wide settings loaded once at startup from the environment (and a
//! `.env` file when present). Everything here is read-only after startup and
//! shared between requests through `Config`'s cheap clone.

use std::env;
use std::str::FromStr;

use crate::storage_types::StorageBackend;

// Common constants
const SERVER_PORT: u16 = 8080;
const MAX_CONNECTIONS: u32 = 20;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const JWT_EXPIRY_HOURS: i64 = 24;
const MAX_JWT_EXPIRY_HOURS: i64 = 24 * 366;
const JWT_ISSUER: &str = "auth_service";
const MAX_AUDIO_SIZE_MB: usize = 10;
const REQUEST_TIMEOUT_SECS: u64 = 60;
const MIN_JWT_SECRET_LEN: usize = 32;

/// Log output format for the tracing subscriber.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Console,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "console" | "pretty" | "compact" => Ok(LogFormat::Console),
            "json" => Ok(LogFormat::Json),
            _ => Err(anyhow::anyhow!("Invalid log format: {}", s)),
        }
    }
}

/// Relational datastore connection settings.
#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub timeout_seconds: u64,
}

/// Object storage settings.
#[derive(Clone, Debug)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub s3_bucket: Option<String>,
    pub s3_region: String,
    /// Custom endpoint for S3-compatible providers (MinIO, DigitalOcean Spaces, etc.)
    pub s3_endpoint: Option<String>,
    pub s3_access_key_id: Option<String>,
    pub s3_secret_access_key: Option<String>,
    pub s3_use_path_style: bool,
    pub local_storage_path: Option<String>,
    pub local_storage_base_url: Option<String>,
}

/// Full service configuration.
#[derive(Clone, Debug)]
pub struct ServiceConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
    pub request_timeout_secs: u64,
    pub jwt_secret: String,
    pub jwt_expiry_hours: i64,
    pub jwt_issuer: String,
    pub max_audio_size_bytes: usize,
    pub log_format: LogFormat,
    pub database: DatabaseConfig,
    pub storage: StorageConfig,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<ServiceConfig>);

impl Config {
    fn inner(&self) -> &ServiceConfig {
        &self.0
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.inner().environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        let config = ServiceConfig::from_lookup(|key| env::var(key).ok())?;
        Ok(Config(Box::new(config)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.inner().validate()
    }

    pub fn server_port(&self) -> u16 {
        self.inner().server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.inner().cors_origins
    }

    pub fn environment(&self) -> &str {
        &self.inner().environment
    }

    pub fn request_timeout_secs(&self) -> u64 {
        self.inner().request_timeout_secs
    }

    pub fn jwt_secret(&self) -> &str {
        &self.inner().jwt_secret
    }

    pub fn jwt_expiry_hours(&self) -> i64 {
        self.inner().jwt_expiry_hours
    }

    pub fn jwt_issuer(&self) -> &str {
        &self.inner().jwt_issuer
    }

    pub fn max_audio_size_bytes(&self) -> usize {
        self.inner().max_audio_size_bytes
    }

    pub fn log_format(&self) -> LogFormat {
        self.inner().log_format
    }

    pub fn database(&self) -> &DatabaseConfig {
        &self.inner().database
    }

    pub fn storage(&self) -> &StorageConfig {
        &self.inner().storage
    }
}

fn parse_or<T: FromStr>(value: Option<String>, default: T) -> T {
    value.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}

impl ServiceConfig {
    /// Build the configuration from a key lookup (the process environment in
    /// production, a map in tests).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |primary: &str, fallback: &str| lookup(primary).or_else(|| lookup(fallback));

        let jwt_secret = var("JWT_SECRET", "JWT_SECRET_KEY")
            .ok_or_else(|| anyhow::anyhow!("JWT_SECRET environment variable is required"))?;

        let cors_origins = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let max_audio_size_mb = parse_or(lookup("MAX_AUDIO_SIZE_MB"), MAX_AUDIO_SIZE_MB);
        let max_audio_size_bytes = max_audio_size_mb
            .checked_mul(1024 * 1024)
            .ok_or_else(|| anyhow::anyhow!("MAX_AUDIO_SIZE_MB is too large"))?;

        let log_format = lookup("LOG_FORMAT")
            .and_then(|v| v.parse().ok())
            .unwrap_or(LogFormat::Console);

        let database_url = lookup("DATABASE_URL").unwrap_or_else(|| {
            let host = lookup("DB_HOST").unwrap_or_else(|| "localhost".to_string());
            let port = lookup("DB_PORT").unwrap_or_else(|| "5432".to_string());
            let user = lookup("DB_USER").unwrap_or_else(|| "postgres".to_string());
            let password = lookup("DB_PASSWORD").unwrap_or_default();
            let name = lookup("DB_NAME").unwrap_or_else(|| "auth_db".to_string());
            let sslmode = lookup("DB_SSLMODE").unwrap_or_else(|| "disable".to_string());
            let credentials = if password.is_empty() {
                user
            } else {
                format!("{}:{}", user, password)
            };
            format!(
                "postgresql://{}@{}:{}/{}?sslmode={}",
                credentials, host, port, name, sslmode
            )
        });

        let backend = match lookup("STORAGE_BACKEND") {
            Some(value) => value.parse()?,
            None => StorageBackend::S3,
        };

        Ok(ServiceConfig {
            server_port: parse_or(var("PORT", "APP_PORT"), SERVER_PORT),
            cors_origins,
            environment: var("ENVIRONMENT", "APP_ENV").unwrap_or_else(|| "development".to_string()),
            request_timeout_secs: parse_or(lookup("REQUEST_TIMEOUT_SECS"), REQUEST_TIMEOUT_SECS),
            jwt_secret,
            jwt_expiry_hours: parse_or(
                var("JWT_EXPIRY_HOURS", "JWT_EXPIRATION_HOURS"),
                JWT_EXPIRY_HOURS,
            ),
            jwt_issuer: lookup("JWT_ISSUER").unwrap_or_else(|| JWT_ISSUER.to_string()),
            max_audio_size_bytes,
            log_format,
            database: DatabaseConfig {
                url: database_url,
                max_connections: parse_or(lookup("DB_MAX_CONNECTIONS"), MAX_CONNECTIONS),
                timeout_seconds: parse_or(lookup("DB_TIMEOUT_SECONDS"), CONNECTION_TIMEOUT_SECS),
            },
            storage: StorageConfig {
                backend,
                s3_bucket: var("S3_BUCKET", "S3_BUCKET_NAME"),
                s3_region: var("S3_REGION", "AWS_REGION").unwrap_or_else(|| "us-east-1".to_string()),
                s3_endpoint: lookup("S3_ENDPOINT").filter(|s| !s.trim().is_empty()),
                s3_access_key_id: lookup("S3_ACCESS_KEY_ID").filter(|s| !s.is_empty()),
                s3_secret_access_key: lookup("S3_SECRET_ACCESS_KEY").filter(|s| !s.is_empty()),
                s3_use_path_style: parse_or(lookup("S3_USE_PATH_STYLE"), true),
                local_storage_path: lookup("LOCAL_STORAGE_PATH"),
                local_storage_base_url: lookup("LOCAL_STORAGE_BASE_URL"),
            },
        })
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.jwt_secret.len() < MIN_JWT_SECRET_LEN {
            return Err(anyhow::anyhow!(
                "JWT_SECRET must be at least {} characters long",
                MIN_JWT_SECRET_LEN
            ));
        }

        if self.jwt_expiry_hours <= 0 {
            return Err(anyhow::anyhow!("JWT_EXPIRY_HOURS must be positive"));
        }

        if self.jwt_expiry_hours > MAX_JWT_EXPIRY_HOURS {
            return Err(anyhow::anyhow!(
                "JWT_EXPIRY_HOURS must be at most {}",
                MAX_JWT_EXPIRY_HOURS
            ));
        }

        if self.max_audio_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_AUDIO_SIZE_MB must be positive"));
        }

        if !(self.database.url.starts_with("postgresql://")
            || self.database.url.starts_with("postgres://"))
        {
            return Err(anyhow::anyhow!(
                "DATABASE_URL must be a valid PostgreSQL connection string"
            ));
        }

        match self.storage.backend {
            StorageBackend::S3 => {
                if self.storage.s3_bucket.is_none() {
                    return Err(anyhow::anyhow!(
                        "S3_BUCKET must be set when using S3 storage backend"
                    ));
                }
                if self.storage.s3_access_key_id.is_some()
                    != self.storage.s3_secret_access_key.is_some()
                {
                    return Err(anyhow::anyhow!(
                        "S3_ACCESS_KEY_ID and S3_SECRET_ACCESS_KEY must be set together"
                    ));
                }
            }
            StorageBackend::Local => {
                if self.storage.local_storage_path.is_none()
                    || self.storage.local_storage_base_url.is_none()
                {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_PATH and LOCAL_STORAGE_BASE_URL must be set when using local storage backend"
                    ));
                }
            }
        }

        Ok(())
    }
}
