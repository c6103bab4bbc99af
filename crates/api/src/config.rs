use std::env;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

/// Which document-store backend persists the site document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// Flat JSON file.
    File,
    /// Managed database, single-row upsert.
    Postgres,
    /// Postgres primary mirrored to the flat file, which also stands in
    /// when the database is unreachable.
    Both,
}

/// Which asset-store backend holds uploaded media.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetBackend {
    /// Local upload directory served under `/uploads`.
    Local,
    /// Remote media host, reached over HTTP.
    Remote,
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Server host to bind to.
    pub host: String,
    /// Server port to bind to.
    pub port: u16,
    /// Log level used when `RUST_LOG` is not set.
    pub log_level: String,
    /// Origin allowed by CORS; `None` keeps the permissive dev default.
    pub allowed_origin: Option<String>,
    pub storage_backend: StorageBackend,
    /// Path of the flat-file document backend.
    pub data_file: PathBuf,
    /// PostgreSQL connection URL, required for the postgres backends.
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub asset_backend: AssetBackend,
    /// Directory holding locally stored uploads.
    pub upload_dir: PathBuf,
    /// Base URL of the remote media host, required for the remote backend.
    pub media_base_url: Option<String>,
    pub media_api_key: Option<String>,
    /// Local cache copy of the last successfully saved document.
    pub cache_file: PathBuf,
    /// Request body cap; the document plus uploads stay well under this.
    pub body_limit_bytes: usize,
    /// JWT signing secret.
    pub jwt_secret: String,
    pub admin_username: String,
    /// Argon2 PHC string; preferred over `admin_password`.
    pub admin_password_hash: Option<String>,
    /// Plaintext dev fallback, hashed at startup when no hash is set.
    pub admin_password: Option<String>,
}

impl AppConfig {
    /// Load configuration from environment variables with sensible
    /// defaults. Backend choices are validated here so a misconfigured
    /// deployment fails at startup, not on first write.
    pub fn from_env() -> Result<Self, ConfigError> {
        let storage_backend = match var_or("STORAGE_BACKEND", "file").as_str() {
            "file" => StorageBackend::File,
            "postgres" => StorageBackend::Postgres,
            "both" => StorageBackend::Both,
            other => {
                return Err(ConfigError::Invalid {
                    key: "STORAGE_BACKEND",
                    value: other.to_string(),
                })
            }
        };
        let asset_backend = match var_or("ASSET_BACKEND", "local").as_str() {
            "local" => AssetBackend::Local,
            "remote" => AssetBackend::Remote,
            other => {
                return Err(ConfigError::Invalid {
                    key: "ASSET_BACKEND",
                    value: other.to_string(),
                })
            }
        };

        let database_url = env::var("DATABASE_URL").ok();
        if database_url.is_none() && storage_backend != StorageBackend::File {
            return Err(ConfigError::Missing("DATABASE_URL"));
        }

        let media_base_url = env::var("MEDIA_BASE_URL").ok();
        let media_api_key = env::var("MEDIA_API_KEY").ok();
        if asset_backend == AssetBackend::Remote {
            if media_base_url.is_none() {
                return Err(ConfigError::Missing("MEDIA_BASE_URL"));
            }
            if media_api_key.is_none() {
                return Err(ConfigError::Missing("MEDIA_API_KEY"));
            }
        }

        Ok(Self {
            host: var_or("HOST", "0.0.0.0"),
            port: parse_var("PORT", 5001)?,
            log_level: var_or("LOG_LEVEL", "info"),
            allowed_origin: env::var("ALLOWED_ORIGIN").ok(),
            storage_backend,
            data_file: PathBuf::from(var_or("DATA_FILE", "data/db.json")),
            database_url,
            db_max_connections: parse_var("DB_MAX_CONNECTIONS", 10)?,
            asset_backend,
            upload_dir: PathBuf::from(var_or("UPLOAD_DIR", "uploads")),
            media_base_url,
            media_api_key,
            cache_file: PathBuf::from(var_or("CACHE_FILE", "data/cache.json")),
            body_limit_bytes: parse_var("BODY_LIMIT_BYTES", 50 * 1024 * 1024)?,
            jwt_secret: var_or("JWT_SECRET", "dev-secret-change-me-in-production"),
            admin_username: var_or("ADMIN_USERNAME", "admin"),
            admin_password_hash: env::var("ADMIN_PASSWORD_HASH").ok(),
            admin_password: env::var("ADMIN_PASSWORD").ok(),
        })
    }

    /// Build the socket address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_var<T>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
{
    match env::var(key) {
        Ok(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
            key,
            value: raw.clone(),
        }),
        Err(_) => Ok(default),
    }
}
