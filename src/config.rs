use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Where uploaded avatar files are written.
#[derive(Debug, Clone)]
pub enum AvatarStorage {
    Filesystem { dir: PathBuf },
    S3(S3Settings),
}

#[derive(Debug, Clone)]
pub struct S3Settings {
    pub bucket_name: String,
    pub region: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    pub endpoint: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
    pub request_timeout: Duration,
    pub avatar_max_bytes: usize,
    pub avatar_store_in_db: bool,
    pub avatar_storage: AvatarStorage,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = required("DATABASE_URL")?;
        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let server_port = parsed("SERVER_PORT", 3000)?;
        let request_timeout = Duration::from_secs(parsed("REQUEST_TIMEOUT_SECS", 30)?);
        let avatar_max_bytes = parsed("AVATAR_MAX_BYTES", 5 * 1024 * 1024)?;
        let avatar_store_in_db = parsed("AVATAR_STORE_IN_DB", true)?;

        let avatar_storage = match env::var("AVATAR_STORAGE").as_deref() {
            Err(_) | Ok("fs") => AvatarStorage::Filesystem {
                dir: env::var("AVATAR_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| PathBuf::from("avatars")),
            },
            Ok("s3") => AvatarStorage::S3(S3Settings {
                bucket_name: required("S3_BUCKET_NAME")?,
                region: required("AWS_REGION")?,
                access_key_id: required("AWS_ACCESS_KEY_ID")?,
                secret_access_key: required("AWS_SECRET_ACCESS_KEY")?,
                endpoint: env::var("S3_ENDPOINT").ok(),
            }),
            Ok(other) => {
                return Err(ConfigError::Invalid {
                    name: "AVATAR_STORAGE",
                    value: other.to_string(),
                })
            }
        };

        Ok(Self {
            database_url,
            server_host,
            server_port,
            request_timeout,
            avatar_max_bytes,
            avatar_store_in_db,
            avatar_storage,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::Missing(name))
}

fn parsed<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        Err(_) => Ok(default),
    }
}
