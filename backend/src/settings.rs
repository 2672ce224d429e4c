//! Application settings loaded via OrthoConfig.
//!
//! Values come from `ROUNDS_*` environment variables, a `.rounds.toml` file,
//! or command-line flags. The database URL also falls back to the
//! conventional `DATABASE_URL`.

use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;

use actix_web::cookie::Key;
use mockable::Env;
use ortho_config::OrthoConfig;
use serde::Deserialize;
use tracing::warn;
use zeroize::Zeroize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_POOL_MAX_SIZE: u32 = 10;
const FALLBACK_DATABASE_URL_ENV: &str = "DATABASE_URL";
/// Shortest secret accepted for deriving the session cookie key.
pub const SECRET_KEY_MIN_LEN: usize = 32;

/// Build mode for secret handling.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds fall back to an ephemeral key with a warning.
    Debug,
    /// Release builds refuse to start without a usable secret.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }
}

/// Errors raised while resolving settings at startup.
#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
    #[error("no database configured; set ROUNDS_DATABASE_URL or DATABASE_URL")]
    MissingDatabaseUrl,
    #[error("invalid bind address '{value}': {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("no secret key configured; set ROUNDS_SECRET_KEY or ROUNDS_SECRET_KEY_FILE")]
    MissingSecretKey,
    #[error("failed to read secret key at {path}: {source}")]
    SecretKeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("secret key too short: need >= {min_len} bytes, got {length}")]
    SecretKeyTooShort { length: usize, min_len: usize },
}

/// Settings for the rounds server.
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ROUNDS")]
pub struct Settings {
    /// PostgreSQL connection URL.
    pub database_url: Option<String>,
    /// Secret used to derive the session cookie key.
    pub secret_key: Option<String>,
    /// File holding the secret; read when `secret_key` is unset.
    pub secret_key_file: Option<PathBuf>,
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// Organisation stamped on new customers, jobs, and zones.
    pub org_id: Option<i32>,
    /// Drop the `Secure` flag from the session cookie, for plain-HTTP
    /// development setups.
    #[ortho_config(default = false)]
    pub cookie_insecure: bool,
    /// Maximum pooled database connections.
    pub pool_max_size: Option<u32>,
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("database_url", &self.database_url.as_ref().map(|_| "<set>"))
            .field("secret_key", &self.secret_key.as_ref().map(|_| "<redacted>"))
            .field("secret_key_file", &self.secret_key_file)
            .field("bind_addr", &self.bind_addr)
            .field("org_id", &self.org_id)
            .field("cookie_insecure", &self.cookie_insecure)
            .field("pool_max_size", &self.pool_max_size)
            .finish()
    }
}

impl Settings {
    /// Resolve the database URL, falling back to `DATABASE_URL`.
    ///
    /// # Errors
    /// [`SettingsError::MissingDatabaseUrl`] when neither is set.
    pub fn database_url<E: Env>(&self, env: &E) -> Result<String, SettingsError> {
        self.database_url
            .clone()
            .filter(|url| !url.trim().is_empty())
            .or_else(|| env.string(FALLBACK_DATABASE_URL_ENV))
            .filter(|url| !url.trim().is_empty())
            .ok_or(SettingsError::MissingDatabaseUrl)
    }

    /// Parse the bind address, defaulting to `0.0.0.0:8080`.
    ///
    /// # Errors
    /// [`SettingsError::InvalidBindAddr`] when the value is not a socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value
            .parse()
            .map_err(|source| SettingsError::InvalidBindAddr {
                value: value.to_owned(),
                source,
            })
    }

    /// Whether the session cookie carries the `Secure` flag.
    pub const fn cookie_secure(&self) -> bool {
        !self.cookie_insecure
    }

    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE)
    }

    /// Derive the session cookie key from the configured secret.
    ///
    /// The secret bytes are zeroised once the key is derived. Debug builds
    /// substitute an ephemeral key when the secret is missing or short, so
    /// sessions do not survive a restart.
    ///
    /// # Errors
    /// Release builds fail when no secret is configured, when the key file
    /// cannot be read, or when the secret is shorter than
    /// [`SECRET_KEY_MIN_LEN`] bytes.
    pub fn session_key(&self, mode: BuildMode) -> Result<Key, SettingsError> {
        match self.secret_bytes() {
            Ok(mut bytes) => {
                let length = bytes.len();
                if length < SECRET_KEY_MIN_LEN {
                    bytes.zeroize();
                    return ephemeral_or(
                        mode,
                        SettingsError::SecretKeyTooShort {
                            length,
                            min_len: SECRET_KEY_MIN_LEN,
                        },
                    );
                }
                let key = Key::derive_from(&bytes);
                bytes.zeroize();
                Ok(key)
            }
            Err(error) => ephemeral_or(mode, error),
        }
    }

    fn secret_bytes(&self) -> Result<Vec<u8>, SettingsError> {
        if let Some(secret) = self.secret_key.as_ref().filter(|s| !s.is_empty()) {
            return Ok(secret.as_bytes().to_vec());
        }
        match &self.secret_key_file {
            Some(path) => std::fs::read(path).map_err(|source| SettingsError::SecretKeyRead {
                path: path.clone(),
                source,
            }),
            None => Err(SettingsError::MissingSecretKey),
        }
    }
}

fn ephemeral_or(mode: BuildMode, error: SettingsError) -> Result<Key, SettingsError> {
    match mode {
        BuildMode::Debug => {
            warn!(error = %error, "using temporary session key (dev only)");
            Ok(Key::generate())
        }
        BuildMode::Release => Err(error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use mockable::MockEnv;
    use rstest::rstest;

    const ENV_KEYS: [&str; 7] = [
        "ROUNDS_DATABASE_URL",
        "ROUNDS_SECRET_KEY",
        "ROUNDS_SECRET_KEY_FILE",
        "ROUNDS_BIND_ADDR",
        "ROUNDS_ORG_ID",
        "ROUNDS_COOKIE_INSECURE",
        "ROUNDS_POOL_MAX_SIZE",
    ];

    fn load_from_empty_args() -> Settings {
        Settings::load_from_iter([OsString::from("rounds")]).expect("config should load")
    }

    fn blank() -> Settings {
        Settings {
            database_url: None,
            secret_key: None,
            secret_key_file: None,
            bind_addr: None,
            org_id: None,
            cookie_insecure: false,
            pool_max_size: None,
        }
    }

    fn no_env() -> MockEnv {
        let mut env = MockEnv::new();
        env.expect_string().returning(|_| None);
        env
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(ENV_KEYS.map(|key| (key, None::<String>)));

        let settings = load_from_empty_args();
        assert!(settings.database_url.is_none());
        assert!(!settings.cookie_insecure);
        assert!(settings.cookie_secure());
        assert_eq!(settings.pool_max_size(), DEFAULT_POOL_MAX_SIZE);
        assert_eq!(
            settings.bind_addr().expect("default parses"),
            DEFAULT_BIND_ADDR.parse::<SocketAddr>().expect("literal")
        );
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("ROUNDS_DATABASE_URL", Some("postgres://localhost/rounds".to_owned())),
            ("ROUNDS_SECRET_KEY", None),
            ("ROUNDS_SECRET_KEY_FILE", None),
            ("ROUNDS_BIND_ADDR", Some("127.0.0.1:9000".to_owned())),
            ("ROUNDS_ORG_ID", Some("4".to_owned())),
            ("ROUNDS_COOKIE_INSECURE", Some("true".to_owned())),
            ("ROUNDS_POOL_MAX_SIZE", Some("3".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.database_url(&no_env()).expect("url"),
            "postgres://localhost/rounds"
        );
        assert_eq!(settings.org_id, Some(4));
        assert!(!settings.cookie_secure());
        assert_eq!(settings.pool_max_size(), 3);
        assert_eq!(
            settings.bind_addr().expect("parses").to_string(),
            "127.0.0.1:9000"
        );
    }

    #[rstest]
    fn database_url_falls_back_to_conventional_variable() {
        let mut env = MockEnv::new();
        env.expect_string()
            .withf(|name| name == FALLBACK_DATABASE_URL_ENV)
            .returning(|_| Some("postgres://fallback/rounds".to_owned()));

        let url = blank().database_url(&env).expect("fallback used");
        assert_eq!(url, "postgres://fallback/rounds");
    }

    #[rstest]
    fn missing_database_url_is_an_error() {
        let err = blank().database_url(&no_env()).expect_err("no url");
        assert!(matches!(err, SettingsError::MissingDatabaseUrl));
    }

    #[rstest]
    fn malformed_bind_addr_is_rejected() {
        let settings = Settings {
            bind_addr: Some("localhost".to_owned()),
            ..blank()
        };
        assert!(matches!(
            settings.bind_addr(),
            Err(SettingsError::InvalidBindAddr { .. })
        ));
    }

    #[rstest]
    fn same_secret_derives_same_key() {
        let settings = Settings {
            secret_key: Some("k".repeat(SECRET_KEY_MIN_LEN)),
            ..blank()
        };
        let first = settings.session_key(BuildMode::Release).expect("key");
        let second = settings.session_key(BuildMode::Release).expect("key");
        assert_eq!(first.master(), second.master());
    }

    #[rstest]
    #[case(Some("short".to_owned()))]
    #[case(None)]
    fn release_requires_a_long_secret(#[case] secret: Option<String>) {
        let settings = Settings {
            secret_key: secret,
            ..blank()
        };
        assert!(settings.session_key(BuildMode::Release).is_err());
    }

    #[rstest]
    fn debug_falls_back_to_ephemeral_key() {
        assert!(blank().session_key(BuildMode::Debug).is_ok());
    }

    #[rstest]
    fn unreadable_key_file_is_reported() {
        let settings = Settings {
            secret_key_file: Some(PathBuf::from("/nonexistent/rounds/secret")),
            ..blank()
        };
        assert!(matches!(
            settings.session_key(BuildMode::Release),
            Err(SettingsError::SecretKeyRead { .. })
        ));
    }
}
