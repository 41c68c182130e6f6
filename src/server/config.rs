//! Environment-based application configuration.
//!
//! The environment is read exactly once, at process start, into an immutable [`Config`]
//! that is shared by reference with every component. Tests build configurations through
//! [`Config::from_lookup`] with an injected variable source instead of touching the
//! process environment.

use std::{fmt, str::FromStr, time::Duration};

use axum::http::HeaderValue;
use tower_sessions::cookie::SameSite;
use url::Url;

use crate::server::error::config::ConfigError;

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 15_000;
const DEFAULT_IDLE_TIMEOUT_MS: u64 = 45_000;
const DEFAULT_CONNECT_ATTEMPTS: u32 = 5;
const OPENWEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";
const DEVELOPMENT_SESSION_SECRET: &str = "trailhead-development-session-secret";
const SESSION_MAX_AGE_HOURS: i64 = 24;

/// Alternative names read when the primary variable is unset.
const ALIASES: &[(&str, &str)] = &[
    ("NODE_ENV", "APP_ENV"),
    ("MONGO_URI", "DATABASE_URL"),
    ("MONGO_SERVER_SELECTION_TIMEOUT_MS", "DATABASE_CONNECT_TIMEOUT_MS"),
    ("MONGO_SOCKET_TIMEOUT_MS", "DATABASE_IDLE_TIMEOUT_MS"),
    ("MONGO_TLS_ALLOW_INVALID_CERT", "DATABASE_TLS_ALLOW_INVALID_CERT"),
    ("MONGO_TLS_ALLOW_INVALID_HOSTNAME", "DATABASE_TLS_ALLOW_INVALID_HOSTNAME"),
];

/// Runtime mode selected by `NODE_ENV`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    Production,
    Development,
}

impl Environment {
    /// `production` (any case) selects production; anything else, including an unset
    /// variable, is development.
    pub fn from_value(value: Option<&str>) -> Self {
        match value {
            Some(value) if value.eq_ignore_ascii_case("production") => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(self) -> bool {
        self == Self::Production
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Production => "production",
            Self::Development => "development",
        }
    }
}

/// Connection parameters shared by the persistence connector and the session store.
#[derive(Clone)]
pub struct DatabaseConfig {
    /// Connection string; `None` runs the server in degraded mode.
    pub url: Option<String>,
    /// Applied to both connecting and acquiring a pooled connection.
    pub connect_timeout: Duration,
    /// Idle pooled connections are closed after this long.
    pub idle_timeout: Duration,
    /// Debug only: skip certificate verification.
    pub tls_allow_invalid_cert: bool,
    /// Debug only: skip hostname verification.
    pub tls_allow_invalid_hostname: bool,
    /// Upper bound on initial connection attempts.
    pub connect_attempts: u32,
}

impl DatabaseConfig {
    /// Returns the connection URL with any TLS relaxation applied.
    ///
    /// Relaxation only has a meaning for PostgreSQL, where it selects the `sslmode`:
    /// an invalid certificate allowance maps to `require` (encrypted, unverified) and an
    /// invalid hostname allowance alone maps to `verify-ca`. Other backends get the URL
    /// unchanged.
    ///
    /// # Returns
    /// - `Ok(Some(url))` - URL ready for `ConnectOptions`
    /// - `Ok(None)` - No URL configured
    /// - `Err(ConfigError::InvalidEnvVar)` - The URL could not be parsed
    pub fn connection_url(&self) -> Result<Option<String>, ConfigError> {
        let Some(raw) = self.url.as_deref() else {
            return Ok(None);
        };

        let sslmode = match (self.tls_allow_invalid_cert, self.tls_allow_invalid_hostname) {
            (true, _) => "require",
            (false, true) => "verify-ca",
            (false, false) => return Ok(Some(raw.to_string())),
        };

        let mut url = Url::parse(raw).map_err(|e| ConfigError::InvalidEnvVar {
            name: "MONGO_URI".to_string(),
            reason: e.to_string(),
        })?;

        if !matches!(url.scheme(), "postgres" | "postgresql") {
            tracing::warn!(
                "TLS relaxation flags are ignored for '{}' connections",
                url.scheme()
            );
            return Ok(Some(raw.to_string()));
        }

        let retained: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(key, _)| key != "sslmode")
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();
        url.query_pairs_mut()
            .clear()
            .extend_pairs(retained)
            .append_pair("sslmode", sslmode);

        Ok(Some(url.to_string()))
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &self.url.as_ref().map(|_| "[redacted]"))
            .field("connect_timeout", &self.connect_timeout)
            .field("idle_timeout", &self.idle_timeout)
            .field("tls_allow_invalid_cert", &self.tls_allow_invalid_cert)
            .field("tls_allow_invalid_hostname", &self.tls_allow_invalid_hostname)
            .field("connect_attempts", &self.connect_attempts)
            .finish()
    }
}

/// Session cookie settings.
#[derive(Clone)]
pub struct SessionConfig {
    /// Secret the cookie signing key is derived from.
    pub secret: String,
    pub cookie_secure: bool,
    pub cookie_same_site: SameSite,
    /// Lifetime of a session after its last save.
    pub max_age: time::Duration,
}

impl fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionConfig")
            .field("secret", &"[redacted]")
            .field("cookie_secure", &self.cookie_secure)
            .field("cookie_same_site", &self.cookie_same_site)
            .field("max_age", &self.max_age)
            .finish()
    }
}

/// Origins allowed to make credentialed cross-origin requests.
///
/// Only present in production. An empty list denies every origin.
#[derive(Clone, Debug, Default)]
pub struct CorsConfig {
    pub allowed_origins: Vec<HeaderValue>,
}

/// Weather gateway settings.
#[derive(Clone)]
pub struct WeatherConfig {
    pub api_key: Option<String>,
    pub url: String,
}

impl fmt::Debug for WeatherConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeatherConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[redacted]"))
            .field("url", &self.url)
            .finish()
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub environment: Environment,
    pub database: DatabaseConfig,
    pub session: SessionConfig,
    /// `None` in development, where no CORS layer is installed.
    pub cors: Option<CorsConfig>,
    pub weather: WeatherConfig,
}

impl Config {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the configuration through `lookup`.
    ///
    /// Empty and whitespace-only values count as unset.
    ///
    /// # Arguments
    /// - `lookup` - Returns the raw value of an environment variable, if any
    ///
    /// # Returns
    /// - `Ok(Config)` - Complete configuration
    /// - `Err(ConfigError)` - A value is malformed, a production requirement is
    ///   missing, or a debug-only flag is enabled in production
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = EnvReader { lookup };

        let environment = Environment::from_value(env.var("NODE_ENV").as_deref());
        let production = environment.is_production();

        let database = DatabaseConfig {
            url: env.var("MONGO_URI"),
            connect_timeout: Duration::from_millis(
                env.parse("MONGO_SERVER_SELECTION_TIMEOUT_MS", DEFAULT_CONNECT_TIMEOUT_MS)?,
            ),
            idle_timeout: Duration::from_millis(
                env.parse("MONGO_SOCKET_TIMEOUT_MS", DEFAULT_IDLE_TIMEOUT_MS)?,
            ),
            tls_allow_invalid_cert: env.flag("MONGO_TLS_ALLOW_INVALID_CERT")?,
            tls_allow_invalid_hostname: env.flag("MONGO_TLS_ALLOW_INVALID_HOSTNAME")?,
            connect_attempts: env.parse("DATABASE_CONNECT_ATTEMPTS", DEFAULT_CONNECT_ATTEMPTS)?,
        };

        if database.connect_attempts == 0 {
            return Err(ConfigError::InvalidEnvVar {
                name: "DATABASE_CONNECT_ATTEMPTS".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        if production {
            if database.tls_allow_invalid_cert {
                return Err(ConfigError::InsecureInProduction(
                    "MONGO_TLS_ALLOW_INVALID_CERT".to_string(),
                ));
            }
            if database.tls_allow_invalid_hostname {
                return Err(ConfigError::InsecureInProduction(
                    "MONGO_TLS_ALLOW_INVALID_HOSTNAME".to_string(),
                ));
            }
        }

        let secret = match env.var("SESSION_SECRET") {
            Some(secret) => secret,
            None if production => {
                return Err(ConfigError::MissingEnvVar("SESSION_SECRET".to_string()))
            }
            None => {
                tracing::warn!("SESSION_SECRET is not set, falling back to the development secret");
                DEVELOPMENT_SESSION_SECRET.to_string()
            }
        };

        let session = SessionConfig {
            secret,
            cookie_secure: production,
            cookie_same_site: if production {
                SameSite::None
            } else {
                SameSite::Lax
            },
            max_age: time::Duration::hours(SESSION_MAX_AGE_HOURS),
        };

        let cors = if production {
            Some(CorsConfig {
                allowed_origins: parse_origins(env.var("FRONTEND_ORIGIN").as_deref())?,
            })
        } else {
            None
        };

        let weather = WeatherConfig {
            api_key: env.var("OPENWEATHER_API_KEY"),
            url: env
                .var("OPENWEATHER_URL")
                .unwrap_or_else(|| OPENWEATHER_URL.to_string()),
        };

        Ok(Self {
            port: env.parse("PORT", DEFAULT_PORT)?,
            environment,
            database,
            session,
            cors,
            weather,
        })
    }
}

/// Splits a comma-separated origin list, skipping blank entries.
fn parse_origins(value: Option<&str>) -> Result<Vec<HeaderValue>, ConfigError> {
    let Some(value) = value else {
        return Ok(Vec::new());
    };

    value
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(|origin| {
            HeaderValue::from_str(origin).map_err(|e| ConfigError::InvalidEnvVar {
                name: "FRONTEND_ORIGIN".to_string(),
                reason: format!("'{}' is not a valid origin: {}", origin, e),
            })
        })
        .collect()
}

struct EnvReader<F> {
    lookup: F,
}

impl<F> EnvReader<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Reads `name`, falling back to its alias from [`ALIASES`].
    fn var(&self, name: &str) -> Option<String> {
        self.raw(name).or_else(|| {
            ALIASES
                .iter()
                .find(|(primary, _)| *primary == name)
                .and_then(|(_, alias)| self.raw(alias))
        })
    }

    fn raw(&self, name: &str) -> Option<String> {
        (self.lookup)(name)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }

    fn parse<T>(&self, name: &str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        match self.var(name) {
            Some(value) => value.parse().map_err(|e: T::Err| ConfigError::InvalidEnvVar {
                name: name.to_string(),
                reason: format!("'{}': {}", value, e),
            }),
            None => Ok(default),
        }
    }

    fn flag(&self, name: &str) -> Result<bool, ConfigError> {
        let Some(value) = self.var(name) else {
            return Ok(false);
        };

        match value.to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(true),
            "false" | "0" | "no" => Ok(false),
            _ => Err(ConfigError::InvalidEnvVar {
                name: name.to_string(),
                reason: format!("'{}' is not a boolean", value),
            }),
        }
    }
}
