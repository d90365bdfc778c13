use std::env;
use std::fmt;
use std::path::Path;

use thiserror::Error;
use url::Url;

const DB_SCHEME: &str = "postgresql+asyncpg";

const REQUIRED_KEYS: [&str; 6] = [
    "SECRET_KEY",
    "DB_HOST",
    "DB_PORT",
    "DB_USER",
    "DB_PASSWORD",
    "DB_NAME",
];

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variable(s): {}", .0.join(", "))]
    Missing(Vec<&'static str>),

    #[error("Invalid configuration for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Raw form of `BACKEND_CORS_ORIGINS` before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsOrigins {
    /// Comma separated string.
    Delimited(String),
    List(Vec<String>),
}

impl CorsOrigins {
    /// Classify a raw env value. Bracketed values are read as a JSON list of strings.
    pub fn parse(raw: String) -> Result<Self, ConfigError> {
        if !raw.trim_start().starts_with('[') {
            return Ok(CorsOrigins::Delimited(raw));
        }

        serde_json::from_str::<Vec<String>>(&raw)
            .map(CorsOrigins::List)
            .map_err(|e| ConfigError::Invalid {
                key: "BACKEND_CORS_ORIGINS",
                reason: e.to_string(),
            })
    }

    pub fn resolve(self) -> Result<Vec<String>, ConfigError> {
        let origins = match self {
            CorsOrigins::List(origins) => origins,
            CorsOrigins::Delimited(raw) if raw.trim().is_empty() => Vec::new(),
            CorsOrigins::Delimited(raw) => raw.split(',').map(|s| s.trim().to_string()).collect(),
        };

        for origin in &origins {
            check_origin(origin)?;
        }

        Ok(origins)
    }
}

fn check_origin(origin: &str) -> Result<(), ConfigError> {
    let invalid = |reason: String| ConfigError::Invalid {
        key: "BACKEND_CORS_ORIGINS",
        reason,
    };

    let url = Url::parse(origin).map_err(|e| invalid(format!("{origin}: {e}")))?;
    match url.scheme() {
        "http" | "https" if url.has_host() => Ok(()),
        _ => Err(invalid(format!("{origin}: not an http(s) URL"))),
    }
}

/// Process configuration, resolved once at startup.
#[derive(Clone)]
pub struct Settings {
    pub api: String,
    pub admin: String,
    pub startup: String,
    secret_key: String,
    pub admin_swatch: String,
    pub project_name: String,
    pub description: String,
    pub cors_origins: Vec<String>,
    pub api_port: u16,
    pub db_host: String,
    pub db_port: u16,
    pub db_user: String,
    pub db_name: String,
    database_uri: String,
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("api", &self.api)
            .field("admin", &self.admin)
            .field("startup", &self.startup)
            .field("secret_key", &"[REDACTED]")
            .field("admin_swatch", &self.admin_swatch)
            .field("project_name", &self.project_name)
            .field("description", &self.description)
            .field("cors_origins", &self.cors_origins)
            .field("api_port", &self.api_port)
            .field("db_host", &self.db_host)
            .field("db_port", &self.db_port)
            .field("db_user", &self.db_user)
            .field("db_name", &self.db_name)
            .field("database_uri", &"[REDACTED]")
            .finish()
    }
}

/// Export the variables of an env file into the process environment.
/// Variables already set in the process keep their values. Returns whether
/// the file was read.
pub fn load_env_file(path: &Path) -> bool {
    match dotenv::from_path(path) {
        Ok(()) => {
            tracing::debug!("Loaded env file {}", path.display());
            true
        }
        Err(e) => {
            tracing::debug!("Env file {} not loaded: {}", path.display(), e);
            false
        }
    }
}

/// Name of the env file to load for the given `LEVEL`.
pub fn env_file(level: Option<&str>) -> &'static str {
    match level {
        Some("debug") => "env/example.env",
        _ => "env/.env",
    }
}

impl Settings {
    /// Load the env file picked by `LEVEL`, then resolve from the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        let level = env::var("LEVEL").ok();
        load_env_file(Path::new(env_file(level.as_deref())));

        Self::from_env()
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let missing: Vec<&'static str> = REQUIRED_KEYS
            .iter()
            .copied()
            .filter(|key| lookup(*key).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(ConfigError::Missing(missing));
        }

        let required = |key: &'static str| lookup(key).ok_or(ConfigError::Missing(vec![key]));
        let or_default = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let db_port = parse_port("DB_PORT", &required("DB_PORT")?)?;
        let api_port = match lookup("API_PORT") {
            Some(raw) => parse_port("API_PORT", &raw)?,
            None => 3000,
        };

        let cors_origins = match lookup("BACKEND_CORS_ORIGINS") {
            Some(raw) => CorsOrigins::parse(raw)?.resolve()?,
            None => Vec::new(),
        };

        let api = parse_prefix("API", or_default("API", "/api"))?;
        let admin = parse_prefix("ADMIN", or_default("ADMIN", "/admin"))?;

        let db_host = required("DB_HOST")?;
        let db_user = required("DB_USER")?;
        let db_password = required("DB_PASSWORD")?;
        let db_name = required("DB_NAME")?;

        let database_uri = match lookup("SQLALCHEMY_DATABASE_URI") {
            Some(uri) => uri,
            None => build_database_uri(&db_user, &db_password, &db_host, db_port, &db_name)?,
        };

        Ok(Self {
            api,
            admin,
            startup: or_default("STARTUP", "startup"),
            secret_key: required("SECRET_KEY")?,
            admin_swatch: or_default("FLASK_ADMIN_SWATCH", "cerulean"),
            project_name: or_default("PROJECT_NAME", "Applications API"),
            description: or_default("DESCRIPTION", "Application registry backend"),
            cors_origins,
            api_port,
            db_host,
            db_port,
            db_user,
            db_name,
            database_uri,
        })
    }

    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }

    /// The database URI exactly as configured or derived.
    pub fn database_uri(&self) -> &str {
        &self.database_uri
    }

    /// The database URI with any `+driver` suffix stripped from the scheme,
    /// which is the form the sqlx Postgres driver accepts.
    pub fn connection_url(&self) -> String {
        let uri = self.database_uri();
        match uri.split_once("://") {
            Some((scheme, rest)) => {
                let scheme = scheme.split('+').next().unwrap_or(scheme);
                format!("{scheme}://{rest}")
            }
            None => uri.to_string(),
        }
    }
}

fn parse_port(key: &'static str, raw: &str) -> Result<u16, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::Invalid {
        key,
        reason: format!("{raw:?} is not a valid port"),
    })
}

/// Route prefixes are mounted on the router and must be absolute paths.
fn parse_prefix(key: &'static str, raw: String) -> Result<String, ConfigError> {
    if raw.starts_with('/') {
        Ok(raw)
    } else {
        Err(ConfigError::Invalid {
            key,
            reason: format!("{raw:?} must start with '/'"),
        })
    }
}

fn build_database_uri(
    user: &str,
    password: &str,
    host: &str,
    port: u16,
    name: &str,
) -> Result<String, ConfigError> {
    let mut url = Url::parse(&format!("{DB_SCHEME}://{host}:{port}")).map_err(|e| {
        ConfigError::Invalid {
            key: "DB_HOST",
            reason: format!("{host:?}: {e}"),
        }
    })?;

    // Userinfo is percent-encoded by the setters.
    if url.set_username(user).is_err() || url.set_password(Some(password)).is_err() {
        return Err(ConfigError::Invalid {
            key: "DB_HOST",
            reason: format!("{host:?} cannot carry credentials"),
        });
    }
    url.set_path(&format!("/{name}"));

    Ok(url.to_string())
}
