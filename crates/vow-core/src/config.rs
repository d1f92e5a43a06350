use anyhow::Result;
use config::Config;
use serde::Deserialize;

use crate::error::{CoreError, CoreResult};
use crate::util::slug::{generate_slug, is_valid_slug};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub server: ServerConfig,
    pub wedding: WeddingConfig,
    pub content: ContentConfig,
    pub rsvp: RsvpConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    Postgres,
    Memory,
}

#[derive(Clone, Deserialize)]
pub struct DatabaseConfig {
    pub backend: StorageBackend,
    pub url: String,
    pub max_connections: u8,
}

impl DatabaseConfig {
    /// The connection URL with its password masked, for logs.
    #[must_use]
    pub fn redacted_url(&self) -> String {
        match url::Url::parse(&self.url) {
            Ok(mut parsed) if parsed.password().is_some() => {
                if parsed.set_password(Some("<redacted>")).is_err() {
                    return "<redacted>".to_string();
                }
                parsed.to_string()
            }
            Ok(parsed) => parsed.to_string(),
            Err(_) => "<unparseable>".to_string(),
        }
    }
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("backend", &self.backend)
            .field("url", &self.redacted_url())
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

#[derive(Clone, Deserialize)]
pub struct AuthConfig {
    pub admin_username: String,
    /// Argon2 PHC string. Admin login is disabled when unset.
    pub admin_password_hash: Option<String>,
    /// Route segment the admin API is mounted under.
    pub admin_path: String,
    pub session_ttl_minutes: u32,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("admin_username", &self.admin_username)
            .field(
                "admin_password_hash",
                &self.admin_password_hash.as_ref().map(|_| "<redacted>"),
            )
            .field("admin_path", &self.admin_path)
            .field("session_ttl_minutes", &self.session_ttl_minutes)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub serve_origin: Option<String>,
}

impl ServerConfig {
    /// ## Summary
    /// Returns the server address as a string in the format "host:port".
    #[must_use]
    pub fn serve_origin(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    /// ## Summary
    /// Returns the public origin used when building guest invite links.
    #[must_use]
    pub fn origin(&self) -> String {
        if let Some(origin) = &self.serve_origin {
            origin.clone()
        } else {
            self.serve_origin()
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeddingConfig {
    pub slug: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContentConfig {
    pub fetch_timeout_ms: u64,
}

impl ContentConfig {
    #[must_use]
    pub const fn fetch_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.fetch_timeout_ms)
    }
}

/// How an RSVP relates to rows the admin created ahead of time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reconciliation {
    /// Every submission inserts a new row, even for a pre-registered name.
    #[default]
    Insert,
    /// Update the newest unanswered row with the same name, else insert.
    MatchByName,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RsvpConfig {
    pub reconciliation: Reconciliation,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Settings {
    /// ## Summary
    /// Loads configuration from `.env` file and environment variables into a `Settings`.
    /// Environment variables (`VOW_` prefix, `__` between sections) take precedence
    /// over defaults, and `config.toml` is layered on top when present.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        let settings = Config::builder()
            .set_default("database.backend", "postgres")?
            .set_default("database.url", "postgres://localhost/vow")?
            .set_default("database.max_connections", 4)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8698)?
            .set_default("auth.admin_username", "admin")?
            .set_default("auth.admin_path", crate::constants::DEFAULT_ADMIN_PATH)?
            .set_default("auth.session_ttl_minutes", 720)?
            .set_default("wedding.slug", crate::constants::DEFAULT_WEDDING_SLUG)?
            .set_default("content.fetch_timeout_ms", 5000)?
            .set_default("rsvp.reconciliation", "insert")?
            .set_default("logging.level", "debug")?
            // Env file
            .add_source(
                config::Environment::with_prefix("VOW")
                    .prefix_separator("_")
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            // TOML file
            .add_source(config::File::with_name("config.toml").required(false))
            .build()?
            .try_deserialize::<Settings>()?;

        settings.validate()?;
        Ok(settings)
    }

    /// ## Summary
    /// Checks values the deserializer cannot.
    ///
    /// ## Errors
    /// Returns `ConfigError` for a non-canonical wedding slug or an empty admin path.
    pub fn validate(&self) -> CoreResult<()> {
        if !is_valid_slug(&self.wedding.slug) {
            return Err(CoreError::ConfigError(format!(
                "wedding.slug '{}' is not a valid slug, try '{}'",
                self.wedding.slug,
                generate_slug(&self.wedding.slug)
            )));
        }
        if self.auth.admin_path.trim_matches('/').is_empty() {
            return Err(CoreError::ConfigError(
                "auth.admin_path must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Whether the admin API is still mounted under the guessable default path.
    #[must_use]
    pub fn uses_default_admin_path(&self) -> bool {
        self.auth.admin_path.trim_matches('/') == crate::constants::DEFAULT_ADMIN_PATH
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    Settings::load()
}
