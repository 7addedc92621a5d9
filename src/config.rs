use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::info;

/// Secret used when nothing else is configured. Refused in production.
pub const DEFAULT_SECRET_KEY: &str = "dev-secret-key";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub database: DatabaseConfig,

    pub server: ServerConfig,

    pub mail: MailConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    #[default]
    Development,
    Production,
    Testing,
}

impl FromStr for Profile {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            "testing" | "test" => Ok(Self::Testing),
            other => anyhow::bail!("Unknown profile '{other}'"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub profile: Profile,

    pub debug: bool,

    pub testing: bool,

    pub log_level: String,

    /// Emit logs as JSON lines instead of the human-readable format.
    pub log_json: bool,

    /// Number of tokio worker threads (0 = one per CPU core)
    pub worker_threads: usize,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            profile: Profile::Development,
            debug: true,
            testing: false,
            log_level: "info".to_string(),
            log_json: false,
            worker_threads: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,

    pub max_connections: u32,

    pub min_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:data/portfolio.db".to_string(),
            max_connections: 5,
            min_connections: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,

    pub port: u16,

    pub secret_key: String,

    /// Request body cap in bytes.
    pub max_content_length: usize,

    pub upload_folder: String,

    pub cors_allowed_origins: Vec<String>,

    /// Whether to set the Secure flag on session cookies.
    pub secure_cookies: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            secret_key: DEFAULT_SECRET_KEY.to_string(),
            max_content_length: 16 * 1024 * 1024,
            upload_folder: "static/uploads".to_string(),
            cors_allowed_origins: vec![
                "http://localhost:5000".to_string(),
                "http://127.0.0.1:5000".to_string(),
            ],
            secure_cookies: false,
        }
    }
}

/// Outbound mail settings. Recognized and validated; nothing sends mail yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MailConfig {
    pub server: String,

    pub port: u16,

    pub use_tls: bool,

    pub username: Option<String>,

    #[serde(skip_serializing)]
    pub password: Option<String>,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            server: "smtp.gmail.com".to_string(),
            port: 587,
            use_tls: true,
            username: None,
            password: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::for_profile(Profile::Development)
    }
}

impl Config {
    /// Baseline values for a profile, before any file or environment input.
    #[must_use]
    pub fn for_profile(profile: Profile) -> Self {
        let mut config = Self {
            general: GeneralConfig::default(),
            database: DatabaseConfig::default(),
            server: ServerConfig::default(),
            mail: MailConfig::default(),
        };
        config.apply_profile(profile);
        config
    }

    fn apply_profile(&mut self, profile: Profile) {
        self.general.profile = profile;
        match profile {
            Profile::Development => {
                self.general.debug = true;
                self.general.testing = false;
            }
            Profile::Production => {
                self.general.debug = false;
                self.general.testing = false;
                self.server.host = "0.0.0.0".to_string();
                self.server.secure_cookies = true;
            }
            Profile::Testing => {
                self.general.debug = true;
                self.general.testing = true;
                self.database.url = "sqlite::memory:".to_string();
            }
        }
    }

    /// Loads `.env`, the first config file found (or defaults), then
    /// environment overrides.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = Self::load_file()?;
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    fn load_file() -> Result<Self> {
        for path in &Self::config_paths() {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                return Self::load_from_path(path);
            }
        }

        let profile = match std::env::var("FOLIO_PROFILE") {
            Ok(raw) => raw.parse().context("Invalid FOLIO_PROFILE")?,
            Err(_) => Profile::default(),
        };
        info!("No config file found, using {:?} defaults", profile);
        Ok(Self::for_profile(profile))
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Parses a config file. Keys the file leaves out take the defaults of
    /// the profile it names, not the development defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let overlay: toml::Value = toml::from_str(content)?;

        let profile = match overlay.get("general").and_then(|g| g.get("profile")) {
            Some(raw) => raw
                .as_str()
                .context("general.profile must be a string")?
                .parse()?,
            None => Profile::default(),
        };

        let mut merged = toml::Value::try_from(Self::for_profile(profile))?;
        merge_toml(&mut merged, overlay);
        Ok(merged.try_into()?)
    }

    /// Applies each recognized variable independently. `lookup` is
    /// `std::env::var` in production; tests pass a map.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup("FOLIO_PROFILE") {
            let profile: Profile = raw.parse().context("Invalid FOLIO_PROFILE")?;
            if profile != self.general.profile {
                self.apply_profile(profile);
            }
        }

        if let Some(url) = lookup("DATABASE_URL") {
            self.database.url = url;
        }
        if let Some(key) = lookup("SECRET_KEY") {
            self.server.secret_key = key;
        }
        if let Some(server) = lookup("MAIL_SERVER") {
            self.mail.server = server;
        }
        if let Some(port) = parse_var(&lookup, "MAIL_PORT")? {
            self.mail.port = port;
        }
        if let Some(use_tls) = parse_flag(&lookup, "MAIL_USE_TLS")? {
            self.mail.use_tls = use_tls;
        }
        if let Some(username) = lookup("MAIL_USERNAME") {
            self.mail.username = Some(username);
        }
        if let Some(password) = lookup("MAIL_PASSWORD") {
            self.mail.password = Some(password);
        }
        if let Some(limit) = parse_var(&lookup, "MAX_CONTENT_LENGTH")? {
            self.server.max_content_length = limit;
        }
        if let Some(folder) = lookup("UPLOAD_FOLDER") {
            self.server.upload_folder = folder;
        }
        if let Some(debug) = parse_flag(&lookup, "DEBUG")? {
            self.general.debug = debug;
        }
        if let Some(testing) = parse_flag(&lookup, "TESTING")? {
            self.general.testing = testing;
        }
        if let Some(port) = parse_var(&lookup, "PORT")? {
            self.server.port = port;
        }
        if let Some(level) = lookup("LOG_LEVEL") {
            self.general.log_level = level;
        }

        Ok(())
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![];

        paths.push(PathBuf::from("config.toml"));

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("folio").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".folio").join("config.toml"));
        }

        paths
    }

    fn default_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    pub fn create_default_if_missing() -> Result<bool> {
        let path = Self::default_config_path();
        if path.exists() {
            Ok(false)
        } else {
            let config = Self::default();
            config.save_to_path(&path)?;
            info!("Created default config file: {}", path.display());
            Ok(true)
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.database.url.trim().is_empty() {
            anyhow::bail!("Database URL cannot be empty");
        }

        if self.database.min_connections > self.database.max_connections {
            anyhow::bail!(
                "database.min_connections ({}) exceeds database.max_connections ({})",
                self.database.min_connections,
                self.database.max_connections
            );
        }

        if self.server.port == 0 {
            anyhow::bail!("Server port must be > 0");
        }

        if self.server.max_content_length == 0 {
            anyhow::bail!("max_content_length must be > 0");
        }

        if self.general.profile == Profile::Production {
            if self.server.secret_key.is_empty() || self.server.secret_key == DEFAULT_SECRET_KEY {
                anyhow::bail!("SECRET_KEY must be set to a non-default value in production");
            }
            if self.general.debug {
                anyhow::bail!("Debug mode must be off in production");
            }
        }

        Ok(())
    }

    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn merge_toml(base: &mut toml::Value, overlay: toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base), toml::Value::Table(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(existing) => merge_toml(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| anyhow::anyhow!("Invalid value for {key}: '{raw}' ({e})"))
        })
        .transpose()
}

fn parse_flag<F>(lookup: &F, key: &str) -> Result<Option<bool>>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" | "" => Ok(false),
            _ => Err(anyhow::anyhow!("Invalid value for {key}: '{raw}'")),
        })
        .transpose()
}
