//! Server configuration.
//!
//! Settings are resolved in layers, later layers winning:
//!
//! 1. Built-in defaults
//! 2. Optional TOML file (`--config` or `plantscan.toml` in the working directory)
//! 3. Environment variables (`PORT`, `HOST`, `DATABASE_URL`, `PUBLIC_DIR`,
//!    `MAX_UPLOAD_BYTES`, `UPLOAD_DIR`)
//! 4. Command-line flags (applied by the caller)

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants;

/// Result of configuration validation.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Non-fatal warnings that should be logged but don't prevent operation.
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// Returns true if there are any warnings.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Resolved server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Persistence connection string, see [`crate::store::RecordStore::open_url`].
    pub database_url: String,
    pub public_dir: PathBuf,
    pub max_upload_bytes: usize,
    /// Where uploaded photos are written. `None` keeps uploads in memory only.
    pub upload_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: constants::DEFAULT_HOST.to_string(),
            port: constants::DEFAULT_PORT,
            database_url: constants::DEFAULT_DATABASE_URL.to_string(),
            public_dir: PathBuf::from(constants::DEFAULT_PUBLIC_DIR),
            max_upload_bytes: constants::DEFAULT_MAX_UPLOAD_BYTES,
            upload_dir: None,
        }
    }
}

impl Config {
    /// Loads configuration from a TOML file, then applies the process environment.
    ///
    /// With `path = None`, `plantscan.toml` is read if it exists and defaults
    /// are used otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if an
    /// environment variable holds an unparsable number.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::load_from(path)?,
            None if Path::new(constants::DEFAULT_CONFIG_FILE).exists() => {
                Self::load_from(constants::DEFAULT_CONFIG_FILE)?
            },
            None => Self::default(),
        };
        config.with_env(|key| std::env::var(key).ok())
    }

    /// Load configuration from the specified TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read (IO error)
    /// - The file contains invalid TOML syntax
    /// - Fields have invalid types or are unknown
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Applies environment overrides using `lookup` to read variables.
    ///
    /// Empty values are ignored, so `PORT=` falls back to the lower layers.
    ///
    /// # Errors
    ///
    /// Returns an error if `PORT` or `MAX_UPLOAD_BYTES` is not a valid number.
    pub fn with_env<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(host) = get("HOST") {
            self.host = host;
        }
        if let Some(port) = get("PORT") {
            self.port = port
                .trim()
                .parse()
                .with_context(|| format!("Invalid PORT value: {port}"))?;
        }
        if let Some(url) = get("DATABASE_URL") {
            self.database_url = url;
        }
        if let Some(dir) = get("PUBLIC_DIR") {
            self.public_dir = PathBuf::from(dir);
        }
        if let Some(limit) = get("MAX_UPLOAD_BYTES") {
            self.max_upload_bytes = limit
                .trim()
                .parse()
                .with_context(|| format!("Invalid MAX_UPLOAD_BYTES value: {limit}"))?;
        }
        if let Some(dir) = get("UPLOAD_DIR") {
            self.upload_dir = Some(PathBuf::from(dir));
        }

        Ok(self)
    }

    /// Socket address string to bind.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Validate configuration.
    ///
    /// Returns a `ValidationResult` containing any non-fatal warnings.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails with one or more errors:
    /// - Port 0
    /// - Zero upload size limit
    /// - Empty database URL
    pub fn validate(&self) -> Result<ValidationResult> {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        if self.port == 0 {
            errors.push(
                "Server port cannot be 0. Use a valid port number (1-65535)\n  \
                 Common ports: 3000 (default), 8080, 8000"
                    .to_string(),
            );
        } else if self.port < 1024 {
            warnings.push(format!(
                "Server port {} is a system/privileged port (< 1024)\n  \
                 Recommendation: Use ports >= 1024 (e.g., 3000, 8080) to avoid permission issues",
                self.port
            ));
        }

        if self.max_upload_bytes == 0 {
            errors.push("max_upload_bytes cannot be 0".to_string());
        }

        if self.database_url.trim().is_empty() {
            errors.push("database_url cannot be empty".to_string());
        }

        if !self.public_dir.is_dir() {
            warnings.push(format!(
                "Public directory '{}' does not exist; static assets will return 404",
                self.public_dir.display()
            ));
        }

        if !errors.is_empty() {
            anyhow::bail!("Invalid configuration:\n  - {}", errors.join("\n  - "));
        }

        Ok(ValidationResult { warnings })
    }
}
