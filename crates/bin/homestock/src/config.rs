//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `homestock.toml` in the working directory (or the path in
//! `HOMESTOCK_CONFIG`). Every field has a sensible default so the file is
//! optional. Environment variables take precedence over file values.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use homestock_domain::id::{HomeId, ItemTypeId};
use homestock_domain::view::{FilterState, LowStockThreshold, SortState};

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Snapshot file settings.
    pub snapshot: SnapshotConfig,
    /// Session token settings.
    pub session: SessionConfig,
    /// Item list and dashboard settings.
    pub view: ViewConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Where the inventory snapshot lives.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SnapshotConfig {
    /// JSON snapshot path. A missing file starts an empty inventory.
    pub path: PathBuf,
}

/// Session token persistence.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// File holding the persisted token.
    pub token_file: PathBuf,
    /// Token to activate (and persist) on startup.
    pub token: Option<String>,
}

/// Item list and dashboard settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Quantity at or below which an item counts as low stock.
    pub low_stock_threshold: f64,
    /// Search term applied to the item list.
    pub search: String,
    /// Selected item types; empty means all.
    pub types: Vec<ItemTypeId>,
    /// Sort column, optionally with a direction (`quantity:desc`).
    pub sort: String,
    /// Home to display; the first home when unset.
    pub home_id: Option<String>,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `homestock.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("HOMESTOCK_CONFIG").unwrap_or_else(|_| "homestock.toml".into());
        let mut config = Self::from_file(&path)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("HOMESTOCK_SNAPSHOT") {
            self.snapshot.path = val.into();
        }
        if let Some(val) = var("HOMESTOCK_TOKEN_FILE") {
            self.session.token_file = val.into();
        }
        if let Some(val) = var("HOMESTOCK_TOKEN") {
            self.session.token = Some(val);
        }
        if let Some(val) = var("HOMESTOCK_LOW_STOCK_THRESHOLD") {
            // An unparsable value is rejected by `validate`.
            self.view.low_stock_threshold = val.parse().unwrap_or(f64::NAN);
        }
        if let Some(val) = var("HOMESTOCK_SEARCH") {
            self.view.search = val;
        }
        if let Some(val) = var("HOMESTOCK_SORT") {
            self.view.sort = val;
        }
        if let Some(val) = var("HOMESTOCK_HOME_ID") {
            self.view.home_id = Some(val);
        }
        if let Some(val) = var("HOMESTOCK_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.snapshot.path.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "snapshot path must not be empty".to_string(),
            ));
        }
        if self.session.token_file.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "token file path must not be empty".to_string(),
            ));
        }
        LowStockThreshold::new(self.view.low_stock_threshold).map_err(|err| {
            ConfigError::Validation(format!("low stock threshold: {err}"))
        })?;
        self.view
            .sort
            .parse::<SortState>()
            .map_err(|err| ConfigError::Validation(err.to_string()))?;
        if let Some(id) = &self.view.home_id {
            id.parse::<HomeId>()
                .map_err(|err| ConfigError::Validation(format!("home id {id:?}: {err}")))?;
        }
        Ok(())
    }

    /// Return the configured home; `None` selects the first home.
    #[must_use]
    pub fn home_id(&self) -> Option<HomeId> {
        self.view.home_id.as_deref().and_then(|id| id.parse().ok())
    }

    /// Return the low-stock threshold; the default if the value is invalid.
    #[must_use]
    pub fn low_stock_threshold(&self) -> LowStockThreshold {
        LowStockThreshold::new(self.view.low_stock_threshold).unwrap_or_default()
    }

    /// Return the initial sort state; the default if the value is invalid.
    #[must_use]
    pub fn sort_state(&self) -> SortState {
        self.view.sort.parse().unwrap_or_default()
    }

    /// Return the initial filter state.
    #[must_use]
    pub fn filter_state(&self) -> FilterState {
        self.view
            .types
            .iter()
            .fold(FilterState::new().with_search(&self.view.search), |filter, id| {
                filter.with_type(*id)
            })
    }
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("homestock.json"),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            token_file: PathBuf::from(".homestock-token"),
            token: None,
        }
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            low_stock_threshold: LowStockThreshold::DEFAULT,
            search: String::new(),
            types: Vec::new(),
            sort: "name".to_string(),
            home_id: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "homestock=info".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
