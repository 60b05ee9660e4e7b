//! Configuration loading and root folder resolution
//!
//! Bootstrap configuration comes from a single TOML file. Every field has a
//! built-in default, so a missing file is not an error.
//!
//! Root folder priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable (`CINEMETRICS_ROOT`)
//! 3. TOML config file (`root_folder`)
//! 4. OS-dependent compiled default (fallback)

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Environment variable consulted for the root folder
pub const ROOT_ENV_VAR: &str = "CINEMETRICS_ROOT";

/// Catalog snapshot file name inside the root folder
pub const CATALOG_FILE: &str = "catalog.json";

/// Movie ID cache file name inside the root folder
pub const ID_CACHE_FILE: &str = "movie_ids_cache.json";

/// Bootstrap configuration loaded from TOML file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    /// Root folder holding the catalog snapshot, ID cache and exports
    pub root_folder: Option<PathBuf>,

    /// Directory for CSV exports (relative paths resolve against the root folder)
    pub analysis_dir: PathBuf,

    /// Maximum number of files loaded concurrently during import
    pub workers: usize,

    /// Number of top-billed cast members kept per movie
    pub cast_limit: usize,

    /// Logging configuration
    pub logging: LoggingConfig,

    /// Analysis thresholds
    pub analysis: AnalysisConfig,
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            root_folder: None,
            analysis_dir: PathBuf::from("analysis_results"),
            workers: 5,
            cast_limit: 15,
            logging: LoggingConfig::default(),
            analysis: AnalysisConfig::default(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log file path (optional, logs to stderr only if not specified)
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

/// Thresholds used by the catalog analyses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Studios with fewer qualifying movies are left out of studio performance
    pub min_studio_movies: usize,

    /// Minimum movie count for the basic "top studios" report
    pub min_basic_studio_movies: usize,

    /// Budget floor (USD, exclusive) for budget efficiency rows
    pub min_budget: f64,

    /// Maximum number of cast pairs reported
    pub cast_pair_limit: usize,

    /// Risk used when a studio's ROI spread is zero
    pub default_risk: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            min_studio_movies: 5,
            min_basic_studio_movies: 3,
            min_budget: 1_000_000.0,
            cast_pair_limit: 100,
            default_risk: 0.5,
        }
    }
}

impl TomlConfig {
    /// Validate values that have no meaningful zero or negative setting
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(Error::Config("workers must be at least 1".to_string()));
        }
        if self.analysis.default_risk <= 0.0 {
            return Err(Error::Config(format!(
                "analysis.default_risk must be positive, got {}",
                self.analysis.default_risk
            )));
        }
        if self.analysis.min_budget < 0.0 {
            return Err(Error::Config(format!(
                "analysis.min_budget must not be negative, got {}",
                self.analysis.min_budget
            )));
        }
        Ok(())
    }
}

/// Load TOML configuration
///
/// With an explicit path the file must exist. Without one, the platform
/// config file is used if present, otherwise built-in defaults.
pub fn load_toml_config(explicit: Option<&Path>) -> Result<TomlConfig> {
    let path = match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(Error::NotFound(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            path.to_path_buf()
        }
        None => match default_config_path() {
            Some(path) if path.exists() => path,
            _ => {
                debug!("No config file found, using built-in defaults");
                return Ok(TomlConfig::default());
            }
        },
    };

    let content = std::fs::read_to_string(&path)
        .map_err(|e| Error::Config(format!("Read TOML failed for {}: {}", path.display(), e)))?;
    let config: TomlConfig = toml::from_str(&content)?;
    config.validate()?;

    info!("Loaded TOML configuration from {}", path.display());
    Ok(config)
}

/// Write TOML configuration (temp file + rename)
pub fn write_toml_config(config: &TomlConfig, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(config)
        .map_err(|e| Error::Config(format!("Serialize TOML failed: {}", e)))?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let tmp_path = path.with_extension("toml.tmp");
    std::fs::write(&tmp_path, content)?;
    std::fs::rename(&tmp_path, path)?;
    Ok(())
}

/// Platform config file location (`<config_dir>/cinemetrics/config.toml`)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("cinemetrics").join("config.toml"))
}

/// Resolve the root folder following the documented priority order
pub fn resolve_root_folder(cli_arg: Option<&Path>, toml_config: &TomlConfig) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(ROOT_ENV_VAR) {
        if !path.trim().is_empty() {
            return PathBuf::from(path);
        }
    }

    // Priority 3: TOML config file
    if let Some(path) = &toml_config.root_folder {
        return path.clone();
    }

    // Priority 4: OS-dependent compiled default
    get_default_root_folder()
}

/// Get OS-dependent default root folder path
pub fn get_default_root_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("cinemetrics"))
        .unwrap_or_else(|| PathBuf::from("./cinemetrics_data"))
}

/// Resolved root folder and the files that live in it
#[derive(Debug, Clone)]
pub struct RootFolder {
    path: PathBuf,
}

impl RootFolder {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create root folder directory if missing
    pub fn ensure_directory_exists(&self) -> Result<()> {
        if !self.path.exists() {
            std::fs::create_dir_all(&self.path)?;
            info!("Created root folder: {}", self.path.display());
        }
        Ok(())
    }

    pub fn catalog_path(&self) -> PathBuf {
        self.path.join(CATALOG_FILE)
    }

    pub fn id_cache_path(&self) -> PathBuf {
        self.path.join(ID_CACHE_FILE)
    }

    /// Export directory; relative config values resolve against the root folder
    pub fn analysis_dir(&self, configured: &Path) -> PathBuf {
        if configured.is_absolute() {
            configured.to_path_buf()
        } else {
            self.path.join(configured)
        }
    }
}
