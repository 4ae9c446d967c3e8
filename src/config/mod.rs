use crate::core::store::DEFAULT_NAMESPACE;
use crate::core::watch::DEFAULT_SCAN_INTERVAL_SECS;
use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

/// Environment variable overriding the configuration directory.
pub const HOME_ENV: &str = "RCOMPANION_HOME";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_namespace")]
    pub namespace: String,
    #[serde(default)]
    pub current_user: Option<String>,
    #[serde(default = "default_scan_interval")]
    pub scan_interval_secs: u64,
    #[serde(default = "default_class_lead")]
    pub class_lead_minutes: i64,
    #[serde(default = "default_due_soon")]
    pub due_soon_hours: i64,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}
fn default_scan_interval() -> u64 {
    DEFAULT_SCAN_INTERVAL_SECS
}
fn default_class_lead() -> i64 {
    15
}
fn default_due_soon() -> i64 {
    24
}
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            namespace: default_namespace(),
            current_user: None,
            scan_interval_secs: default_scan_interval(),
            class_lead_minutes: default_class_lead(),
            due_soon_hours: default_due_soon(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Return the configuration directory ($RCOMPANION_HOME or ~/.rcompanion)
    pub fn config_dir() -> PathBuf {
        if let Ok(dir) = env::var(HOME_ENV)
            && !dir.trim().is_empty()
        {
            return expand_tilde(&dir);
        }

        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".rcompanion")
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rcompanion.conf")
    }

    /// Return the default path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rcompanion.sqlite")
    }

    /// Load configuration from file, or return defaults if not found.
    /// Fields missing from an older file take their default value.
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        let mut cfg: Config = serde_yaml::from_str(&content)?;
        cfg.database = expand_tilde(&cfg.database).to_string_lossy().to_string();
        Ok(cfg)
    }

    /// Write the configuration file, creating its directory if needed.
    pub fn save(&self) -> AppResult<()> {
        fs::create_dir_all(Self::config_dir())?;
        let yaml = serde_yaml::to_string(self)?;
        fs::write(Self::config_file(), yaml)?;
        Ok(())
    }

    /// Initialize configuration file and database location.
    /// Returns the database path that was configured.
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> AppResult<PathBuf> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        // DB path: user provided (absolute or relative to the config dir) or default
        let db_path = match custom_db {
            Some(name) => {
                let p = expand_tilde(&name);
                if p.is_absolute() { p } else { dir.join(p) }
            }
            None => Self::database_file(),
        };

        if !is_test {
            let mut cfg = if Self::config_file().exists() {
                Self::load()?
            } else {
                Self::default()
            };
            cfg.database = db_path.to_string_lossy().to_string();
            cfg.save()?;
        }

        Ok(db_path)
    }

    /// The user whose data is active: the `--user` flag wins over the
    /// logged-in user stored in the config file.
    pub fn resolve_user(&self, flag: Option<&str>) -> AppResult<String> {
        flag.map(str::to_string)
            .or_else(|| self.current_user.clone())
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())
            .ok_or(AppError::NotLoggedIn)
    }

    pub fn check(&self) -> AppResult<()> {
        if self.scan_interval_secs == 0 {
            return Err(AppError::Config("scan_interval_secs must be > 0".into()));
        }
        if self.class_lead_minutes <= 0 || self.due_soon_hours <= 0 {
            return Err(AppError::Config(
                "class_lead_minutes and due_soon_hours must be > 0".into(),
            ));
        }
        Ok(())
    }
}
