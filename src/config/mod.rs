use crate::errors::{AppError, AppResult};
use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    /// Chat dates before this are ignored. Required by `ingest` unless `--since` is given.
    #[serde(default)]
    pub cutoff_date: Option<String>,
    /// Drop folder scanned by `ingest --inbox`.
    #[serde(default)]
    pub inbox_dir: Option<String>,
    #[serde(default = "default_subject_pattern")]
    pub subject_pattern: String,
    #[serde(default = "default_fetch_retries")]
    pub fetch_retries: u32,
    #[serde(default = "default_fetch_backoff_ms")]
    pub fetch_backoff_ms: u64,
    #[serde(default = "default_hours_per_day")]
    pub hours_per_day: u32,
}

fn default_subject_pattern() -> String {
    "WhatsApp Chat".to_string()
}
fn default_fetch_retries() -> u32 {
    3
}
fn default_fetch_backoff_ms() -> u64 {
    500
}
fn default_hours_per_day() -> u32 {
    8
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            cutoff_date: None,
            inbox_dir: None,
            subject_pattern: default_subject_pattern(),
            fetch_retries: default_fetch_retries(),
            fetch_backoff_ms: default_fetch_backoff_ms(),
            hours_per_day: default_hours_per_day(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory (`~/.rattendance`).
    pub fn config_dir() -> PathBuf {
        crate::utils::path::home_dir().join(".rattendance")
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rattendance.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rattendance.sqlite")
    }

    /// Load configuration from file, or return defaults if not found.
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
        Ok(serde_yaml::from_str(&content)?)
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        let yaml = serde_yaml::to_string(self)?;
        let mut file = fs::File::create(path).map_err(|_| AppError::ConfigSave)?;
        file.write_all(yaml.as_bytes())
            .map_err(|_| AppError::ConfigSave)?;
        Ok(())
    }

    /// Parsed cutoff, `None` when unset.
    pub fn cutoff(&self) -> AppResult<Option<NaiveDate>> {
        match self.cutoff_date.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .map(Some)
                .map_err(|_| AppError::Config(format!("cutoff_date '{}' is not a YYYY-MM-DD date", s))),
        }
    }

    /// Problems worth reporting before a run: (key, message).
    pub fn check(&self) -> Vec<(&'static str, String)> {
        let mut issues = Vec::new();

        match self.cutoff() {
            Ok(None) => issues.push((
                "cutoff_date",
                "not set: ingest will require --since".to_string(),
            )),
            Err(e) => issues.push(("cutoff_date", e.to_string())),
            Ok(Some(_)) => {}
        }

        match &self.inbox_dir {
            None => issues.push((
                "inbox_dir",
                "not set: ingest --inbox is unavailable".to_string(),
            )),
            Some(dir) if !Path::new(dir).is_dir() => {
                issues.push(("inbox_dir", format!("'{}' is not a directory", dir)))
            }
            _ => {}
        }

        if self.subject_pattern.trim().is_empty() {
            issues.push(("subject_pattern", "empty: every file would match".to_string()));
        }
        if self.hours_per_day == 0 {
            issues.push(("hours_per_day", "zero: working hours will always be 0".to_string()));
        }

        issues
    }

    /// Initialize configuration and database files.
    ///
    /// `custom_db` may be absolute or relative to the config directory.
    /// With `is_test` the config file is left alone.
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> AppResult<Self> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        let db_path = match custom_db {
            Some(name) => {
                let p = Path::new(&name);
                if p.is_absolute() {
                    p.to_path_buf()
                } else {
                    dir.join(p)
                }
            }
            None => Self::database_file(),
        };

        let year = Local::now().year();
        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            cutoff_date: Some(format!("{year:04}-01-01")),
            ..Default::default()
        };

        if !is_test {
            config.save_to(&Self::config_file())?;
        }

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }
        if !db_path.exists() {
            fs::File::create(&db_path)?;
        }

        Ok(config)
    }
}
