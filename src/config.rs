use crate::error::ConfigError;
use crate::model::{ActivityPattern, FillWindow};
use chrono::{FixedOffset, NaiveDate};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "config.json";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub repository_path: PathBuf,
    pub remote: String,
    /// Directory, relative to the work tree, that receives the artifact files.
    pub artifact_dir: PathBuf,
    pub auto_push: bool,
    pub commit_messages: Vec<String>,
    pub fill_contributions: FillConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            repository_path: PathBuf::from("."),
            remote: "origin".to_string(),
            artifact_dir: PathBuf::from("activity"),
            auto_push: true,
            commit_messages: Vec::new(),
            fill_contributions: FillConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FillConfig {
    pub enabled: bool,
    pub start_date: Option<NaiveDate>,
    /// Defaults to the day the run starts.
    pub end_date: Option<NaiveDate>,
    pub min_commits_per_day: u32,
    pub max_commits_per_day: u32,
    pub activity_pattern: ActivityPattern,
    pub weekend_activity: bool,
    pub utc_offset_minutes: i32,
}

impl Default for FillConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            start_date: None,
            end_date: None,
            min_commits_per_day: 1,
            max_commits_per_day: 10,
            activity_pattern: ActivityPattern::Random,
            weekend_activity: true,
            utc_offset_minutes: 0,
        }
    }
}

impl FillConfig {
    pub fn default_start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default()
    }

    /// Build and validate the window. `today` stands in for a missing `end_date`.
    pub fn window(&self, today: NaiveDate) -> Result<FillWindow, ConfigError> {
        let start_date = self.start_date.unwrap_or_else(Self::default_start);
        let end_date = self.end_date.unwrap_or(today);

        if start_date > end_date {
            return Err(ConfigError::EmptyWindow {
                start: start_date.to_string(),
                end: end_date.to_string(),
            });
        }
        if self.min_commits_per_day == 0 {
            return Err(ConfigError::ZeroMinimum);
        }
        if self.min_commits_per_day > self.max_commits_per_day {
            return Err(ConfigError::InvertedCounts {
                min: self.min_commits_per_day,
                max: self.max_commits_per_day,
            });
        }
        let offset = FixedOffset::east_opt(self.utc_offset_minutes.saturating_mul(60))
            .ok_or(ConfigError::InvalidOffset(self.utc_offset_minutes))?;

        Ok(FillWindow {
            start_date,
            end_date,
            min_commits_per_day: self.min_commits_per_day,
            max_commits_per_day: self.max_commits_per_day,
            pattern: self.activity_pattern,
            include_weekends: self.weekend_activity,
            offset,
        })
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound(path.to_path_buf())
            } else {
                ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
        Self::parse(&raw, path)
    }

    pub fn parse(raw: &str, origin: &Path) -> Result<Self, ConfigError> {
        serde_json::from_str(raw).map_err(|source| ConfigError::Malformed {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Repository path, resolved against the directory the run started in.
    pub fn resolved_repository(&self, override_path: Option<&Path>) -> std::io::Result<PathBuf> {
        let path = override_path.unwrap_or(&self.repository_path);
        if path.is_absolute() {
            Ok(path.to_path_buf())
        } else {
            Ok(std::env::current_dir()?.join(path))
        }
    }
}
