use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Utc, Weekday};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

pub const SCHEMA_VERSION: u32 = 1;

/// Per-day commit volume policy. Unknown names fall back to `Default`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActivityPattern {
    Random,
    Weekday,
    Consistent,
    Default,
}

impl ActivityPattern {
    /// Raw commit count for `day`, before clamping to the window's bounds.
    pub fn raw_count<R: Rng + ?Sized>(self, day: NaiveDate, rng: &mut R) -> u32 {
        match self {
            ActivityPattern::Random => rng.gen_range(1..=10),
            ActivityPattern::Weekday if is_weekend(day) => rng.gen_range(1..=5),
            ActivityPattern::Weekday => rng.gen_range(3..=10),
            ActivityPattern::Consistent => rng.gen_range(2..=5),
            ActivityPattern::Default => rng.gen_range(1..=5),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ActivityPattern::Random => "random",
            ActivityPattern::Weekday => "weekday",
            ActivityPattern::Consistent => "consistent",
            ActivityPattern::Default => "default",
        }
    }
}

impl From<String> for ActivityPattern {
    fn from(name: String) -> Self {
        match name.trim().to_lowercase().as_str() {
            "random" => ActivityPattern::Random,
            "weekday" => ActivityPattern::Weekday,
            "consistent" => ActivityPattern::Consistent,
            _ => ActivityPattern::Default,
        }
    }
}

impl From<ActivityPattern> for String {
    fn from(pattern: ActivityPattern) -> Self {
        pattern.as_str().to_string()
    }
}

impl fmt::Display for ActivityPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn is_weekend(day: NaiveDate) -> bool {
    matches!(day.weekday(), Weekday::Sat | Weekday::Sun)
}

/// The calendar window to backfill and the volume policy applied to each day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillWindow {
    pub start_date: NaiveDate,
    /// Inclusive.
    pub end_date: NaiveDate,
    pub min_commits_per_day: u32,
    pub max_commits_per_day: u32,
    pub pattern: ActivityPattern,
    pub include_weekends: bool,
    pub offset: FixedOffset,
}

impl FillWindow {
    pub fn is_empty(&self) -> bool {
        self.start_date > self.end_date
    }

    pub fn day_count(&self) -> u64 {
        if self.is_empty() {
            0
        } else {
            (self.end_date - self.start_date).num_days() as u64 + 1
        }
    }

    pub fn skips(&self, day: NaiveDate) -> bool {
        !self.include_weekends && is_weekend(day)
    }

    /// Clamp, not reject: values outside the bounds are moved onto them.
    pub fn clamp(&self, raw: u32) -> u32 {
        raw.max(self.min_commits_per_day).min(self.max_commits_per_day)
    }
}

/// A planned commit: when it is dated and what it says.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitIntent {
    pub timestamp: DateTime<FixedOffset>,
    pub message: String,
}

/// Everything the schedule decided for one calendar day.
#[derive(Debug, Clone)]
pub struct DayPlan {
    pub date: NaiveDate,
    pub skipped: bool,
    pub intents: Vec<CommitIntent>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRef(pub String);

impl CommitRef {
    pub fn short(&self) -> &str {
        self.0.get(..7).unwrap_or(self.0.as_str())
    }
}

impl fmt::Display for CommitRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone)]
pub struct Applied {
    pub commit: CommitRef,
    pub artifact: PathBuf,
    pub timestamp: DateTime<FixedOffset>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pushed {
    pub remote: String,
    pub branch: String,
    pub authenticated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PushOutcome {
    Pushed { remote: String, branch: String },
    SkippedNoCredential,
    Disabled,
    Failed { reason: String },
    NotAttempted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RunStatus {
    Completed,
    Disabled,
    Aborted { reason: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub repository_path: String,
    pub status: RunStatus,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub days_in_window: u64,
    pub days_processed: u64,
    pub days_skipped: u64,
    pub commits_created: u64,
    pub commits_failed: u64,
    pub push: PushOutcome,
}

impl RunSummary {
    pub fn new(repository_path: String, status: RunStatus) -> Self {
        Self {
            version: SCHEMA_VERSION,
            generated_at: Utc::now(),
            repository_path,
            status,
            start_date: None,
            end_date: None,
            days_in_window: 0,
            days_processed: 0,
            days_skipped: 0,
            commits_created: 0,
            commits_failed: 0,
            push: PushOutcome::NotAttempted,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PlanEntry {
    pub date: NaiveDate,
    pub timestamp: DateTime<FixedOffset>,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlanOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub pattern: ActivityPattern,
    pub min_commits_per_day: u32,
    pub max_commits_per_day: u32,
    pub include_weekends: bool,
    pub active_days: u64,
    pub total_commits: u64,
    pub entries: Vec<PlanEntry>,
}
