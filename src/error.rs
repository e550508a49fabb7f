use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GfillError>;

#[derive(Error, Debug)]
pub enum GfillError {
    #[error("Repository precondition failed: {0}")]
    Precondition(String),
    #[error("Git repository error: {0}")]
    GitRepo(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Object find with conversion error: {0}")]
    ObjectFindConv(#[from] Box<gix::object::find::existing::with_conversion::Error>),
    #[error("Commit decode error: {0}")]
    CommitDecode(#[from] Box<gix::object::commit::Error>),
    #[error("Object decode error: {0}")]
    ObjectDecode(#[from] Box<gix::objs::decode::Error>),
}

/// Problems with the configuration file. Fatal to a run: nothing is scheduled.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed configuration in {}: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("empty date window: start_date {start} is after end_date {end}")]
    EmptyWindow { start: String, end: String },
    #[error("min_commits_per_day must be at least 1")]
    ZeroMinimum,
    #[error("min_commits_per_day ({min}) exceeds max_commits_per_day ({max})")]
    InvertedCounts { min: u32, max: u32 },
    #[error("utc_offset_minutes {0} is outside -1439..=1439")]
    InvalidOffset(i32),
}

/// One commit intent could not be applied. The run logs it and moves on.
#[derive(Error, Debug)]
pub enum CommitError {
    #[error("cannot create artifact directory {}: {source}", .path.display())]
    ArtifactDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot write artifact {}: {source}", .path.display())]
    ArtifactWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("git add rejected {}: {stderr}", .path.display())]
    Stage { path: PathBuf, stderr: String },
    #[error("git commit failed for {message:?}: {stderr}")]
    Commit { message: String, stderr: String },
    #[error("cannot read back new commit id: {0}")]
    RevParse(String),
    #[error("failed to run git: {0}")]
    Spawn(#[source] std::io::Error),
}

/// Push to the remote failed. Reported once; the run is otherwise successful.
#[derive(Error, Debug)]
pub enum PushError {
    #[error("remote '{name}' is not configured: {reason}")]
    NoRemote { name: String, reason: String },
    #[error("HEAD is detached; no branch to push")]
    DetachedHead,
    #[error("cannot resolve current branch: {0}")]
    Branch(String),
    #[error("git push to '{remote}' failed: {stderr}")]
    Rejected { remote: String, stderr: String },
    #[error("failed to run git: {0}")]
    Spawn(#[source] std::io::Error),
}

// Manual From implementations for unboxed to boxed conversions
impl From<gix::object::find::existing::with_conversion::Error> for GfillError {
    fn from(err: gix::object::find::existing::with_conversion::Error) -> Self {
        GfillError::ObjectFindConv(Box::new(err))
    }
}

impl From<gix::object::commit::Error> for GfillError {
    fn from(err: gix::object::commit::Error) -> Self {
        GfillError::CommitDecode(Box::new(err))
    }
}

impl From<gix::objs::decode::Error> for GfillError {
    fn from(err: gix::objs::decode::Error) -> Self {
        GfillError::ObjectDecode(Box::new(err))
    }
}
