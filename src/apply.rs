//! Materializes one [`CommitIntent`] as a real, date-pinned commit.

use crate::error::CommitError;
use crate::git::CommitBackend;
use crate::model::{Applied, CommitIntent};
use chrono::{DateTime, Utc};
use rand::Rng;
use std::fs;
use std::path::{Path, PathBuf};

/// Source of "now". Only used for artifact content, never for commit dates.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

pub struct CommitApplier<B, C = SystemClock> {
    backend: B,
    clock: C,
    workdir: PathBuf,
    artifact_dir: PathBuf,
}

impl<B: CommitBackend, C: Clock> CommitApplier<B, C> {
    pub fn new<P: AsRef<Path>, D: AsRef<Path>>(backend: B, clock: C, workdir: P, artifact_dir: D) -> Self {
        Self {
            backend,
            clock,
            workdir: workdir.as_ref().to_path_buf(),
            artifact_dir: artifact_dir.as_ref().to_path_buf(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Write a fresh artifact, stage only that file and commit it with both
    /// author and committer dates set to `intent.timestamp`.
    ///
    /// On failure after the artifact exists it is unstaged and removed, so the
    /// work tree is left as it was found.
    pub fn apply<R: Rng + ?Sized>(&self, intent: &CommitIntent, rng: &mut R) -> Result<Applied, CommitError> {
        let dir = self.workdir.join(&self.artifact_dir);
        fs::create_dir_all(&dir).map_err(|source| CommitError::ArtifactDir {
            path: dir.clone(),
            source,
        })?;

        let relative = self.unused_artifact_path(intent, rng);
        let absolute = self.workdir.join(&relative);
        let content = format!(
            "Activity recorded {} for {}\nRandom data: {}\n",
            self.clock.now().to_rfc3339(),
            intent.timestamp.to_rfc3339(),
            rng.gen_range(100_000..=999_999)
        );
        fs::write(&absolute, content).map_err(|source| CommitError::ArtifactWrite {
            path: absolute.clone(),
            source,
        })?;

        match self.stage_and_commit(intent, &relative) {
            Ok(commit) => Ok(Applied {
                commit,
                artifact: relative,
                timestamp: intent.timestamp,
            }),
            Err(err) => {
                if let Err(rollback) = self.backend.unstage(&relative) {
                    tracing::debug!(path = %relative.display(), error = %rollback, "unstage after failed commit");
                }
                if let Err(rollback) = fs::remove_file(&absolute) {
                    tracing::debug!(path = %absolute.display(), error = %rollback, "remove artifact after failed commit");
                }
                Err(err)
            }
        }
    }

    fn stage_and_commit(&self, intent: &CommitIntent, relative: &Path) -> Result<crate::model::CommitRef, CommitError> {
        self.backend.stage(relative)?;
        self.backend
            .commit(&intent.message, &[relative], &intent.timestamp, &intent.timestamp)
    }

    fn unused_artifact_path<R: Rng + ?Sized>(&self, intent: &CommitIntent, rng: &mut R) -> PathBuf {
        let stamp = intent.timestamp.format("%Y%m%d_%H%M%S");
        loop {
            let name = format!("activity_{stamp}_{:06}.txt", rng.gen_range(0..1_000_000u32));
            let candidate = self.artifact_dir.join(name);
            if !self.workdir.join(&candidate).exists() {
                return candidate;
            }
        }
    }
}
