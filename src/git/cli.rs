use crate::error::{CommitError, PushError};
use crate::model::CommitRef;
use chrono::{DateTime, FixedOffset};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Write side of the repository: staging and date-pinned commits.
pub trait CommitBackend {
    fn stage(&self, path: &Path) -> Result<(), CommitError>;

    /// Drop `path` from the index again. Best effort; used to roll back a failed apply.
    fn unstage(&self, path: &Path) -> Result<(), CommitError>;

    /// Record a commit of exactly `paths` with both dates pinned.
    fn commit(
        &self,
        message: &str,
        paths: &[&Path],
        author_date: &DateTime<FixedOffset>,
        commit_date: &DateTime<FixedOffset>,
    ) -> Result<CommitRef, CommitError>;
}

/// Drives the `git` executable inside a work tree.
#[derive(Debug, Clone)]
pub struct GitCli {
    workdir: PathBuf,
}

impl GitCli {
    pub fn new<P: AsRef<Path>>(workdir: P) -> Self {
        Self {
            workdir: workdir.as_ref().to_path_buf(),
        }
    }

    fn git(&self) -> Command {
        let mut cmd = Command::new("git");
        cmd.current_dir(&self.workdir);
        cmd
    }

    fn run<I, S>(&self, args: I) -> std::io::Result<Output>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.git().args(args).output()
    }

    /// `git push` of `refspec` to `target`, which may be a remote name or a URL.
    ///
    /// A token never appears on the command line: it travels in
    /// `GFILL_PUSH_TOKEN` and is handed to git by an inline credential helper
    /// that replaces any configured ones.
    pub fn push_command(&self, target: &str, refspec: &str, token: Option<&str>) -> Command {
        let mut cmd = self.git();
        cmd.env("GIT_TERMINAL_PROMPT", "0");
        if let Some(token) = token {
            cmd.env(TOKEN_ENV, token)
                .args(["-c", "credential.helper=", "-c"])
                .arg(format!("credential.helper={TOKEN_HELPER}"));
        }
        cmd.args(["push", "--porcelain", target, refspec]);
        cmd
    }

    /// Never forced; never prompts for credentials.
    pub fn push(&self, target: &str, refspec: &str, token: Option<&str>) -> Result<(), PushError> {
        let output = self
            .push_command(target, refspec, token)
            .output()
            .map_err(PushError::Spawn)?;

        if output.status.success() {
            Ok(())
        } else {
            Err(PushError::Rejected {
                remote: target.to_string(),
                stderr: stderr_of(&output),
            })
        }
    }

    /// `(dirty, untracked)` from `git status --porcelain`.
    pub fn status(&self) -> std::io::Result<(bool, usize)> {
        let output = self.run(["status", "--porcelain"])?;
        if !output.status.success() {
            return Err(std::io::Error::other(stderr_of(&output)));
        }
        let text = String::from_utf8_lossy(&output.stdout);
        let untracked = text.lines().filter(|l| l.starts_with("??")).count();
        let dirty = text.lines().any(|l| !l.trim().is_empty());
        Ok((dirty, untracked))
    }
}

impl CommitBackend for GitCli {
    fn stage(&self, path: &Path) -> Result<(), CommitError> {
        let output = self
            .git()
            .args(["add", "--"])
            .arg(path)
            .output()
            .map_err(CommitError::Spawn)?;
        if output.status.success() {
            Ok(())
        } else {
            Err(CommitError::Stage {
                path: path.to_path_buf(),
                stderr: stderr_of(&output),
            })
        }
    }

    fn unstage(&self, path: &Path) -> Result<(), CommitError> {
        let output = self
            .git()
            .args(["rm", "--cached", "--quiet", "--ignore-unmatch", "--"])
            .arg(path)
            .output()
            .map_err(CommitError::Spawn)?;
        if output.status.success() {
            Ok(())
        } else {
            Err(CommitError::Stage {
                path: path.to_path_buf(),
                stderr: stderr_of(&output),
            })
        }
    }

    fn commit(
        &self,
        message: &str,
        paths: &[&Path],
        author_date: &DateTime<FixedOffset>,
        commit_date: &DateTime<FixedOffset>,
    ) -> Result<CommitRef, CommitError> {
        let output = self
            .git()
            .env("GIT_AUTHOR_DATE", git_date(author_date))
            .env("GIT_COMMITTER_DATE", git_date(commit_date))
            .args(["commit", "--quiet", "-m", message, "--"])
            .args(paths)
            .output()
            .map_err(CommitError::Spawn)?;
        if !output.status.success() {
            let mut stderr = stderr_of(&output);
            if stderr.is_empty() {
                stderr = String::from_utf8_lossy(&output.stdout).trim().to_string();
            }
            return Err(CommitError::Commit {
                message: message.to_string(),
                stderr,
            });
        }

        let head = self
            .run(["rev-parse", "HEAD"])
            .map_err(CommitError::Spawn)?;
        if !head.status.success() {
            return Err(CommitError::RevParse(stderr_of(&head)));
        }
        Ok(CommitRef(String::from_utf8_lossy(&head.stdout).trim().to_string()))
    }
}

/// Environment variable the push token is passed in.
pub const TOKEN_ENV: &str = "GFILL_PUSH_TOKEN";

/// Answers `get` with the token as the password of `x-access-token`.
const TOKEN_HELPER: &str = r#"!f() { test "$1" = get && printf 'username=x-access-token\npassword=%s\n' "$GFILL_PUSH_TOKEN"; }; f"#;

/// Git's internal date format: `@<unix seconds> <+hhmm>`.
pub fn git_date(ts: &DateTime<FixedOffset>) -> String {
    format!("@{} {}", ts.timestamp(), ts.format("%z"))
}

fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).trim().to_string()
}
