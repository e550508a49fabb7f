use crate::error::{GfillError, PushError, Result};
use chrono::{DateTime, FixedOffset};
use gix::{ObjectId, Repository};
use std::path::{Path, PathBuf};

pub struct GitRepo {
    repo: Repository,
    path: PathBuf,
}

impl GitRepo {
    /// Open the repository rooted exactly at `path`.
    ///
    /// This is the precondition check for a run: the directory must exist and
    /// hold a non-bare repository. Parent directories are not searched.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(GfillError::Precondition(format!(
                "repository path does not exist: {}",
                path.display()
            )));
        }

        let repo = gix::open(path).map_err(|e| {
            GfillError::Precondition(format!("not a git repository: {} ({e})", path.display()))
        })?;
        let workdir = repo.workdir().ok_or_else(|| {
            GfillError::Precondition(format!("repository has no work tree: {}", path.display()))
        })?;
        let path = workdir.to_path_buf();

        Ok(Self { repo, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Short name of the checked-out branch. `None` when HEAD is detached.
    pub fn branch(&self) -> std::result::Result<Option<String>, PushError> {
        let head = self
            .repo
            .head_name()
            .map_err(|e| PushError::Branch(e.to_string()))?;
        Ok(head.map(|name| name.shorten().to_string()))
    }

    /// Push URL of `remote`, falling back to its fetch URL.
    pub fn remote_url(&self, remote: &str) -> std::result::Result<String, PushError> {
        let found = self
            .repo
            .find_remote(remote)
            .map_err(|e| PushError::NoRemote {
                name: remote.to_string(),
                reason: e.to_string(),
            })?;

        let url = found
            .url(gix::remote::Direction::Push)
            .or_else(|| found.url(gix::remote::Direction::Fetch))
            .ok_or_else(|| PushError::NoRemote {
                name: remote.to_string(),
                reason: "no url configured".to_string(),
            })?;

        Ok(url.to_bstring().to_string())
    }

    /// Recorded committer time of `commit_id`, in the offset it was written with.
    pub fn commit_time(&self, commit_id: &str) -> Result<DateTime<FixedOffset>> {
        let oid = ObjectId::from_hex(commit_id.trim().as_bytes())
            .map_err(|e| GfillError::Parse(format!("Invalid commit ID: {e}")))?;
        let commit = self.repo.find_commit(oid)?;
        let time = commit.time()?;

        let offset = FixedOffset::east_opt(time.offset)
            .ok_or_else(|| GfillError::InvalidDate(format!("Invalid offset: {}", time.offset)))?;
        DateTime::from_timestamp(time.seconds, 0)
            .map(|dt| dt.with_timezone(&offset))
            .ok_or_else(|| GfillError::InvalidDate(format!("Invalid timestamp: {}", time.seconds)))
    }

    /// Subject line of the HEAD commit; `None` on an unborn branch.
    pub fn head_message(&self) -> Result<Option<String>> {
        let mut head = self
            .repo
            .head()
            .map_err(|e| GfillError::GitRepo(e.to_string()))?;
        if head.is_unborn() {
            return Ok(None);
        }
        let commit = head
            .peel_to_commit_in_place()
            .map_err(|e| GfillError::GitRepo(e.to_string()))?;
        let message = commit.message()?;
        Ok(Some(message.title.to_string().trim_end().to_string()))
    }
}
