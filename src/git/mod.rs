mod cli;
mod repo;

pub use cli::{git_date, CommitBackend, GitCli};
pub use repo::GitRepo;
