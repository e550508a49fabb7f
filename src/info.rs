use crate::cli::CommonArgs;
use crate::config::Config;
use crate::error::ConfigError;
use crate::git::{GitCli, GitRepo};
use crate::publish::redact_url;
use anyhow::Context;
use console::style;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct RepoInfo {
    pub repository_path: String,
    pub branch: Option<String>,
    pub remote: String,
    pub remote_url: Option<String>,
    pub is_dirty: bool,
    pub untracked_files: usize,
    pub last_commit: Option<String>,
}

/// Show what `fill` would operate on. A missing config file is not an error here.
pub fn exec(common: CommonArgs, json: bool) -> anyhow::Result<()> {
    let config = match Config::load(&common.config) {
        Ok(config) => config,
        Err(ConfigError::NotFound(path)) => {
            tracing::debug!(path = %path.display(), "no configuration file; using defaults");
            Config::default()
        }
        Err(err) => return Err(err).context("Failed to load configuration"),
    };

    let path = config
        .resolved_repository(common.repo.as_deref())
        .context("Failed to resolve repository path")?;
    let repo = GitRepo::open(&path).context("Failed to open git repository")?;
    let info = collect(&repo, &config.remote)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        print_info(&info);
    }
    Ok(())
}

pub fn collect(repo: &GitRepo, remote: &str) -> anyhow::Result<RepoInfo> {
    let (is_dirty, untracked_files) = GitCli::new(repo.path())
        .status()
        .context("Failed to read working tree status")?;

    Ok(RepoInfo {
        repository_path: repo.path().to_string_lossy().to_string(),
        branch: repo.branch().ok().flatten(),
        remote: remote.to_string(),
        remote_url: repo.remote_url(remote).ok().map(|url| redact_url(&url)),
        is_dirty,
        untracked_files,
        last_commit: repo.head_message().context("Failed to read HEAD")?,
    })
}

fn print_info(info: &RepoInfo) {
    println!("{}", style("Repository").bold());
    println!("{}", "─".repeat(50));
    println!("Path: {}", info.repository_path);
    println!(
        "Branch: {}",
        info.branch.as_deref().unwrap_or("(detached HEAD)")
    );
    match &info.remote_url {
        Some(url) => println!("Remote: {} ({})", info.remote, url),
        None => println!("Remote: {} {}", info.remote, style("(not configured)").yellow()),
    }
    println!(
        "Working tree: {}, {} untracked",
        if info.is_dirty {
            style("dirty").yellow()
        } else {
            style("clean").green()
        },
        info.untracked_files
    );
    if let Some(title) = &info.last_commit {
        println!("Last commit: {}", style(title).dim());
    }
}
