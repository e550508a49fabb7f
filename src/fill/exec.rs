use super::output::{output_json, output_summary, Reporter};
use super::walk::fill_window;
use crate::apply::{CommitApplier, SystemClock};
use crate::cli::CommonArgs;
use crate::config::Config;
use crate::git::{GitCli, GitRepo};
use crate::model::{PushOutcome, RunStatus, RunSummary};
use crate::publish::{self, redact_url, Credential};
use crate::schedule::MessagePool;
use chrono::{NaiveDate, Utc};
use console::style;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Debug, Clone, Default)]
pub struct FillOptions {
    pub seed: Option<u64>,
    pub no_push: bool,
    pub json: bool,
    pub credential: Option<Credential>,
}

pub fn exec(common: CommonArgs, options: FillOptions) -> anyhow::Result<()> {
    let today = Utc::now().date_naive();
    let summary = run(&common, &options, today);

    if options.json {
        output_json(&summary)
    } else {
        output_summary(&summary)
    }
}

/// The whole pipeline. Configuration and precondition failures end the run
/// early with an `Aborted` summary; commit and push failures only show up in
/// the counts.
pub fn run(common: &CommonArgs, options: &FillOptions, today: NaiveDate) -> RunSummary {
    let config = match Config::load(&common.config) {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(error = %err, "cannot load configuration");
            return RunSummary::new(String::new(), RunStatus::Aborted { reason: err.to_string() });
        }
    };

    let repo_path = match config.resolved_repository(common.repo.as_deref()) {
        Ok(path) => path,
        Err(err) => {
            tracing::error!(error = %err, "cannot resolve repository path");
            return RunSummary::new(String::new(), RunStatus::Aborted { reason: err.to_string() });
        }
    };
    let display_path = repo_path.to_string_lossy().to_string();

    let fill = &config.fill_contributions;
    if !fill.enabled {
        tracing::info!("fill_contributions.enabled is false; nothing to do");
        return RunSummary::new(display_path, RunStatus::Disabled);
    }

    let window = match fill.window(today) {
        Ok(window) => window,
        Err(err) => {
            tracing::error!(error = %err, "invalid fill window");
            return RunSummary::new(display_path, RunStatus::Aborted { reason: err.to_string() });
        }
    };

    let repo = match GitRepo::open(&repo_path) {
        Ok(repo) => repo,
        Err(err) => {
            tracing::error!(error = %err, "repository precondition failed");
            return RunSummary::new(display_path, RunStatus::Aborted { reason: err.to_string() });
        }
    };

    let mut summary = RunSummary::new(repo.path().to_string_lossy().to_string(), RunStatus::Completed);
    summary.start_date = Some(window.start_date);
    summary.end_date = Some(window.end_date);

    if !options.json {
        print_banner(&repo, &config, &window);
    }
    tracing::info!(
        start = %window.start_date,
        end = %window.end_date,
        pattern = %window.pattern,
        min = window.min_commits_per_day,
        max = window.max_commits_per_day,
        weekends = window.include_weekends,
        "starting backfill"
    );

    let (mut schedule_rng, mut artifact_rng) = match options.seed {
        Some(seed) => (
            StdRng::seed_from_u64(seed),
            StdRng::seed_from_u64(seed.wrapping_add(1)),
        ),
        None => (StdRng::from_entropy(), StdRng::from_entropy()),
    };

    let git = GitCli::new(repo.path());
    let applier = CommitApplier::new(git.clone(), SystemClock, repo.path(), &config.artifact_dir);
    let messages = MessagePool::new(&config.commit_messages);
    let reporter = if options.json {
        Reporter::hidden()
    } else {
        Reporter::new(window.day_count())
    };

    let stats = fill_window(
        &applier,
        &window,
        &messages,
        &mut schedule_rng,
        &mut artifact_rng,
        &reporter,
    );
    summary.days_in_window = stats.days_in_window;
    summary.days_processed = stats.days_processed;
    summary.days_skipped = stats.days_skipped;
    summary.commits_created = stats.commits_created;
    summary.commits_failed = stats.commits_failed;

    summary.push = if !config.auto_push || options.no_push {
        PushOutcome::Disabled
    } else {
        match options.credential.as_ref() {
            None => {
                tracing::warn!("GITHUB_TOKEN is not set; skipping push");
                PushOutcome::SkippedNoCredential
            }
            Some(credential) => match publish::push(&repo, &git, &config.remote, Some(credential)) {
                Ok(pushed) => PushOutcome::Pushed {
                    remote: pushed.remote,
                    branch: pushed.branch,
                },
                Err(err) => {
                    tracing::warn!(error = %err, "push failed");
                    PushOutcome::Failed {
                        reason: err.to_string(),
                    }
                }
            },
        }
    };

    tracing::info!(
        days = summary.days_processed,
        commits = summary.commits_created,
        failed = summary.commits_failed,
        "backfill finished"
    );
    summary
}

fn print_banner(repo: &GitRepo, config: &Config, window: &crate::model::FillWindow) {
    println!("{}", "═".repeat(60));
    println!("{}", style("Contribution backfill").bold());
    println!("{}", "═".repeat(60));
    println!("Repository: {}", repo.path().display());
    if let Ok(Some(branch)) = repo.branch() {
        println!("Branch: {branch}");
    }
    if let Ok(url) = repo.remote_url(&config.remote) {
        println!("Remote: {} ({})", config.remote, redact_url(&url));
    }
    println!(
        "Window: {} to {}, pattern {}, {}-{} commits/day{}",
        window.start_date,
        window.end_date,
        window.pattern,
        window.min_commits_per_day,
        window.max_commits_per_day,
        if window.include_weekends { "" } else { ", weekdays only" }
    );
    println!("{}", "═".repeat(60));
}
