use super::walk::FillStats;
use crate::error::CommitError;
use crate::model::{Applied, CommitIntent, PushOutcome, RunStatus, RunSummary};
use chrono::NaiveDate;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::cell::RefCell;

/// Console side of a run: per-commit lines on stdout, a day bar on stderr.
pub struct Reporter {
    bar: ProgressBar,
    lines: bool,
    checkpoints: RefCell<Vec<NaiveDate>>,
}

impl Reporter {
    pub fn new(total_days: u64) -> Self {
        let bar = ProgressBar::new(total_days);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} days")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        Self {
            bar,
            lines: true,
            checkpoints: RefCell::default(),
        }
    }

    /// No bar and no lines; used for `--json` and in tests.
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
            lines: false,
            checkpoints: RefCell::default(),
        }
    }

    fn line(&self, text: String) {
        if self.lines {
            self.bar.suspend(|| println!("{text}"));
        }
    }

    pub fn tick_day(&self) {
        self.bar.inc(1);
    }

    pub fn committed(&self, intent: &CommitIntent, applied: &Applied) {
        self.line(format!(
            "{} {} {} {}",
            style("✓").green(),
            applied.timestamp.format("%Y-%m-%d %H:%M:%S %z"),
            style(applied.commit.short()).dim(),
            intent.message
        ));
    }

    pub fn failed(&self, intent: &CommitIntent, err: &CommitError) {
        self.line(format!(
            "{} {} {}",
            style("✗").red(),
            intent.timestamp.format("%Y-%m-%d %H:%M:%S %z"),
            style(err).red()
        ));
    }

    pub fn progress(&self, through: NaiveDate, stats: &FillStats) {
        self.checkpoints.borrow_mut().push(through);
        self.line(format!(
            "{} days processed through {}, {} commits created",
            style(stats.days_processed).cyan(),
            style(through).dim(),
            style(stats.commits_created).cyan()
        ));
    }

    /// Days on which a progress line was reported, in order.
    pub fn checkpoints(&self) -> Vec<NaiveDate> {
        self.checkpoints.borrow().clone()
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

pub fn output_json(summary: &RunSummary) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(summary)?);
    Ok(())
}

pub fn output_summary(summary: &RunSummary) -> anyhow::Result<()> {
    println!();
    println!("{}", style("Backfill Summary").bold());
    println!("{}", "─".repeat(50));

    match &summary.status {
        RunStatus::Completed => {}
        RunStatus::Disabled => {
            println!("{}", style("Filling is disabled in the configuration").yellow());
        }
        RunStatus::Aborted { reason } => {
            println!("{} {}", style("Aborted:").red().bold(), reason);
        }
    }

    if let (Some(start), Some(end)) = (summary.start_date, summary.end_date) {
        println!("Window: {} to {}", style(start).dim(), style(end).dim());
    }
    println!("Days processed: {}", style(summary.days_processed).cyan());
    println!("Days skipped: {}", style(summary.days_skipped).cyan());
    println!("Commits created: {}", style(summary.commits_created).green());
    if summary.commits_failed > 0 {
        println!("Commits failed: {}", style(summary.commits_failed).red());
    }

    match &summary.push {
        PushOutcome::Pushed { remote, branch } => {
            println!("Push: {} {}/{}", style("✓ pushed").green(), remote, branch);
        }
        PushOutcome::SkippedNoCredential => {
            println!(
                "Push: {} (set GITHUB_TOKEN or push manually)",
                style("⚠ skipped, no token").yellow()
            );
        }
        PushOutcome::Disabled => println!("Push: {}", style("disabled").dim()),
        PushOutcome::Failed { reason } => {
            println!("Push: {} {}", style("✗ failed").red(), reason);
            println!("You can push manually: git push <remote> <branch>");
        }
        PushOutcome::NotAttempted => println!("Push: {}", style("not attempted").dim()),
    }

    Ok(())
}
