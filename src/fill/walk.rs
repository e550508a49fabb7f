use super::output::Reporter;
use crate::apply::{Clock, CommitApplier};
use crate::git::CommitBackend;
use crate::model::FillWindow;
use crate::schedule::{MessagePool, Schedule};
use rand::Rng;

/// Progress is reported every this many processed (non-skipped) days.
pub const PROGRESS_EVERY_DAYS: u64 = 30;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FillStats {
    pub days_in_window: u64,
    pub days_processed: u64,
    pub days_skipped: u64,
    pub commits_created: u64,
    pub commits_failed: u64,
}

impl FillStats {
    pub fn attempted(&self) -> u64 {
        self.commits_created + self.commits_failed
    }
}

/// Walk every day of `window`, applying each intent in order.
///
/// A failed commit is reported and skipped; it never stops the walk.
pub fn fill_window<B, C, R, A>(
    applier: &CommitApplier<B, C>,
    window: &FillWindow,
    messages: &MessagePool,
    schedule_rng: &mut R,
    artifact_rng: &mut A,
    reporter: &Reporter,
) -> FillStats
where
    B: CommitBackend,
    C: Clock,
    R: Rng + ?Sized,
    A: Rng + ?Sized,
{
    let mut stats = FillStats {
        days_in_window: window.day_count(),
        ..FillStats::default()
    };

    for day in Schedule::new(window, messages, schedule_rng) {
        reporter.tick_day();
        if day.skipped {
            stats.days_skipped += 1;
            tracing::debug!(date = %day.date, "weekend skipped");
            continue;
        }

        for intent in &day.intents {
            match applier.apply(intent, artifact_rng) {
                Ok(applied) => {
                    stats.commits_created += 1;
                    tracing::debug!(commit = %applied.commit, timestamp = %applied.timestamp, "commit created");
                    reporter.committed(intent, &applied);
                }
                Err(err) => {
                    stats.commits_failed += 1;
                    tracing::warn!(date = %day.date, error = %err, "commit failed");
                    reporter.failed(intent, &err);
                }
            }
        }

        stats.days_processed += 1;
        if stats.days_processed % PROGRESS_EVERY_DAYS == 0 {
            tracing::info!(
                through = %day.date,
                days = stats.days_processed,
                commits = stats.commits_created,
                "progress"
            );
            reporter.progress(day.date, &stats);
        }
    }

    reporter.finish();
    stats
}
