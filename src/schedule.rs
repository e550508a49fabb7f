//! Turns a [`FillWindow`] into a lazy, day-by-day stream of commit intents.

use crate::model::{CommitIntent, DayPlan, FillWindow};
use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use rand::seq::SliceRandom;
use rand::Rng;

pub const DEFAULT_MESSAGES: &[&str] = &[
    "Update activity",
    "Add activity file",
    "Update documentation",
    "Fix minor issues",
    "Code improvements",
];

/// First and last hour (inclusive) a synthesized commit may be dated at.
pub const FIRST_HOUR: u32 = 9;
pub const LAST_HOUR: u32 = 20;

/// Commit messages to draw from. Never yields an empty string.
#[derive(Debug, Clone)]
pub struct MessagePool {
    messages: Vec<String>,
}

impl MessagePool {
    pub fn new(configured: &[String]) -> Self {
        let mut messages: Vec<String> = configured
            .iter()
            .map(|m| m.trim())
            .filter(|m| !m.is_empty())
            .map(str::to_string)
            .collect();
        if messages.is_empty() {
            messages = DEFAULT_MESSAGES.iter().map(|m| m.to_string()).collect();
        }
        Self { messages }
    }

    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        self.messages
            .choose(rng)
            .map(String::as_str)
            .unwrap_or(DEFAULT_MESSAGES[0])
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Default for MessagePool {
    fn default() -> Self {
        Self::new(&[])
    }
}

/// Lazily walks every calendar day of a window, one [`DayPlan`] per step.
pub struct Schedule<'a, R: Rng + ?Sized> {
    window: &'a FillWindow,
    messages: &'a MessagePool,
    rng: &'a mut R,
    cursor: Option<NaiveDate>,
}

impl<'a, R: Rng + ?Sized> Schedule<'a, R> {
    pub fn new(window: &'a FillWindow, messages: &'a MessagePool, rng: &'a mut R) -> Self {
        let cursor = (!window.is_empty()).then_some(window.start_date);
        Self {
            window,
            messages,
            rng,
            cursor,
        }
    }

    fn plan_day(&mut self, date: NaiveDate) -> DayPlan {
        if self.window.skips(date) {
            return DayPlan {
                date,
                skipped: true,
                intents: Vec::new(),
            };
        }

        let raw = self.window.pattern.raw_count(date, &mut *self.rng);
        let count = self.window.clamp(raw);

        let mut times: Vec<NaiveTime> = (0..count).map(|_| random_time(&mut *self.rng)).collect();
        times.sort();

        let intents = times
            .into_iter()
            .map(|time| CommitIntent {
                timestamp: pin(date.and_time(time), self.window.offset),
                message: self.messages.pick(&mut *self.rng).to_string(),
            })
            .collect();

        DayPlan {
            date,
            skipped: false,
            intents,
        }
    }
}

impl<R: Rng + ?Sized> Iterator for Schedule<'_, R> {
    type Item = DayPlan;

    fn next(&mut self) -> Option<Self::Item> {
        let date = self.cursor?;
        self.cursor = date.succ_opt().filter(|next| *next <= self.window.end_date);
        Some(self.plan_day(date))
    }
}

/// Flattened view of [`Schedule`]: every intent of the window in order.
pub fn generate<'a, R: Rng + ?Sized>(
    window: &'a FillWindow,
    messages: &'a MessagePool,
    rng: &'a mut R,
) -> impl Iterator<Item = CommitIntent> + 'a {
    Schedule::new(window, messages, rng).flat_map(|day| day.intents)
}

fn random_time<R: Rng + ?Sized>(rng: &mut R) -> NaiveTime {
    let hour = rng.gen_range(FIRST_HOUR..=LAST_HOUR);
    let minute = rng.gen_range(0..=59);
    let second = rng.gen_range(0..=59);
    NaiveTime::from_hms_opt(hour, minute, second).unwrap_or_default()
}

/// Interpret a wall-clock time as local to `offset`.
pub fn pin(local: NaiveDateTime, offset: FixedOffset) -> DateTime<FixedOffset> {
    let utc = local - Duration::seconds(i64::from(offset.local_minus_utc()));
    DateTime::from_naive_utc_and_offset(utc, offset)
}
