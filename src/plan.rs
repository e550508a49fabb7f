use crate::cli::CommonArgs;
use crate::config::Config;
use crate::model::{FillWindow, PlanEntry, PlanOutput, SCHEMA_VERSION};
use crate::schedule::{MessagePool, Schedule};
use anyhow::Context;
use chrono::Utc;
use console::style;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Print the schedule a `fill` run would apply, without touching the repository.
pub fn exec(common: CommonArgs, seed: Option<u64>, json: bool, ndjson: bool) -> anyhow::Result<()> {
    let config = Config::load(&common.config).context("Failed to load configuration")?;
    let window = config
        .fill_contributions
        .window(Utc::now().date_naive())
        .context("Invalid fill window")?;

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let messages = MessagePool::new(&config.commit_messages);
    let plan = build_plan(&window, &messages, &mut rng);

    if json {
        output_json(&plan)?;
    } else if ndjson {
        output_ndjson(&plan)?;
    } else {
        output_table(&plan, config.fill_contributions.enabled)?;
    }
    Ok(())
}

pub fn build_plan(window: &FillWindow, messages: &MessagePool, rng: &mut StdRng) -> PlanOutput {
    let mut entries = Vec::new();
    let mut active_days = 0u64;

    for day in Schedule::new(window, messages, rng) {
        if !day.intents.is_empty() {
            active_days += 1;
        }
        entries.extend(day.intents.into_iter().map(|intent| PlanEntry {
            date: day.date,
            timestamp: intent.timestamp,
            message: intent.message,
        }));
    }

    PlanOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        start_date: window.start_date,
        end_date: window.end_date,
        pattern: window.pattern,
        min_commits_per_day: window.min_commits_per_day,
        max_commits_per_day: window.max_commits_per_day,
        include_weekends: window.include_weekends,
        active_days,
        total_commits: entries.len() as u64,
        entries,
    }
}

fn output_json(plan: &PlanOutput) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(plan)?);
    Ok(())
}

fn output_ndjson(plan: &PlanOutput) -> anyhow::Result<()> {
    for entry in &plan.entries {
        println!("{}", serde_json::to_string(entry)?);
    }
    Ok(())
}

fn output_table(plan: &PlanOutput, enabled: bool) -> anyhow::Result<()> {
    if !enabled {
        println!(
            "{}",
            style("Note: fill_contributions.enabled is false; `fill` would do nothing").yellow()
        );
    }
    println!(
        "{:<12} {:>7}  {}",
        style("Date").bold(),
        style("Commits").bold(),
        style("Times").bold()
    );
    println!("{}", "─".repeat(60));

    let mut idx = 0;
    while idx < plan.entries.len() {
        let date = plan.entries[idx].date;
        let day: Vec<&PlanEntry> = plan.entries[idx..]
            .iter()
            .take_while(|e| e.date == date)
            .collect();
        let times: Vec<String> = day
            .iter()
            .map(|e| e.timestamp.format("%H:%M").to_string())
            .collect();
        println!("{:<12} {:>7}  {}", date, day.len(), style(times.join(" ")).dim());
        idx += day.len();
    }

    println!(
        "\n{} commits over {} active days ({} to {}, pattern {})",
        style(plan.total_commits).cyan(),
        style(plan.active_days).cyan(),
        plan.start_date,
        plan.end_date,
        plan.pattern
    );
    Ok(())
}
