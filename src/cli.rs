use crate::config::DEFAULT_CONFIG_PATH;
use crate::fill::FillOptions;
use crate::publish::Credential;
use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gfill")]
#[command(about = "Backfill a git repository with date-pinned commits for contribution graphs")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone, Debug)]
pub struct CommonArgs {
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH, help = "Path to the JSON configuration file")]
    pub config: PathBuf,

    #[arg(long, global = true, help = "Path to git repository (overrides repository_path)")]
    pub repo: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the backfill commits and push them
    Fill {
        #[arg(long, help = "Seed for a reproducible schedule")]
        seed: Option<u64>,

        #[arg(long, help = "Do not push even if auto_push is enabled")]
        no_push: bool,

        #[arg(long, help = "Print the run summary as JSON")]
        json: bool,

        #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true, help = "Access token used to push over HTTPS")]
        token: Option<String>,
    },
    /// Print the schedule without creating commits
    Plan {
        #[arg(long, help = "Seed for a reproducible schedule")]
        seed: Option<u64>,

        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,
    },
    /// Show branch, remote and working tree state
    Info {
        #[arg(long, help = "Output as JSON")]
        json: bool,
    },
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Fill { seed, no_push, json, token } => {
                let options = FillOptions {
                    seed,
                    no_push,
                    json,
                    credential: token.and_then(Credential::new),
                };
                crate::fill::exec(self.common, options)
            }
            Commands::Plan { seed, json, ndjson } => crate::plan::exec(self.common, seed, json, ndjson),
            Commands::Info { json } => crate::info::exec(self.common, json),
        }
    }
}
