use anyhow::Result;
use clap::Parser;
use gfill::cli::Cli;
use std::env;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn init_tracing() {
    let filter = EnvFilter::try_from_env("GFILL_LOG").unwrap_or_else(|_| EnvFilter::new("gfill=info,warn"));
    let format = env::var("GFILL_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);
    match format.as_str() {
        "json" => registry
            .with(fmt::layer().json().with_writer(std::io::stderr).with_ansi(false))
            .init(),
        _ => registry
            .with(fmt::layer().compact().with_writer(std::io::stderr))
            .init(),
    }
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();
    let cli = Cli::parse();
    cli.execute()
}
