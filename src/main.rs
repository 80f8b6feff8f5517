// src/main.rs
use anyhow::Result;
use clap::Parser;
use env_logger::Env;

use binphase::cli::{self, Cli};

fn main() -> Result<()> {
    let args = Cli::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();

    cli::run(args)
}
