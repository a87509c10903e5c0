use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use leftalign::cli::{run, Args};
use log::info;

fn main() -> Result<()> {
    let args = Args::parse();
    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level)).init();

    let summary = run(&args)?;
    info!("{}", summary);
    Ok(())
}
