use anyhow::Result;
use clap::Parser;
use tally::{
    cli,
    settings::{Args, Settings},
};

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let settings = Settings::from_args(args)?;
    cli::run(settings)?;
    Ok(())
}
