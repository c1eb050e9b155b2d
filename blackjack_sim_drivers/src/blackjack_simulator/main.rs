mod report;

use std::path::PathBuf;

use anyhow::{bail, Context};
use blackjack_sim_drivers::{parse_config_from_file, run_batch, Config};
use clap::Parser;
use log::warn;

const DEFAULT_CONFIG_PATH: &str = "~/.blackjack_sim.yml";

#[derive(Debug, Parser)]
#[command(author, about, long_about = None)]
struct CommandLineArgs {
    /// The path of the config file
    #[arg(short, long, default_value_t = String::from(DEFAULT_CONFIG_PATH))]
    config: String,

    /// Number of rounds to play, overriding the config file
    #[arg(short, long)]
    rounds: Option<u64>,

    /// Seed of the first worker's shoe, overriding the config file
    #[arg(short, long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = CommandLineArgs::parse();

    let mut config = load_config(&args.config)?;
    if let Some(rounds) = args.rounds {
        config.blackjack_simulator.number_of_rounds = rounds;
    }
    if args.seed.is_some() {
        config.blackjack_simulator.seed = args.seed;
    }
    let config = config;

    let rule: blackjack_sim::Rule = config
        .rule
        .clone()
        .try_into()
        .context("Invalid rule in config")?;
    let statistics = run_batch(&rule, &config.blackjack_simulator)?;
    report::print_report(&config.blackjack_simulator, &statistics);
    Ok(())
}

/// The default path is optional: built-in defaults are used when it is missing.
fn load_config(path: &str) -> anyhow::Result<Config> {
    if path != DEFAULT_CONFIG_PATH {
        return Ok(parse_config_from_file(path)?);
    }

    let home_dir = home::home_dir().context("Cannot find home directory")?;
    let config_file_path: PathBuf = home_dir.join(".blackjack_sim.yml");
    if !config_file_path.exists() {
        warn!(
            "{} not found, using default config",
            config_file_path.display()
        );
        return Ok(Config::default());
    }
    if config_file_path.is_dir() {
        bail!("This should be a path rather than a directory");
    }
    Ok(parse_config_from_file(&config_file_path)?)
}
