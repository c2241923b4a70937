use anyhow::Result;
use clap::Parser;

use tripclock::cli::{Cli, Command};
use tripclock::commands;
use tripclock::config::Config;
use tripclock::logger::Logger;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::load()?,
    };

    Logger::from_config(&config.logging, cli.verbose)?.init()?;

    let mut stdout = std::io::stdout().lock();

    match cli.command {
        Command::Durations {
            input,
            calculator,
            output,
            strict,
        } => {
            calculator.apply(&mut config);
            config.calculator.strict |= strict;
            if let Some(format) = output {
                config.output.format = format;
            }
            config.validate()?;

            let trips = commands::read_input(input.as_deref())?;
            commands::run_durations(&trips, &config.calculator, config.output.format, &mut stdout)?;
        }
        Command::Gaps {
            input,
            calculator,
            output,
            strict,
        } => {
            calculator.apply(&mut config);
            config.calculator.strict |= strict;
            if let Some(format) = output {
                config.output.format = format;
            }
            config.validate()?;

            let trips = commands::read_input(input.as_deref())?;
            commands::run_gaps(&trips, &config.calculator, config.output.format, &mut stdout)?;
        }
        Command::Ambiguous { input, calculator } => {
            calculator.apply(&mut config);
            config.validate()?;

            let trips = commands::read_input(input.as_deref())?;
            commands::run_ambiguous(&trips, &config.calculator, &mut stdout)?;
        }
        Command::Resolve {
            timestamp,
            calculator,
            second,
            to,
        } => {
            calculator.apply(&mut config);
            config.validate()?;

            commands::run_resolve(&timestamp, &config.calculator, second, &to, &mut stdout)?;
        }
        Command::InitConfig { path } => {
            let path = match path {
                Some(path) => path,
                None => Config::default_config_path()?,
            };
            Config::generate_default_config(&path)?;
        }
    }

    Ok(())
}
