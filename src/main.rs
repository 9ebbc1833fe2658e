use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use pomo::cli::args::{Cli, Commands};
use pomo::cli::commands;
use pomo::config::{Config, Paths};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {:#}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let paths = Paths::resolve(cli.data_dir.clone())?;
    paths.ensure_dirs()?;
    let config = Config::load_from_path(&paths.config_file)?;
    config.general.color.apply();

    // Logging is best-effort.
    if let Err(e) = pomo::logging::init_tracing(&paths.log_file) {
        eprintln!("{}: {}", "warning".yellow().bold(), e);
    }

    let format = cli.output.unwrap_or(config.general.default_output);

    let output = match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => {
            pomo::tui::run(&paths, &config).context("timer interface failed")?;
            String::new()
        }
        Commands::Status => commands::status(&paths, format)?,
        Commands::Set { kind, minutes } => commands::set_duration(&paths, &kind, &minutes, format)?,
        Commands::History(args) => commands::history(&paths, args, format)?,
        Commands::Report { period } => commands::report(&paths, &period, format)?,
        Commands::Music(args) => commands::music(&paths, &config, args.command, format)?,
        Commands::Completions { shell } => commands::completions(shell)?,
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
