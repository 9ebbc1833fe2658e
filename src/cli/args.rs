use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "pomo")]
#[command(about = "A terminal Pomodoro timer with a music playlist")]
#[command(long_about = "pomo - a terminal Pomodoro timer

Work in focused sessions, take short breaks, and a long break after every
fourth session. Stats and history are kept between runs. A playlist plays
background music while you work.

QUICK START:
  pomo                      Open the timer
  pomo set work 45          Make work sessions 45 minutes
  pomo history              Show completed sessions
  pomo music add ~/lofi/*.mp3

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting

For more information on a specific command, run:
  pomo <command> --help")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Use 'pretty' for human-readable colored output, or 'json' for
    /// machine-readable output suitable for scripting. Defaults to
    /// `general.default_output` from the config file.
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Directory for config, database, log, and music (default: ~/.pomo)
    #[arg(long, global = true, env = "POMO_HOME")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the interactive timer (default)
    ///
    /// Full-screen timer with stats, history, and the music playlist.
    /// Press ? inside for the key bindings.
    Tui,

    /// Show durations and cumulative stats
    ///
    /// # Examples
    ///
    ///   pomo status
    ///   pomo status -o json
    #[command(alias = "s")]
    Status,

    /// Change the work or short break duration
    ///
    /// The long break is always 15 minutes.
    ///
    /// # Examples
    ///
    ///   pomo set work 45
    ///   pomo set break 10
    ///   pomo set work 1h30m
    Set {
        /// Which duration to change (work, break)
        kind: String,

        /// New length in minutes, or with units like 1h30m
        #[arg(allow_hyphen_values = true)]
        minutes: String,
    },

    /// Show or clear completed work sessions
    ///
    /// # Examples
    ///
    ///   pomo history
    ///   pomo history -n 50
    ///   pomo history clear --force
    #[command(alias = "h")]
    History(HistoryArgs),

    /// Summarize completed sessions over a period
    ///
    /// # Examples
    ///
    ///   pomo report
    ///   pomo report today
    ///   pomo report all -o json
    Report {
        /// Time period (today, week, month, all)
        #[arg(default_value = "week")]
        period: String,
    },

    /// Manage the music playlist
    #[command(alias = "m")]
    Music(MusicArgs),

    /// Generate a shell completion script
    ///
    /// # Examples
    ///
    ///   pomo completions bash > ~/.local/share/bash-completion/completions/pomo
    ///   pomo completions zsh > ~/.zfunc/_pomo
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Arguments for history.
#[derive(Args)]
pub struct HistoryArgs {
    #[command(subcommand)]
    pub command: Option<HistoryCommands>,

    /// Number of entries to show
    #[arg(long, short = 'n', default_value = "10")]
    pub limit: usize,
}

/// History subcommands.
#[derive(Subcommand)]
pub enum HistoryCommands {
    /// Delete all history entries
    ///
    /// Stats are kept.
    Clear {
        /// Skip confirmation
        #[arg(long, short = 'f')]
        force: bool,
    },
}

/// Arguments for the playlist.
#[derive(Args)]
pub struct MusicArgs {
    #[command(subcommand)]
    pub command: MusicCommands,
}

/// Playlist subcommands.
#[derive(Subcommand)]
pub enum MusicCommands {
    /// List tracks and the play mode
    #[command(alias = "ls")]
    List,

    /// Add audio files to the playlist
    Add {
        /// Audio files to add
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Forget all added tracks
    ///
    /// Files in the music directory are not touched.
    Clear {
        /// Skip confirmation
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Show or set the play mode (sequence, loop, random)
    Mode {
        /// New play mode; omit to show the current one
        mode: Option<String>,
    },
}
