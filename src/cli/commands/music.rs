//! Music command implementation.
//!
//! Lists the playlist and manages added tracks and the play mode.

use std::path::{Path, PathBuf};

use colored::Colorize;
use serde_json::json;

use crate::cli::args::{MusicCommands, OutputFormat};
use crate::config::{Config, Paths};
use crate::error::PomoError;
use crate::features::playlist::{is_audio_file, PlayMode, Playlist, PlaylistStorage, AUDIO_EXTENSIONS};
use crate::output::{format_tracks, to_json};
use crate::storage::Database;

/// Execute music subcommands.
///
/// # Errors
///
/// Returns an error if the database can't be opened, a file can't be
/// added, or an argument is invalid.
pub fn music(
    paths: &Paths,
    config: &Config,
    cmd: MusicCommands,
    format: OutputFormat,
) -> Result<String, PomoError> {
    let mut storage = PlaylistStorage::new(Database::open_at(&paths.database)?);

    match cmd {
        MusicCommands::List => {
            let playlist = Playlist::from_sources(
                &config.music_dir(&paths.music),
                &storage.load_added(),
                storage.load_mode(),
            );
            format_tracks(&playlist, format)
        }
        MusicCommands::Add { paths: files } => add_tracks(&mut storage, &files, format),
        MusicCommands::Clear { force } => clear_tracks(&mut storage, force, format),
        MusicCommands::Mode { mode } => play_mode(&mut storage, mode.as_deref(), format),
    }
}

fn add_tracks(
    storage: &mut PlaylistStorage<Database>,
    files: &[PathBuf],
    format: OutputFormat,
) -> Result<String, PomoError> {
    let resolved = files
        .iter()
        .map(|file| resolve_track(file))
        .collect::<Result<Vec<_>, _>>()?;

    let added = storage.add_tracks(&resolved)?;

    match format {
        OutputFormat::Json => to_json(&json!({ "count": added.len(), "added": added })),
        OutputFormat::Pretty => {
            if added.is_empty() {
                return Ok("Already in the playlist.".to_string());
            }
            let mut output = vec![format!("{} Added {} track(s)", "✓".green(), added.len())];
            output.extend(added.iter().map(|p| format!("  {}", p.display())));
            Ok(output.join("\n"))
        }
    }
}

/// Absolute path of an existing audio file.
fn resolve_track(file: &Path) -> Result<PathBuf, PomoError> {
    let path = std::fs::canonicalize(file)
        .map_err(|_| PomoError::NotFound(format!("No such file: {}", file.display())))?;

    if !path.is_file() || !is_audio_file(&path) {
        return Err(PomoError::InvalidInput(format!(
            "{} is not an audio file (expected one of: {})",
            file.display(),
            AUDIO_EXTENSIONS.join(", ")
        )));
    }

    Ok(path)
}

fn clear_tracks(
    storage: &mut PlaylistStorage<Database>,
    force: bool,
    format: OutputFormat,
) -> Result<String, PomoError> {
    if !force {
        return Err(PomoError::InvalidInput(
            "This will remove all added tracks from the playlist.\nUse --force to confirm."
                .to_string(),
        ));
    }

    let removed = storage.load_added().len();
    storage.clear_added()?;

    match format {
        OutputFormat::Json => to_json(&json!({ "cleared": removed })),
        OutputFormat::Pretty => Ok(format!("Added tracks cleared ({removed} removed).")),
    }
}

fn play_mode(
    storage: &mut PlaylistStorage<Database>,
    mode: Option<&str>,
    format: OutputFormat,
) -> Result<String, PomoError> {
    let mode = match mode {
        Some(name) => {
            let mode = PlayMode::parse(name).ok_or_else(|| {
                PomoError::InvalidInput(format!(
                    "Unknown play mode '{name}'. Use sequence, loop, or random."
                ))
            })?;
            storage.save_mode(mode)?;
            mode
        }
        None => storage.load_mode(),
    };

    match format {
        OutputFormat::Json => to_json(&json!({ "mode": mode })),
        OutputFormat::Pretty => Ok(format!("Play mode: {}", mode.to_string().cyan())),
    }
}
