use crate::AppError::ConfigError;
use clap::Parser;
use midisong::{merge_tracks, open_song_file, Config, OutputFormat, SongError, SongEvent};
use std::io::{self, Write};
use std::path::PathBuf;

fn main() {
    let result = main_result();
    std::process::exit(match result {
        Ok(()) => 0,
        Err(err) => {
            // use Display instead of Debug for user friendly error messages
            log::error!("{err}");
            1
        }
    });
}

pub fn main_result() -> Result<(), AppError> {
    // setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("midisong=info"))
        .init();

    // args
    let args = CliArgs::parse();

    // check if song file exists
    if !args.song_file.exists() {
        let err = ConfigError(format!("Song file not found {:?}", args.song_file));
        return Err(err);
    }

    // read local config, flags take precedence
    let mut config = match &args.config {
        Some(path) => Config::read_config_from(path)?,
        None => Config::read_config()?,
    };
    if args.merge {
        config.set_merge_tracks(true);
    }
    if let Some(format) = args.format {
        config.set_output_format(format);
    }
    if args.save_config {
        match &args.config {
            Some(path) => config.save_config_to(path)?,
            None => config.save_config()?,
        }
        log::info!("Saved configuration");
    }

    let reader = open_song_file(&args.song_file)?;
    log::info!(
        "Decoded {} events from {:?} ({:?})",
        reader.event_count(),
        args.song_file,
        reader.time_division()
    );

    let events = if config.merge_tracks() {
        merge_tracks(reader.events())
    } else {
        reader.events().to_vec()
    };
    let events: Vec<SongEvent> = events
        .into_iter()
        .filter(|event| args.track.is_empty() || args.track.contains(&event.track()))
        .collect();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match config.output_format() {
        OutputFormat::Text => {
            for event in &events {
                writeln!(out, "{event}")?;
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&events)
                .map_err(|err| AppError::OtherError(format!("Could not serialize events {err}")))?;
            writeln!(out, "{json}")?;
        }
    }
    Ok(())
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct CliArgs {
    /// Path to the MIDI file to decode.
    song_file: PathBuf,
    /// Print events in playback order across all tracks.
    #[arg(long, default_value_t = false)]
    merge: bool,
    /// Output format, overrides the local configuration.
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,
    /// Only print events of this track (repeatable).
    #[arg(long)]
    track: Vec<usize>,
    /// Optional path to a configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Persist the effective output settings to the configuration file.
    #[arg(long, default_value_t = false)]
    save_config: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    ConfigError(String),
    #[error("parsing error: {0}")]
    ParsingError(String),
    #[error("other error: {0}")]
    OtherError(String),
}

impl From<SongError> for AppError {
    fn from(error: SongError) -> Self {
        match error {
            SongError::FormatError(s)
            | SongError::ValidationError(s)
            | SongError::MissingFieldError(s) => Self::ParsingError(s),
            SongError::ConfigError(s) => Self::ConfigError(s),
            SongError::IoError(s) => Self::OtherError(s),
        }
    }
}

impl From<io::Error> for AppError {
    fn from(error: io::Error) -> Self {
        Self::OtherError(error.to_string())
    }
}
