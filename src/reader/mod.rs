//! Song readers turn a file into a list of [`SongEvent`].
//!
//! A file is matched against every registered reader by its first bytes, then
//! decoded by the first reader that both accepts and opens it.

pub mod midi_reader;

use crate::event::song_event::SongEvent;
use crate::parser::midi_types::TimeDivision;
use crate::reader::midi_reader::MidiReader;
use crate::SongError;
use std::fmt::Debug;
use std::path::Path;

/// Number of leading bytes handed to [`SongReader::accept`]
pub const PREVIEW_LENGTH: usize = 32;

pub trait SongReader: Debug {
    /// Whether the reader might be able to decode a file starting with `preview`
    fn accept(preview: &[u8]) -> bool
    where
        Self: Sized;

    /// Decode a complete file
    fn open(file_data: &[u8]) -> Result<Self, SongError>
    where
        Self: Sized;

    fn event_count(&self) -> usize;

    /// Event by index, in any order
    fn get_event(&self, index: usize) -> Option<&SongEvent>;

    fn events(&self) -> &[SongEvent];

    /// Unit of the event times
    fn time_division(&self) -> TimeDivision;
}

type OpenFn = fn(&[u8]) -> Result<Box<dyn SongReader>, SongError>;

struct ReaderEntry {
    name: &'static str,
    accept: fn(&[u8]) -> bool,
    open: OpenFn,
}

fn open_boxed<R: SongReader + 'static>(
    file_data: &[u8],
) -> Result<Box<dyn SongReader>, SongError> {
    Ok(Box::new(R::open(file_data)?))
}

const SONG_READERS: &[ReaderEntry] = &[ReaderEntry {
    name: "MidiReader",
    accept: <MidiReader as SongReader>::accept,
    open: open_boxed::<MidiReader>,
}];

/// Decode `file_data` with the first registered reader that accepts it.
pub fn open_song(file_data: &[u8]) -> Result<Box<dyn SongReader>, SongError> {
    let preview = &file_data[..file_data.len().min(PREVIEW_LENGTH)];
    let mut failures = Vec::new();
    for entry in SONG_READERS {
        log::debug!("Testing accept using {}", entry.name);
        if !(entry.accept)(preview) {
            continue;
        }
        log::debug!("Attempting to load using {}", entry.name);
        match (entry.open)(file_data) {
            Ok(reader) => {
                log::info!("Loaded {} events using {}", reader.event_count(), entry.name);
                return Ok(reader);
            }
            Err(err) => {
                log::warn!("Error while attempting to load using {}: {err}", entry.name);
                failures.push(err);
            }
        }
    }
    // a single failing reader keeps its own error
    match failures.pop() {
        Some(err) if failures.is_empty() => Err(err),
        _ => Err(SongError::FormatError(
            "no song reader accepted the data".to_string(),
        )),
    }
}

pub fn open_song_file(path: &Path) -> Result<Box<dyn SongReader>, SongError> {
    log::debug!("Reading song file {path:?}");
    let file_data = std::fs::read(path)?;
    open_song(&file_data).map_err(|err| match err {
        SongError::FormatError(message) => {
            SongError::FormatError(format!("failed to load {path:?}: {message}"))
        }
        other => other,
    })
}
