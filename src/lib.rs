//! Midisong - Standard MIDI File decoder
//!
//! This library provides:
//! - Decoding of Standard MIDI Files (format 0 and 1) into song events
//! - A global event ordering by time, event priority and track
//! - Keyed access to the event payloads
//! - Song reader dispatch over the first bytes of a file
//!
//! # Example
//!
//! ```no_run
//! use midisong::{open_song_file, merge_tracks};
//! use std::path::Path;
//!
//! let reader = open_song_file(Path::new("song.mid")).unwrap();
//! for event in merge_tracks(reader.events()) {
//!     println!("{event}");
//! }
//! ```

pub mod config;
pub mod error;
pub mod event;
pub mod parser;
pub mod reader;

// Re-export main types for convenience
pub use config::{Config, OutputFormat};
pub use error::SongError;
pub use event::{
    controller_type::ControllerType,
    event_type::{EventType, MetaType},
    fields::FieldValue,
    merge_tracks,
    song_event::{EventData, MetaData, SongEvent},
};
pub use parser::midi_types::{MidiHeader, TimeDivision};
pub use reader::{midi_reader::MidiReader, open_song, open_song_file, SongReader, PREVIEW_LENGTH};
