//! Standard MIDI File header data structures
//!
//! Reference: <https://midi.org/standard-midi-files-specification>

use serde::Serialize;

/// Tag of the header chunk
pub const HEADER_CHUNK_TAG: &[u8] = b"MThd";

/// Tag of a track chunk
pub const TRACK_CHUNK_TAG: &[u8] = b"MTrk";

/// Fixed length of the header chunk body
pub const HEADER_CHUNK_LENGTH: u32 = 6;

/// Body of the `MThd` chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MidiHeader {
    /// 0 = single track, 1 = simultaneous tracks
    pub file_format: u16,
    /// Number of track chunks announced by the header
    pub track_count: u16,
    /// Raw time division word
    pub division: u16,
}

impl MidiHeader {
    pub const fn time_division(&self) -> TimeDivision {
        TimeDivision::from_raw(self.division)
    }
}

/// Meaning of the delta times in a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TimeDivision {
    /// Delta times count ticks of a quarter note
    TicksPerQuarterNote(u16),
    /// Delta times count subdivisions of SMPTE frames
    Smpte {
        frames_per_second: u8,
        ticks_per_frame: u8,
    },
}

impl TimeDivision {
    /// Decode the header division word.
    ///
    /// With the top bit set the high byte is a negative frame rate (-24, -25,
    /// -29 or -30), other rates are carried as is.
    pub const fn from_raw(division: u16) -> Self {
        if division & 0x8000 == 0 {
            Self::TicksPerQuarterNote(division)
        } else {
            let [frames, ticks_per_frame] = division.to_be_bytes();
            Self::Smpte {
                frames_per_second: (frames as i8).unsigned_abs(),
                ticks_per_frame,
            }
        }
    }

    /// Convert an accumulated delta time to quarter-note beats.
    ///
    /// `None` for SMPTE based files or a zero division.
    pub fn ticks_to_beats(&self, ticks: f64) -> Option<f64> {
        match self {
            Self::TicksPerQuarterNote(0) | Self::Smpte { .. } => None,
            Self::TicksPerQuarterNote(ticks_per_quarter) => Some(ticks / f64::from(*ticks_per_quarter)),
        }
    }
}
