use serde::Serialize;
use std::fmt;

/// Song event categories.
///
/// Channel events are keyed by the high nibble of the MIDI status byte, the
/// remaining three by the full tag byte.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    NoteOff,
    NoteOn,
    PolyphonicKeyPressure,
    /// Also carries the channel mode messages (controllers 120..=127)
    ControllerChange,
    ProgramChange,
    ChannelKeyPressure,
    PitchBend,
    F0Sysex,
    F7Sysex,
    Meta,
}

impl EventType {
    /// Resolve a status byte.
    ///
    /// The sysex and meta tags are matched on the whole byte, everything else on
    /// its high nibble. Returns `None` for system messages with no song meaning.
    pub const fn from_status(status: u8) -> Option<Self> {
        match status {
            0xF0 => Some(Self::F0Sysex),
            0xF7 => Some(Self::F7Sysex),
            0xFF => Some(Self::Meta),
            _ => match status & 0xF0 {
                0x80 => Some(Self::NoteOff),
                0x90 => Some(Self::NoteOn),
                0xA0 => Some(Self::PolyphonicKeyPressure),
                0xB0 => Some(Self::ControllerChange),
                0xC0 => Some(Self::ProgramChange),
                0xD0 => Some(Self::ChannelKeyPressure),
                0xE0 => Some(Self::PitchBend),
                _ => None,
            },
        }
    }

    /// Rank among events sharing a timestamp, lowest is applied first.
    ///
    /// Program, controller and tempo changes must be in place before the notes
    /// they affect, and a note-off must never be reordered after a note-on.
    pub const fn priority(self) -> u8 {
        match self {
            Self::ProgramChange | Self::F0Sysex | Self::F7Sysex | Self::Meta => 0,
            Self::ControllerChange => 1,
            Self::NoteOff => 10,
            Self::PitchBend => 30,
            Self::PolyphonicKeyPressure => 40,
            Self::ChannelKeyPressure => 50,
            Self::NoteOn => 100,
        }
    }

    /// True for the types that are addressed to one of the 16 MIDI channels
    pub const fn is_channel_event(self) -> bool {
        !matches!(self, Self::F0Sysex | Self::F7Sysex | Self::Meta)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::NoteOff => "NOTE_OFF",
            Self::NoteOn => "NOTE_ON",
            Self::PolyphonicKeyPressure => "POLYPHONIC_KEY_PRESSURE",
            Self::ControllerChange => "CONTROLLER_CHANGE",
            Self::ProgramChange => "PROGRAM_CHANGE",
            Self::ChannelKeyPressure => "CHANNEL_KEY_PRESSURE",
            Self::PitchBend => "PITCH_BEND",
            Self::F0Sysex => "F0_SYSEX",
            Self::F7Sysex => "F7_SYSEX",
            Self::Meta => "META",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Meta event sub-types, identified by the byte following the `0xFF` tag.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MetaType {
    SequenceNumber,
    TextEvent,
    Copyright,
    TrackName,
    InstrumentName,
    Lyric,
    Marker,
    CuePoint,
    ProgramName,
    DeviceName,
    ChannelPrefix,
    Port,
    EndOfTrack,
    SetTempo,
    SmpteOffset,
    TimeSignature,
    KeySignature,
    SequencerSpecific,
    /// Code not defined by the SMF specification, kept for pass-through
    Unknown(u8),
}

impl MetaType {
    pub const fn from_byte(byte: u8) -> Self {
        match byte {
            0x00 => Self::SequenceNumber,
            0x01 => Self::TextEvent,
            0x02 => Self::Copyright,
            0x03 => Self::TrackName,
            0x04 => Self::InstrumentName,
            0x05 => Self::Lyric,
            0x06 => Self::Marker,
            0x07 => Self::CuePoint,
            0x08 => Self::ProgramName,
            0x09 => Self::DeviceName,
            0x20 => Self::ChannelPrefix,
            0x21 => Self::Port,
            0x2F => Self::EndOfTrack,
            0x51 => Self::SetTempo,
            0x54 => Self::SmpteOffset,
            0x58 => Self::TimeSignature,
            0x59 => Self::KeySignature,
            0x7F => Self::SequencerSpecific,
            other => Self::Unknown(other),
        }
    }

    /// Meta types whose payload is free text
    pub const fn is_text(self) -> bool {
        matches!(
            self,
            Self::TextEvent
                | Self::Copyright
                | Self::TrackName
                | Self::InstrumentName
                | Self::Lyric
                | Self::Marker
                | Self::CuePoint
                | Self::ProgramName
                | Self::DeviceName
        )
    }
}

impl fmt::Display for MetaType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Self::SequenceNumber => "SEQUENCE_NUMBER",
            Self::TextEvent => "TEXT_EVENT",
            Self::Copyright => "COPYRIGHT",
            Self::TrackName => "TRACK_NAME",
            Self::InstrumentName => "INSTRUMENT_NAME",
            Self::Lyric => "LYRIC",
            Self::Marker => "MARKER",
            Self::CuePoint => "CUE_POINT",
            Self::ProgramName => "PROGRAM_NAME",
            Self::DeviceName => "DEVICE_NAME",
            Self::ChannelPrefix => "CHANNEL_PREFIX",
            Self::Port => "PORT",
            Self::EndOfTrack => "END_OF_TRACK",
            Self::SetTempo => "SET_TEMPO",
            Self::SmpteOffset => "SMPTE_OFFSET",
            Self::TimeSignature => "TIME_SIGNATURE",
            Self::KeySignature => "KEY_SIGNATURE",
            Self::SequencerSpecific => "SEQUENCER_SPECIFIC",
            Self::Unknown(code) => return write!(f, "UNKNOWN(0x{code:02X})"),
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_masks_channel() {
        assert_eq!(EventType::from_status(0x93), Some(EventType::NoteOn));
        assert_eq!(EventType::from_status(0x8F), Some(EventType::NoteOff));
        assert_eq!(EventType::from_status(0xBA), Some(EventType::ControllerChange));
        assert_eq!(EventType::from_status(0xE0), Some(EventType::PitchBend));
    }

    #[test]
    fn test_from_status_tag_bytes() {
        assert_eq!(EventType::from_status(0xF0), Some(EventType::F0Sysex));
        assert_eq!(EventType::from_status(0xF7), Some(EventType::F7Sysex));
        assert_eq!(EventType::from_status(0xFF), Some(EventType::Meta));
        // system common / realtime bytes are not song events
        assert_eq!(EventType::from_status(0xF1), None);
        assert_eq!(EventType::from_status(0xF8), None);
        assert_eq!(EventType::from_status(0x40), None);
    }

    #[test]
    fn test_from_status_every_channel() {
        for channel in 0..16u8 {
            assert_eq!(EventType::from_status(0x80 | channel), Some(EventType::NoteOff));
            assert_eq!(EventType::from_status(0x90 | channel), Some(EventType::NoteOn));
            assert_eq!(EventType::from_status(0xE0 | channel), Some(EventType::PitchBend));
        }
    }

    #[test]
    fn test_priority_table() {
        assert_eq!(EventType::ProgramChange.priority(), 0);
        assert_eq!(EventType::Meta.priority(), 0);
        assert_eq!(EventType::F0Sysex.priority(), 0);
        assert_eq!(EventType::F7Sysex.priority(), 0);
        assert_eq!(EventType::ControllerChange.priority(), 1);
        assert_eq!(EventType::NoteOff.priority(), 10);
        assert_eq!(EventType::PitchBend.priority(), 30);
        assert_eq!(EventType::PolyphonicKeyPressure.priority(), 40);
        assert_eq!(EventType::ChannelKeyPressure.priority(), 50);
        assert_eq!(EventType::NoteOn.priority(), 100);
    }

    #[test]
    fn test_meta_type_codes() {
        for code in 0x0A..0x20 {
            assert_eq!(MetaType::from_byte(code), MetaType::Unknown(code));
        }
        assert_eq!(MetaType::from_byte(0x51), MetaType::SetTempo);
        assert_eq!(MetaType::from_byte(0x2F), MetaType::EndOfTrack);
        assert_eq!(MetaType::from_byte(0x60), MetaType::Unknown(0x60));
        assert!(MetaType::Lyric.is_text());
        assert!(MetaType::DeviceName.is_text());
        assert!(!MetaType::SetTempo.is_text());
        assert!(!MetaType::Unknown(0x0A).is_text());
        assert_eq!(MetaType::Unknown(0x60).to_string(), "UNKNOWN(0x60)");
    }
}
