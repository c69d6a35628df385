use crate::event::controller_type::ControllerType;
use crate::event::event_type::{EventType, MetaType};
use crate::parser::primitive_parser::make_string;
use crate::SongError;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

/// Payload of a song event, one shape per event type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum EventData {
    NoteOff { note: u8, velocity: u8 },
    NoteOn { note: u8, velocity: u8 },
    PolyphonicKeyPressure { note: u8, pressure: u8 },
    ControllerChange { controller: ControllerType, value: u8 },
    ProgramChange { program: u8 },
    ChannelKeyPressure { pressure: u8 },
    /// -1.0 to 1.0 where 0.0 is center
    PitchBend { value: f64 },
    /// Shared by the `F0` and `F7` sysex forms
    SysEx { bytes: Vec<u8> },
    Meta(MetaData),
}

impl EventData {
    /// Whether this payload shape belongs to `event_type`
    pub const fn matches(&self, event_type: EventType) -> bool {
        matches!(
            (self, event_type),
            (Self::NoteOff { .. }, EventType::NoteOff)
                | (Self::NoteOn { .. }, EventType::NoteOn)
                | (
                    Self::PolyphonicKeyPressure { .. },
                    EventType::PolyphonicKeyPressure
                )
                | (Self::ControllerChange { .. }, EventType::ControllerChange)
                | (Self::ProgramChange { .. }, EventType::ProgramChange)
                | (Self::ChannelKeyPressure { .. }, EventType::ChannelKeyPressure)
                | (Self::PitchBend { .. }, EventType::PitchBend)
                | (Self::SysEx { .. }, EventType::F0Sysex | EventType::F7Sysex)
                | (Self::Meta(_), EventType::Meta)
        )
    }
}

/// Payload of a meta event, one shape per meta type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum MetaData {
    SequenceNumber {
        number: u16,
    },
    /// Raw text bytes, no character set assumed
    Text {
        meta_type: MetaType,
        text: Vec<u8>,
    },
    ChannelPrefix {
        channel: u8,
    },
    Port {
        port: u8,
    },
    SetTempo {
        bpm: f64,
    },
    SmpteOffset {
        hours: u8,
        minutes: u8,
        seconds: u8,
        frames: u8,
        fractional_frames: u8,
    },
    TimeSignature {
        numerator: u8,
        denominator: u64,
        midi_clocks_per_metronome_tick: u8,
        number_of_32nd_notes_per_beat: u8,
    },
    /// Key name such as `"Eb"` or `"F#m"`
    KeySignature {
        key: String,
    },
    /// End of track, sequencer specific and unknown meta events.
    /// `bytes` is `None` when the payload is empty.
    Raw {
        meta_type: MetaType,
        bytes: Option<Vec<u8>>,
    },
}

impl MetaData {
    pub const fn meta_type(&self) -> MetaType {
        match self {
            Self::SequenceNumber { .. } => MetaType::SequenceNumber,
            Self::Text { meta_type, .. } | Self::Raw { meta_type, .. } => *meta_type,
            Self::ChannelPrefix { .. } => MetaType::ChannelPrefix,
            Self::Port { .. } => MetaType::Port,
            Self::SetTempo { .. } => MetaType::SetTempo,
            Self::SmpteOffset { .. } => MetaType::SmpteOffset,
            Self::TimeSignature { .. } => MetaType::TimeSignature,
            Self::KeySignature { .. } => MetaType::KeySignature,
        }
    }
}

/// A single timed occurrence in a song.
///
/// `track`, `time`, `event_type` and `channel` are fixed at construction,
/// the payload can be edited through [`SongEvent::set`].
///
/// Equality and ordering only look at `(time, priority, track)`, see [`compare`].
#[derive(Debug, Clone, Serialize)]
pub struct SongEvent {
    /// Index of the track chunk the event was read from
    track: usize,
    /// Accumulated delta time from the start of the track
    time: f64,
    #[serde(rename = "type")]
    event_type: EventType,
    /// `None` for sysex and meta events
    channel: Option<u8>,
    data: EventData,
}

impl SongEvent {
    pub fn new(
        track: usize,
        time: f64,
        event_type: EventType,
        data: EventData,
        channel: Option<u8>,
    ) -> Result<Self, SongError> {
        if !time.is_finite() || time < 0.0 {
            return Err(SongError::ValidationError(format!(
                "Time must be a non-negative number, got {time}"
            )));
        }
        match (event_type.is_channel_event(), channel) {
            (false, Some(channel)) => {
                return Err(SongError::ValidationError(format!(
                    "Channel must be None for {event_type} events, got {channel}"
                )));
            }
            (true, None) => {
                return Err(SongError::ValidationError(format!(
                    "Channel must be an integer for {event_type} events"
                )));
            }
            (true, Some(channel)) if channel > 15 => {
                return Err(SongError::ValidationError(format!(
                    "Channel must be within 0..=15, got {channel}"
                )));
            }
            _ => (),
        }
        if !data.matches(event_type) {
            return Err(SongError::ValidationError(format!(
                "{event_type} events cannot carry {data:?}"
            )));
        }
        Ok(Self {
            track,
            // also folds -0.0 into 0.0
            time: time + 0.0,
            event_type,
            channel,
            data,
        })
    }

    pub const fn track(&self) -> usize {
        self.track
    }

    pub const fn time(&self) -> f64 {
        self.time
    }

    pub const fn event_type(&self) -> EventType {
        self.event_type
    }

    pub const fn channel(&self) -> Option<u8> {
        self.channel
    }

    pub const fn data(&self) -> &EventData {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut EventData {
        &mut self.data
    }

    /// Meta sub-type, only for meta events
    pub const fn meta_type(&self) -> Option<MetaType> {
        match &self.data {
            EventData::Meta(meta) => Some(meta.meta_type()),
            _ => None,
        }
    }
}

/// Total order used to merge the events of several tracks into one timeline.
///
/// Sorts by time, then by [`EventType::priority`], then by track.
pub fn compare(a: &SongEvent, b: &SongEvent) -> Ordering {
    a.time
        .total_cmp(&b.time)
        .then_with(|| a.event_type.priority().cmp(&b.event_type.priority()))
        .then_with(|| a.track.cmp(&b.track))
}

impl PartialEq for SongEvent {
    fn eq(&self, other: &Self) -> bool {
        compare(self, other) == Ordering::Equal
    }
}

impl Eq for SongEvent {}

impl PartialOrd for SongEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SongEvent {
    fn cmp(&self, other: &Self) -> Ordering {
        compare(self, other)
    }
}

impl fmt::Display for SongEvent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{:0.3}: {}", self.time, self.event_type)?;
        if let Some(meta_type) = self.meta_type() {
            write!(f, " - {meta_type}")?;
        } else if let Some(channel) = self.channel {
            write!(f, " - {channel}")?;
        }
        write!(f, " - {}]", self.data)
    }
}

impl fmt::Display for EventData {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::NoteOff { note, velocity } | Self::NoteOn { note, velocity } => {
                write!(f, "note: {note}, velocity: {velocity}")
            }
            Self::PolyphonicKeyPressure { note, pressure } => {
                write!(f, "note: {note}, pressure: {pressure}")
            }
            Self::ControllerChange { controller, value } => {
                write!(f, "controller: {controller:?}, value: {value}")
            }
            Self::ProgramChange { program } => write!(f, "program: {program}"),
            Self::ChannelKeyPressure { pressure } => write!(f, "pressure: {pressure}"),
            Self::PitchBend { value } => write!(f, "value: {value:0.4}"),
            Self::SysEx { bytes } => write!(f, "bytes: {bytes:02X?}"),
            Self::Meta(meta) => write!(f, "{meta}"),
        }
    }
}

impl fmt::Display for MetaData {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::SequenceNumber { number } => write!(f, "number: {number}"),
            Self::Text { text, .. } => write!(f, "text: {:?}", make_string(text)),
            Self::ChannelPrefix { channel } => write!(f, "channel: {channel}"),
            Self::Port { port } => write!(f, "port: {port}"),
            Self::SetTempo { bpm } => write!(f, "bpm: {bpm:0.3}"),
            Self::SmpteOffset {
                hours,
                minutes,
                seconds,
                frames,
                fractional_frames,
            } => write!(
                f,
                "smpte: {hours:02}:{minutes:02}:{seconds:02}:{frames:02}.{fractional_frames:02}"
            ),
            Self::TimeSignature {
                numerator,
                denominator,
                midi_clocks_per_metronome_tick,
                number_of_32nd_notes_per_beat,
            } => write!(
                f,
                "time signature: {numerator}/{denominator}, clocks: {midi_clocks_per_metronome_tick}, 32nds: {number_of_32nd_notes_per_beat}"
            ),
            Self::KeySignature { key } => write!(f, "key: {key}"),
            Self::Raw { bytes: None, .. } => f.write_str("no data"),
            Self::Raw {
                bytes: Some(bytes), ..
            } => write!(f, "bytes: {bytes:02X?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note_on(track: usize, time: f64) -> SongEvent {
        let data = EventData::NoteOn {
            note: 60,
            velocity: 100,
        };
        SongEvent::new(track, time, EventType::NoteOn, data, Some(0)).unwrap()
    }

    fn note_off(track: usize, time: f64) -> SongEvent {
        let data = EventData::NoteOff {
            note: 60,
            velocity: 0,
        };
        SongEvent::new(track, time, EventType::NoteOff, data, Some(0)).unwrap()
    }

    fn tempo(track: usize, time: f64) -> SongEvent {
        let data = EventData::Meta(MetaData::SetTempo { bpm: 120.0 });
        SongEvent::new(track, time, EventType::Meta, data, None).unwrap()
    }

    #[test]
    fn test_channel_required_for_channel_events() {
        let data = EventData::ProgramChange { program: 3 };
        let err = SongEvent::new(0, 0.0, EventType::ProgramChange, data, None).unwrap_err();
        assert!(matches!(err, SongError::ValidationError(_)));
    }

    #[test]
    fn test_channel_rejected_for_meta_and_sysex() {
        let meta = EventData::Meta(MetaData::Raw {
            meta_type: MetaType::EndOfTrack,
            bytes: None,
        });
        let err = SongEvent::new(0, 0.0, EventType::Meta, meta, Some(1)).unwrap_err();
        assert!(matches!(err, SongError::ValidationError(_)));

        let sysex = EventData::SysEx { bytes: vec![0x7E] };
        let err = SongEvent::new(0, 0.0, EventType::F7Sysex, sysex, Some(0)).unwrap_err();
        assert!(matches!(err, SongError::ValidationError(_)));
    }

    #[test]
    fn test_channel_out_of_range() {
        let data = EventData::ChannelKeyPressure { pressure: 1 };
        let err = SongEvent::new(0, 0.0, EventType::ChannelKeyPressure, data, Some(16)).unwrap_err();
        assert!(matches!(err, SongError::ValidationError(_)));
    }

    #[test]
    fn test_meta_requires_meta_payload() {
        let data = EventData::SysEx { bytes: vec![] };
        let err = SongEvent::new(0, 0.0, EventType::Meta, data, None).unwrap_err();
        assert!(matches!(err, SongError::ValidationError(_)));
    }

    #[test]
    fn test_payload_must_match_type() {
        let data = EventData::NoteOff {
            note: 1,
            velocity: 2,
        };
        let err = SongEvent::new(0, 0.0, EventType::NoteOn, data, Some(0)).unwrap_err();
        assert!(matches!(err, SongError::ValidationError(_)));
    }

    #[test]
    fn test_invalid_time() {
        let data = EventData::ProgramChange { program: 0 };
        let err = SongEvent::new(0, -1.0, EventType::ProgramChange, data.clone(), Some(0));
        assert!(err.is_err());
        let err = SongEvent::new(0, f64::NAN, EventType::ProgramChange, data, Some(0));
        assert!(err.is_err());
    }

    #[test]
    fn test_sysex_accepts_both_tags() {
        let data = EventData::SysEx { bytes: vec![1, 2] };
        assert!(SongEvent::new(2, 5.0, EventType::F0Sysex, data.clone(), None).is_ok());
        assert!(SongEvent::new(2, 5.0, EventType::F7Sysex, data, None).is_ok());
    }

    #[test]
    fn test_note_off_before_note_on_at_same_time() {
        let on = note_on(0, 96.0);
        let off = note_off(0, 96.0);
        assert_eq!(compare(&off, &on), Ordering::Less);
        assert_eq!(compare(&on, &off), Ordering::Greater);
        assert!(off < on);
    }

    #[test]
    fn test_time_dominates_priority() {
        let early_on = note_on(3, 10.0);
        let late_tempo = tempo(0, 11.0);
        assert!(early_on < late_tempo);
    }

    #[test]
    fn test_track_breaks_ties() {
        let a = note_on(0, 10.0);
        let b = note_on(1, 10.0);
        assert!(a < b);
        assert_ne!(a, b);
    }

    #[test]
    fn test_equality_ignores_channel_and_payload() {
        let a = note_on(1, 10.0);
        let data = EventData::NoteOn {
            note: 72,
            velocity: 1,
        };
        let b = SongEvent::new(1, 10.0, EventType::NoteOn, data, Some(9)).unwrap();
        assert_eq!(a, b);
        assert_eq!(compare(&a, &b), Ordering::Equal);
    }

    #[test]
    fn test_meta_and_program_share_priority() {
        let program = SongEvent::new(
            0,
            0.0,
            EventType::ProgramChange,
            EventData::ProgramChange { program: 1 },
            Some(0),
        )
        .unwrap();
        let meta = tempo(0, 0.0);
        assert_eq!(program, meta);
    }

    #[test]
    fn test_order_is_antisymmetric_and_transitive() {
        let events = [
            note_on(0, 0.0),
            note_off(0, 0.0),
            tempo(1, 0.0),
            note_on(1, 0.0),
            note_off(1, 5.0),
            tempo(0, 5.0),
            note_on(2, 5.0),
        ];
        for a in &events {
            for b in &events {
                assert_eq!(compare(a, b), compare(b, a).reverse());
                for c in &events {
                    if compare(a, b) == Ordering::Less && compare(b, c) == Ordering::Less {
                        assert_eq!(compare(a, c), Ordering::Less);
                    }
                }
            }
        }
    }

    #[test]
    fn test_negative_zero_time() {
        let event = note_on(0, -0.0);
        assert!(event.time().is_sign_positive());
        assert_eq!(event, note_on(0, 0.0));
    }

    #[test]
    fn test_display() {
        assert_eq!(
            note_on(0, 1.5).to_string(),
            "[1.500: NOTE_ON - 0 - note: 60, velocity: 100]"
        );
        assert_eq!(
            tempo(0, 0.0).to_string(),
            "[0.000: META - SET_TEMPO - bpm: 120.000]"
        );
    }
}
