//! Keyed access to event payloads.
//!
//! Every event type exposes a fixed set of named fields:
//! - NOTE_OFF, NOTE_ON: `note`, `velocity`
//! - POLYPHONIC_KEY_PRESSURE: `note`, `pressure`
//! - CONTROLLER_CHANGE: `controller`, `value`
//! - PROGRAM_CHANGE: `program`
//! - CHANNEL_KEY_PRESSURE: `pressure`
//! - PITCH_BEND: `value`
//! - F0_SYSEX, F7_SYSEX: `bytes`
//! - META: `meta_type` plus the meta fields (`number`, `text`, `channel`, `port`,
//!   `bpm`, `hours`, `minutes`, `seconds`, `frames`, `fractional_frames`,
//!   `numerator`, `denominator`, `midi_clocks_per_metronome_tick`,
//!   `number_of_32nd_notes_per_beat`, `key`, `bytes`)

use crate::event::controller_type::ControllerType;
use crate::event::event_type::MetaType;
use crate::event::song_event::{EventData, MetaData, SongEvent};
use crate::SongError;
use serde::Serialize;

/// Value of a single named event field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum FieldValue {
    Byte(u8),
    Word(u16),
    Integer(u64),
    Float(f64),
    Bytes(Vec<u8>),
    Key(String),
    Controller(ControllerType),
    MetaType(MetaType),
}

/// Mutable view on a named field
enum FieldSlot<'a> {
    Byte(&'a mut u8),
    Word(&'a mut u16),
    Integer(&'a mut u64),
    Float(&'a mut f64),
    Bytes(&'a mut Vec<u8>),
    Key(&'a mut String),
    Controller(&'a mut ControllerType),
}

impl FieldSlot<'_> {
    /// Store `value`, handing it back when its shape does not fit the field
    fn assign(self, value: FieldValue) -> Result<(), FieldValue> {
        match (self, value) {
            (FieldSlot::Byte(slot), FieldValue::Byte(v)) => *slot = v,
            (FieldSlot::Word(slot), FieldValue::Word(v)) => *slot = v,
            (FieldSlot::Integer(slot), FieldValue::Integer(v)) => *slot = v,
            (FieldSlot::Float(slot), FieldValue::Float(v)) => *slot = v,
            (FieldSlot::Bytes(slot), FieldValue::Bytes(v)) => *slot = v,
            (FieldSlot::Key(slot), FieldValue::Key(v)) => *slot = v,
            (FieldSlot::Controller(slot), FieldValue::Controller(v)) => *slot = v,
            (_, other) => return Err(other),
        }
        Ok(())
    }
}

impl EventData {
    /// Read a named field, `None` when the payload has no such key
    pub fn field(&self, key: &str) -> Option<FieldValue> {
        let value = match (self, key) {
            (
                Self::NoteOff { note, .. }
                | Self::NoteOn { note, .. }
                | Self::PolyphonicKeyPressure { note, .. },
                "note",
            ) => FieldValue::Byte(*note),
            (Self::NoteOff { velocity, .. } | Self::NoteOn { velocity, .. }, "velocity") => {
                FieldValue::Byte(*velocity)
            }
            (
                Self::PolyphonicKeyPressure { pressure, .. } | Self::ChannelKeyPressure { pressure },
                "pressure",
            ) => FieldValue::Byte(*pressure),
            (Self::ControllerChange { controller, .. }, "controller") => {
                FieldValue::Controller(*controller)
            }
            (Self::ControllerChange { value, .. }, "value") => FieldValue::Byte(*value),
            (Self::ProgramChange { program }, "program") => FieldValue::Byte(*program),
            (Self::PitchBend { value }, "value") => FieldValue::Float(*value),
            (Self::SysEx { bytes }, "bytes") => FieldValue::Bytes(bytes.clone()),
            (Self::Meta(meta), "meta_type") => FieldValue::MetaType(meta.meta_type()),
            (Self::Meta(meta), key) => return meta.field(key),
            _ => return None,
        };
        Some(value)
    }

    fn field_mut(&mut self, key: &str) -> Option<FieldSlot<'_>> {
        let slot = match (self, key) {
            (
                Self::NoteOff { note, .. }
                | Self::NoteOn { note, .. }
                | Self::PolyphonicKeyPressure { note, .. },
                "note",
            ) => FieldSlot::Byte(note),
            (Self::NoteOff { velocity, .. } | Self::NoteOn { velocity, .. }, "velocity") => {
                FieldSlot::Byte(velocity)
            }
            (
                Self::PolyphonicKeyPressure { pressure, .. } | Self::ChannelKeyPressure { pressure },
                "pressure",
            ) => FieldSlot::Byte(pressure),
            (Self::ControllerChange { controller, .. }, "controller") => {
                FieldSlot::Controller(controller)
            }
            (Self::ControllerChange { value, .. }, "value") => FieldSlot::Byte(value),
            (Self::ProgramChange { program }, "program") => FieldSlot::Byte(program),
            (Self::PitchBend { value }, "value") => FieldSlot::Float(value),
            (Self::SysEx { bytes }, "bytes") => FieldSlot::Bytes(bytes),
            (Self::Meta(meta), key) => return meta.field_mut(key),
            _ => return None,
        };
        Some(slot)
    }
}

impl MetaData {
    fn field(&self, key: &str) -> Option<FieldValue> {
        let value = match (self, key) {
            (Self::SequenceNumber { number }, "number") => FieldValue::Word(*number),
            (Self::Text { text, .. }, "text") => FieldValue::Bytes(text.clone()),
            (Self::ChannelPrefix { channel }, "channel") => FieldValue::Byte(*channel),
            (Self::Port { port }, "port") => FieldValue::Byte(*port),
            (Self::SetTempo { bpm }, "bpm") => FieldValue::Float(*bpm),
            (Self::SmpteOffset { hours, .. }, "hours") => FieldValue::Byte(*hours),
            (Self::SmpteOffset { minutes, .. }, "minutes") => FieldValue::Byte(*minutes),
            (Self::SmpteOffset { seconds, .. }, "seconds") => FieldValue::Byte(*seconds),
            (Self::SmpteOffset { frames, .. }, "frames") => FieldValue::Byte(*frames),
            (
                Self::SmpteOffset {
                    fractional_frames, ..
                },
                "fractional_frames",
            ) => FieldValue::Byte(*fractional_frames),
            (Self::TimeSignature { numerator, .. }, "numerator") => FieldValue::Byte(*numerator),
            (Self::TimeSignature { denominator, .. }, "denominator") => {
                FieldValue::Integer(*denominator)
            }
            (
                Self::TimeSignature {
                    midi_clocks_per_metronome_tick,
                    ..
                },
                "midi_clocks_per_metronome_tick",
            ) => FieldValue::Byte(*midi_clocks_per_metronome_tick),
            (
                Self::TimeSignature {
                    number_of_32nd_notes_per_beat,
                    ..
                },
                "number_of_32nd_notes_per_beat",
            ) => FieldValue::Byte(*number_of_32nd_notes_per_beat),
            (Self::KeySignature { key }, "key") => FieldValue::Key(key.clone()),
            (
                Self::Raw {
                    bytes: Some(bytes), ..
                },
                "bytes",
            ) => FieldValue::Bytes(bytes.clone()),
            _ => return None,
        };
        Some(value)
    }

    fn field_mut(&mut self, key: &str) -> Option<FieldSlot<'_>> {
        let slot = match (self, key) {
            (Self::SequenceNumber { number }, "number") => FieldSlot::Word(number),
            (Self::Text { text, .. }, "text") => FieldSlot::Bytes(text),
            (Self::ChannelPrefix { channel }, "channel") => FieldSlot::Byte(channel),
            (Self::Port { port }, "port") => FieldSlot::Byte(port),
            (Self::SetTempo { bpm }, "bpm") => FieldSlot::Float(bpm),
            (Self::SmpteOffset { hours, .. }, "hours") => FieldSlot::Byte(hours),
            (Self::SmpteOffset { minutes, .. }, "minutes") => FieldSlot::Byte(minutes),
            (Self::SmpteOffset { seconds, .. }, "seconds") => FieldSlot::Byte(seconds),
            (Self::SmpteOffset { frames, .. }, "frames") => FieldSlot::Byte(frames),
            (
                Self::SmpteOffset {
                    fractional_frames, ..
                },
                "fractional_frames",
            ) => FieldSlot::Byte(fractional_frames),
            (Self::TimeSignature { numerator, .. }, "numerator") => FieldSlot::Byte(numerator),
            (Self::TimeSignature { denominator, .. }, "denominator") => {
                FieldSlot::Integer(denominator)
            }
            (
                Self::TimeSignature {
                    midi_clocks_per_metronome_tick,
                    ..
                },
                "midi_clocks_per_metronome_tick",
            ) => FieldSlot::Byte(midi_clocks_per_metronome_tick),
            (
                Self::TimeSignature {
                    number_of_32nd_notes_per_beat,
                    ..
                },
                "number_of_32nd_notes_per_beat",
            ) => FieldSlot::Byte(number_of_32nd_notes_per_beat),
            (Self::KeySignature { key }, "key") => FieldSlot::Key(key),
            (
                Self::Raw {
                    bytes: Some(bytes), ..
                },
                "bytes",
            ) => FieldSlot::Bytes(bytes),
            _ => return None,
        };
        Some(slot)
    }
}

impl SongEvent {
    /// Read a named payload field
    pub fn get(&self, key: &str) -> Result<FieldValue, SongError> {
        self.data().field(key).ok_or_else(|| {
            SongError::MissingFieldError(format!(
                "{key} is not a field of {} events",
                self.describe()
            ))
        })
    }

    /// Overwrite a named payload field.
    ///
    /// The value must have the shape of the field, and `meta_type` is read-only
    /// since it decides which fields exist.
    pub fn set(&mut self, key: &str, value: FieldValue) -> Result<(), SongError> {
        let description = self.describe();
        if key == "meta_type" && self.meta_type().is_some() {
            return Err(SongError::ValidationError(
                "meta_type cannot be changed".to_string(),
            ));
        }
        let slot = self.data_mut().field_mut(key).ok_or_else(|| {
            SongError::MissingFieldError(format!("{key} is not a field of {description} events"))
        })?;
        slot.assign(value).map_err(|rejected| {
            SongError::ValidationError(format!(
                "{rejected:?} does not fit field {key} of {description} events"
            ))
        })
    }

    fn describe(&self) -> String {
        match self.meta_type() {
            Some(meta_type) => format!("{} {meta_type}", self.event_type()),
            None => self.event_type().to_string(),
        }
    }
}
