use crate::event::controller_type::ControllerType;
use crate::event::event_type::{EventType, MetaType};
use crate::event::song_event::{EventData, MetaData, SongEvent};
use crate::parser::midi_types::{
    MidiHeader, HEADER_CHUNK_LENGTH, HEADER_CHUNK_TAG, TRACK_CHUNK_TAG,
};
use crate::parser::primitive_parser::{
    parse_bytes, parse_i8, parse_length, parse_u16, parse_u24, parse_u32, parse_u8,
    parse_variable_length, skip, MidiParseError, ParseResult,
};
use crate::SongError;
use nom::combinator::map;
use nom::{Offset, Parser};

// SMF 1.0 docs at <https://midi.org/standard-midi-files-specification>

/// Key names indexed by `sharps_flats + 7 + minor * 3`
pub const KEY_NAMES: [&str; 18] = [
    "Cb", "Gb", "Db", "Ab", "Eb", "Bb", "F", "C", "G", "D", "A", "E", "B", "F#", "C#", "G#", "D#",
    "A#",
];

const PITCH_BEND_CENTER: i32 = 0x2000;
const PITCH_BEND_RANGE: f64 = 8191.0;
const MICROSECONDS_PER_MINUTE: f64 = 60_000_000.0;

/// Decoded content of a Standard MIDI File
#[derive(Debug, Clone)]
pub struct MidiFile {
    pub header: MidiHeader,
    /// Number of `MTrk` chunks decoded
    pub track_count: usize,
    /// Events of every track, each track in file order
    pub events: Vec<SongEvent>,
}

/// Check the first bytes of a candidate file.
pub fn accept_preview(preview: &[u8]) -> bool {
    preview.len() >= 8
        && &preview[0..4] == HEADER_CHUNK_TAG
        && u32::from_be_bytes([preview[4], preview[5], preview[6], preview[7]])
            == HEADER_CHUNK_LENGTH
}

/// Decode a whole Standard MIDI File.
pub fn parse_midi_data(file_data: &[u8]) -> Result<MidiFile, SongError> {
    let (_rest, midi_file) = parse_midi_file(file_data).map_err(|err| {
        let err = to_song_error(file_data, err);
        log::error!("Failed to parse MIDI data: {err}");
        err
    })?;
    Ok(midi_file)
}

fn to_song_error(file_data: &[u8], err: nom::Err<MidiParseError>) -> SongError {
    match err {
        nom::Err::Incomplete(_) => {
            SongError::FormatError("unexpected end of MIDI data".to_string())
        }
        nom::Err::Error(e) | nom::Err::Failure(e) => {
            let offset = file_data.offset(e.input());
            SongError::FormatError(format!("{} at offset 0x{offset:X}", e.message()))
        }
    }
}

/// Chunk tag and declared body length
pub fn parse_chunk_header(i: &[u8]) -> ParseResult<'_, (&[u8], u32)> {
    (parse_bytes(4), parse_u32).parse(i)
}

pub fn parse_header(i: &[u8]) -> ParseResult<'_, MidiHeader> {
    let (rest, (tag, length)) = parse_chunk_header(i)?;
    if tag != HEADER_CHUNK_TAG {
        return Err(MidiParseError::format(
            i,
            format!("unexpected MIDI header chunk tag {tag:02X?}"),
        ));
    }
    if length != HEADER_CHUNK_LENGTH {
        return Err(MidiParseError::format(
            i,
            format!("unexpected MIDI header chunk length: {length}"),
        ));
    }
    let (rest, (file_format, track_count, division)) =
        (parse_u16, parse_u16, parse_u16).parse(rest)?;
    if file_format > 1 {
        return Err(MidiParseError::format(
            i,
            format!("unsupported MIDI file format: {file_format}"),
        ));
    }
    log::debug!(
        "MIDI header -> format: {file_format} tracks: {track_count} division: {division}"
    );
    Ok((
        rest,
        MidiHeader {
            file_format,
            track_count,
            division,
        },
    ))
}

pub fn parse_midi_file(i: &[u8]) -> ParseResult<'_, MidiFile> {
    let (mut i, header) = parse_header(i)?;
    let mut events = Vec::new();
    let mut track = 0;
    // running out of data where a chunk tag is expected ends the file
    while !i.is_empty() {
        let (rest, (tag, length)) = parse_chunk_header(i)?;
        let length = length as usize;
        if tag == TRACK_CHUNK_TAG {
            let (rest, chunk) = parse_bytes(length)(rest)?;
            log::debug!("Parsing track {track} -> length: {length}");
            let (_, track_events) = parse_track_events(chunk, track)?;
            events.extend(track_events);
            track += 1;
            i = rest;
        } else {
            log::info!(
                "Skipping unrecognized chunk: {}",
                String::from_utf8_lossy(tag)
            );
            if length > rest.len() {
                log::warn!(
                    "Chunk {} declares {length} bytes but only {} remain",
                    String::from_utf8_lossy(tag),
                    rest.len()
                );
            }
            i = skip(rest, length);
        }
    }
    if track != usize::from(header.track_count) {
        log::warn!(
            "Header announces {} tracks but {track} were found",
            header.track_count
        );
    }
    Ok((
        i,
        MidiFile {
            header,
            track_count: track,
            events,
        },
    ))
}

/// Decode every event of one track chunk body.
///
/// Delta times accumulate from the start of the track and running status
/// never crosses into another track.
pub fn parse_track_events(chunk: &[u8], track: usize) -> ParseResult<'_, Vec<SongEvent>> {
    let mut i = chunk;
    let mut events = Vec::new();
    let mut event_time: u64 = 0;
    let mut running_status: Option<u8> = None;
    while !i.is_empty() {
        let (rest, delta_time) = parse_variable_length(i)?;
        event_time += u64::from(delta_time);
        let (rest, event) = parse_event(rest, track, event_time, &mut running_status)?;
        events.push(event);
        i = rest;
    }
    log::debug!("Track {track} -> {} events", events.len());
    Ok((i, events))
}

/// Decode one event following its delta time.
fn parse_event<'a>(
    i: &'a [u8],
    track: usize,
    event_time: u64,
    running_status: &mut Option<u8>,
) -> ParseResult<'a, SongEvent> {
    let (rest, byte) = parse_u8(i)?;
    let (rest, status) = if byte & 0x80 == 0 {
        // data byte, reuse the previous status and read it again as data
        match *running_status {
            Some(status) => (i, status),
            None => return Err(MidiParseError::format(i, "expected running status")),
        }
    } else {
        // only channel events restore it
        *running_status = None;
        (rest, byte)
    };

    let (rest, event_type, data, channel) = match status {
        0xF0 | 0xF7 => {
            let (rest, length) = parse_length(rest)?;
            let (rest, bytes) = parse_bytes(length)(rest)?;
            let event_type = if status == 0xF0 {
                EventType::F0Sysex
            } else {
                EventType::F7Sysex
            };
            let data = EventData::SysEx {
                bytes: bytes.to_vec(),
            };
            (rest, event_type, data, None)
        }
        0xFF => {
            let (rest, meta) = parse_meta_data(rest)?;
            (rest, EventType::Meta, EventData::Meta(meta), None)
        }
        _ => {
            let event_type = channel_event_type(status).ok_or_else(|| {
                MidiParseError::format(
                    i,
                    format!("unsupported MIDI event code: 0x{:X}", status & 0xF0),
                )
            })?;
            let (rest, data) = parse_channel_data(event_type)(rest)?;
            *running_status = Some(status);
            (rest, event_type, data, Some(status & 0x0F))
        }
    };

    #[allow(clippy::cast_precision_loss)]
    let time = event_time as f64;
    let event = SongEvent::new(track, time, event_type, data, channel).map_err(|err| {
        MidiParseError::format(i, format!("invalid event decoded: {err}"))
    })?;
    Ok((rest, event))
}

/// Event type for a channel voice status, `None` for anything else
const fn channel_event_type(status: u8) -> Option<EventType> {
    match EventType::from_status(status) {
        Some(event_type) if event_type.is_channel_event() => Some(event_type),
        _ => None,
    }
}

fn parse_channel_data<'a>(
    event_type: EventType,
) -> impl FnMut(&'a [u8]) -> ParseResult<'a, EventData> {
    move |i: &'a [u8]| match event_type {
        EventType::NoteOff => map((parse_u8, parse_u8), |(note, velocity)| {
            EventData::NoteOff { note, velocity }
        })
        .parse(i),
        EventType::NoteOn => map((parse_u8, parse_u8), |(note, velocity)| EventData::NoteOn {
            note,
            velocity,
        })
        .parse(i),
        EventType::PolyphonicKeyPressure => map((parse_u8, parse_u8), |(note, pressure)| {
            EventData::PolyphonicKeyPressure { note, pressure }
        })
        .parse(i),
        EventType::ControllerChange => map((parse_u8, parse_u8), |(controller, value)| {
            EventData::ControllerChange {
                controller: ControllerType::from_byte(controller),
                value,
            }
        })
        .parse(i),
        EventType::ProgramChange => {
            map(parse_u8, |program| EventData::ProgramChange { program }).parse(i)
        }
        EventType::ChannelKeyPressure => {
            map(parse_u8, |pressure| EventData::ChannelKeyPressure { pressure }).parse(i)
        }
        EventType::PitchBend => map((parse_u8, parse_u8), |(lsb, msb)| EventData::PitchBend {
            value: pitch_bend_value(lsb, msb),
        })
        .parse(i),
        EventType::F0Sysex | EventType::F7Sysex | EventType::Meta => Err(
            MidiParseError::format(i, format!("{event_type} is not a channel event")),
        ),
    }
}

/// Normalize a 14 bit pitch bend to -1.0..=1.0, 0x2000 being center
pub fn pitch_bend_value(lsb: u8, msb: u8) -> f64 {
    let raw = i32::from(lsb) + i32::from(msb) * 128 - PITCH_BEND_CENTER;
    (f64::from(raw) / PITCH_BEND_RANGE).clamp(-1.0, 1.0)
}

/// Name of a key signature, minor keys get a trailing `m`
pub fn key_signature_name(sharps_flats: i8, major_minor: u8) -> Option<String> {
    if major_minor > 1 {
        return None;
    }
    let index = i32::from(sharps_flats) + 7 + i32::from(major_minor) * 3;
    let name = KEY_NAMES.get(usize::try_from(index).ok()?)?;
    if major_minor == 1 {
        Some(format!("{name}m"))
    } else {
        Some((*name).to_string())
    }
}

/// Meta sub-type, payload length and payload
fn parse_meta_data(i: &[u8]) -> ParseResult<'_, MetaData> {
    let (rest, code) = parse_u8(i)?;
    let meta_type = MetaType::from_byte(code);
    let (rest, length) = parse_length(rest)?;
    let (rest, payload) = parse_bytes(length)(rest)?;
    log::debug!("Meta event {meta_type} -> length: {length}");

    let expect_length = |expected: usize| {
        if length == expected {
            Ok(())
        } else {
            Err(MidiParseError::format(
                i,
                format!("{meta_type} events should have a data length of {expected}, got {length}"),
            ))
        }
    };

    let meta = match meta_type {
        MetaType::SequenceNumber => {
            expect_length(2)?;
            let (_, number) = parse_u16(payload)?;
            MetaData::SequenceNumber { number }
        }
        text_type if text_type.is_text() => MetaData::Text {
            meta_type,
            text: payload.to_vec(),
        },
        MetaType::ChannelPrefix => {
            expect_length(1)?;
            MetaData::ChannelPrefix {
                channel: payload[0],
            }
        }
        MetaType::Port => {
            expect_length(1)?;
            MetaData::Port { port: payload[0] }
        }
        MetaType::SetTempo => {
            expect_length(3)?;
            let (_, speed) = parse_u24(payload)?;
            if speed == 0 {
                return Err(MidiParseError::format(i, "SET_TEMPO of zero microseconds"));
            }
            MetaData::SetTempo {
                bpm: MICROSECONDS_PER_MINUTE / f64::from(speed),
            }
        }
        MetaType::SmpteOffset => {
            expect_length(5)?;
            let (_, (hours, minutes, seconds, frames, fractional_frames)) =
                (parse_u8, parse_u8, parse_u8, parse_u8, parse_u8).parse(payload)?;
            MetaData::SmpteOffset {
                hours,
                minutes,
                seconds,
                frames,
                fractional_frames,
            }
        }
        MetaType::TimeSignature => {
            expect_length(4)?;
            let (_, (numerator, exponent, clocks, thirty_seconds)) =
                (parse_u8, parse_u8, parse_u8, parse_u8).parse(payload)?;
            // stored as a power of two
            let denominator = 1u64.checked_shl(u32::from(exponent)).ok_or_else(|| {
                MidiParseError::format(
                    i,
                    format!("time signature denominator 2^{exponent} is out of range"),
                )
            })?;
            MetaData::TimeSignature {
                numerator,
                denominator,
                midi_clocks_per_metronome_tick: clocks,
                number_of_32nd_notes_per_beat: thirty_seconds,
            }
        }
        MetaType::KeySignature => {
            expect_length(2)?;
            let (_, (sharps_flats, major_minor)) = (parse_i8, parse_u8).parse(payload)?;
            let key = key_signature_name(sharps_flats, major_minor).ok_or_else(|| {
                MidiParseError::format(
                    i,
                    format!("invalid key signature ({sharps_flats}, {major_minor})"),
                )
            })?;
            MetaData::KeySignature { key }
        }
        // end of track, sequencer specific and unknown codes pass through
        _ => MetaData::Raw {
            meta_type,
            bytes: (!payload.is_empty()).then(|| payload.to_vec()),
        },
    };
    Ok((rest, meta))
}
