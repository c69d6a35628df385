use crate::event::merge_tracks;
use crate::event::song_event::SongEvent;
use crate::parser::midi_parser::{accept_preview, parse_midi_data};
use crate::parser::midi_types::{MidiHeader, TimeDivision};
use crate::reader::SongReader;
use crate::SongError;
use std::io::Read;

/// Song reader for Standard MIDI Files (format 0 and 1).
///
/// The whole file is decoded when the reader is opened.
#[derive(Debug, Clone)]
pub struct MidiReader {
    header: MidiHeader,
    track_count: usize,
    events: Vec<SongEvent>,
}

impl MidiReader {
    pub fn from_bytes(file_data: &[u8]) -> Result<Self, SongError> {
        let midi_file = parse_midi_data(file_data)?;
        log::debug!(
            "Decoded {} events from {} tracks",
            midi_file.events.len(),
            midi_file.track_count
        );
        Ok(Self {
            header: midi_file.header,
            track_count: midi_file.track_count,
            events: midi_file.events,
        })
    }

    /// Read the source to its end, then decode it
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, SongError> {
        let mut file_data: Vec<u8> = vec![];
        reader.read_to_end(&mut file_data)?;
        Self::from_bytes(&file_data)
    }

    /// 0 for a single multi-channel track, 1 for simultaneous tracks
    pub const fn file_format(&self) -> u16 {
        self.header.file_format
    }

    /// Track count as announced by the header
    pub const fn declared_track_count(&self) -> u16 {
        self.header.track_count
    }

    /// Number of track chunks actually decoded
    pub const fn track_count(&self) -> usize {
        self.track_count
    }

    pub const fn header(&self) -> &MidiHeader {
        &self.header
    }

    /// All events in the global playback order
    pub fn sorted_events(&self) -> Vec<SongEvent> {
        merge_tracks(&self.events)
    }
}

impl SongReader for MidiReader {
    fn accept(preview: &[u8]) -> bool {
        accept_preview(preview)
    }

    fn open(file_data: &[u8]) -> Result<Self, SongError> {
        Self::from_bytes(file_data)
    }

    fn event_count(&self) -> usize {
        self.events.len()
    }

    fn get_event(&self, index: usize) -> Option<&SongEvent> {
        self.events.get(index)
    }

    fn events(&self) -> &[SongEvent] {
        &self.events
    }

    fn time_division(&self) -> TimeDivision {
        self.header.time_division()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::event_type::EventType;
    use crate::parser::midi_parser_tests::midi_file;
    use std::io::Cursor;

    #[test]
    fn test_random_access() {
        let data = midi_file(&[&[0x00, 0xC0, 1, 0x10, 0x90, 60, 100, 0x10, 0x80, 60, 0]]);
        let reader = MidiReader::from_bytes(&data).unwrap();
        assert_eq!(reader.event_count(), 3);
        assert_eq!(
            reader.get_event(2).map(SongEvent::event_type),
            Some(EventType::NoteOff)
        );
        assert_eq!(
            reader.get_event(0).map(SongEvent::event_type),
            Some(EventType::ProgramChange)
        );
        assert!(reader.get_event(3).is_none());
    }

    #[test]
    fn test_from_reader() {
        let data = midi_file(&[&[0x00, 0xFF, 0x2F, 0x00]]);
        let reader = MidiReader::from_reader(Cursor::new(data)).unwrap();
        assert_eq!(reader.file_format(), 1);
        assert_eq!(reader.declared_track_count(), 1);
        assert_eq!(reader.track_count(), 1);
        assert_eq!(reader.time_division(), TimeDivision::TicksPerQuarterNote(96));
    }

    #[test]
    fn test_read_failure_is_io_error() {
        struct Broken;
        impl Read for Broken {
            fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("closed"))
            }
        }
        let err = MidiReader::from_reader(Broken).unwrap_err();
        assert!(matches!(err, SongError::IoError(_)));
    }

    #[test]
    fn test_sorted_events() {
        let first: &[u8] = &[0x10, 0x90, 60, 100];
        let second: &[u8] = &[0x10, 0x80, 60, 0];
        let reader = MidiReader::from_bytes(&midi_file(&[first, second])).unwrap();
        assert_eq!(reader.events()[0].track(), 0);
        let sorted = reader.sorted_events();
        assert_eq!(sorted[0].event_type(), EventType::NoteOff);
        assert_eq!(sorted[0].track(), 1);
        assert_eq!(sorted[1].event_type(), EventType::NoteOn);
    }
}
