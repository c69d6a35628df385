pub mod controller_type;
pub mod event_type;
pub mod fields;
pub mod song_event;

use crate::event::song_event::SongEvent;

/// Flatten the events of all tracks into a single timeline.
///
/// Works on an owned copy; the sort is stable so events comparing equal keep
/// their decode order.
pub fn merge_tracks(events: &[SongEvent]) -> Vec<SongEvent> {
    let mut merged = events.to_vec();
    merged.sort();
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::event_type::EventType;
    use crate::event::song_event::EventData;

    fn event(track: usize, time: f64, event_type: EventType, note: u8) -> SongEvent {
        let data = match event_type {
            EventType::NoteOn => EventData::NoteOn { note, velocity: 64 },
            EventType::NoteOff => EventData::NoteOff { note, velocity: 0 },
            _ => EventData::ProgramChange { program: note },
        };
        SongEvent::new(track, time, event_type, data, Some(0)).unwrap()
    }

    #[test]
    fn test_merge_interleaves_tracks() {
        let events = vec![
            event(0, 0.0, EventType::NoteOn, 60),
            event(0, 96.0, EventType::NoteOff, 60),
            event(1, 0.0, EventType::ProgramChange, 5),
            event(1, 96.0, EventType::NoteOn, 64),
        ];
        let merged = merge_tracks(&events);
        let order: Vec<(usize, EventType)> = merged
            .iter()
            .map(|e| (e.track(), e.event_type()))
            .collect();
        assert_eq!(
            order,
            vec![
                (1, EventType::ProgramChange),
                (0, EventType::NoteOn),
                (0, EventType::NoteOff),
                (1, EventType::NoteOn),
            ]
        );
        // input untouched
        assert_eq!(events[0].event_type(), EventType::NoteOn);
    }

    #[test]
    fn test_merge_is_stable() {
        let events = vec![
            event(0, 10.0, EventType::NoteOn, 60),
            event(0, 10.0, EventType::NoteOn, 64),
            event(0, 10.0, EventType::NoteOn, 67),
        ];
        let merged = merge_tracks(&events);
        let notes: Vec<_> = merged.iter().map(|e| e.get("note").unwrap()).collect();
        let expected: Vec<_> = events.iter().map(|e| e.get("note").unwrap()).collect();
        assert_eq!(notes, expected);
    }
}
