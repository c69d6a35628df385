pub mod midi_parser;
pub mod midi_types;
pub mod primitive_parser;
