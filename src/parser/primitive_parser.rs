use encoding_rs::WINDOWS_1252;
use nom::error::{ErrorKind, ParseError};
use nom::{bytes, number, IResult};

/// Parser result carrying [`MidiParseError`]
pub type ParseResult<'a, T> = IResult<&'a [u8], T, MidiParseError<'a>>;

/// Error produced by the MIDI parsers.
///
/// `input` is the remaining data where the problem was found, which lets the
/// caller recover the absolute file offset.
#[derive(Debug, Clone, PartialEq)]
pub enum MidiParseError<'a> {
    /// Low-level nom failure, in practice running out of data
    Nom { input: &'a [u8], kind: ErrorKind },
    /// Structurally invalid data
    Format { input: &'a [u8], message: String },
}

impl<'a> MidiParseError<'a> {
    /// Build an unrecoverable format error at `input`
    pub fn format(input: &'a [u8], message: impl Into<String>) -> nom::Err<Self> {
        nom::Err::Failure(Self::Format {
            input,
            message: message.into(),
        })
    }

    pub const fn input(&self) -> &'a [u8] {
        match self {
            Self::Nom { input, .. } | Self::Format { input, .. } => input,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::Nom {
                kind: ErrorKind::Eof,
                ..
            } => "unexpected end of MIDI data".to_string(),
            Self::Nom { kind, .. } => format!("malformed MIDI data ({kind:?})"),
            Self::Format { message, .. } => message.clone(),
        }
    }
}

impl<'a> ParseError<&'a [u8]> for MidiParseError<'a> {
    fn from_error_kind(input: &'a [u8], kind: ErrorKind) -> Self {
        Self::Nom { input, kind }
    }

    fn append(_input: &'a [u8], _kind: ErrorKind, other: Self) -> Self {
        other
    }
}

/// Parse signed byte
pub fn parse_i8(i: &[u8]) -> ParseResult<'_, i8> {
    number::complete::be_i8(i)
}

/// Parse unsigned byte
pub fn parse_u8(i: &[u8]) -> ParseResult<'_, u8> {
    number::complete::be_u8(i)
}

/// Parse big-endian unsigned 16
pub fn parse_u16(i: &[u8]) -> ParseResult<'_, u16> {
    number::complete::be_u16(i)
}

/// Parse big-endian unsigned 24
pub fn parse_u24(i: &[u8]) -> ParseResult<'_, u32> {
    number::complete::be_u24(i)
}

/// Parse big-endian unsigned 32
pub fn parse_u32(i: &[u8]) -> ParseResult<'_, u32> {
    number::complete::be_u32(i)
}

/// Take exactly `len` raw bytes.
pub fn parse_bytes<'a>(len: usize) -> impl FnMut(&'a [u8]) -> ParseResult<'a, &'a [u8]> {
    move |i: &'a [u8]| bytes::complete::take(len)(i)
}

/// Parse a MIDI variable-length quantity.
///
/// Seven bits per byte, most significant first, the high bit flags a
/// continuation byte. Leading `0x80` padding is accepted as long as the value
/// fits in 32 bits.
pub fn parse_variable_length(i: &[u8]) -> ParseResult<'_, u32> {
    let mut input = i;
    let mut value: u32 = 0;
    loop {
        let (rest, byte) = parse_u8(input)?;
        input = rest;
        if value > u32::MAX >> 7 {
            return Err(MidiParseError::format(
                i,
                "variable-length quantity overflows 32 bits",
            ));
        }
        value = (value << 7) | u32::from(byte & 0x7F);
        if byte & 0x80 == 0 {
            return Ok((input, value));
        }
    }
}

/// Variable-length quantity used as a byte count
pub fn parse_length(i: &[u8]) -> ParseResult<'_, usize> {
    let (i, length) = parse_variable_length(i)?;
    Ok((i, length as usize))
}

/// Skip `n` bytes, or whatever is left when shorter.
pub fn skip(i: &[u8], n: usize) -> &[u8] {
    log::debug!("skip: {n}");
    &i[n.min(i.len())..]
}

/// Render raw text bytes for display.
///
/// MIDI text carries no charset, Windows-1252 is the common case and also
/// accepts every byte.
pub fn make_string(i: &[u8]) -> String {
    let (cow, encoding_used, had_errors) = WINDOWS_1252.decode(i);
    if had_errors {
        log::debug!("Error decoding string with {encoding_used:?}");
        String::from_utf8_lossy(i).into_owned()
    } else {
        cow.into_owned()
    }
}

#[cfg(test)]
pub fn encode_variable_length(mut value: u32) -> Vec<u8> {
    let mut encoded = vec![(value & 0x7F) as u8];
    value >>= 7;
    while value > 0 {
        encoded.push(((value & 0x7F) as u8) | 0x80);
        value >>= 7;
    }
    encoded.reverse();
    encoded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_variable_length() {
        let cases: [(&[u8], u32); 8] = [
            (&[0x00], 0),
            (&[0x40], 0x40),
            (&[0x7F], 0x7F),
            (&[0x81, 0x00], 0x80),
            (&[0xC0, 0x00], 0x2000),
            (&[0xFF, 0x7F], 0x3FFF),
            (&[0x81, 0x80, 0x00], 0x4000),
            (&[0xFF, 0xFF, 0xFF, 0x7F], 0x0FFF_FFFF),
        ];
        for (bytes, expected) in cases {
            let (rest, value) = parse_variable_length(bytes).unwrap();
            assert!(rest.is_empty());
            assert_eq!(value, expected, "bytes {bytes:02X?}");
        }
    }

    #[test]
    fn test_variable_length_leaves_rest() {
        let (rest, value) = parse_variable_length(&[0x83, 0x60, 0x90, 0x3C]).unwrap();
        assert_eq!(value, 480);
        assert_eq!(rest, &[0x90, 0x3C]);
    }

    #[test]
    fn test_variable_length_round_trip() {
        let mut value: u32 = 0;
        while value <= 0x0FFF_FFFF {
            let encoded = encode_variable_length(value);
            assert!(encoded.len() <= 4);
            let (rest, decoded) = parse_variable_length(&encoded).unwrap();
            assert!(rest.is_empty());
            assert_eq!(decoded, value);
            value += 0x1_0001;
        }
        for value in [0x7F, 0x80, 0x3FFF, 0x4000, 0x1F_FFFF, 0x20_0000, 0x0FFF_FFFF] {
            let (_, decoded) = parse_variable_length(&encode_variable_length(value)).unwrap();
            assert_eq!(decoded, value);
        }
    }

    #[test]
    fn test_variable_length_padding() {
        let (rest, value) = parse_variable_length(&[0x80, 0x80, 0x80, 0x80, 0x00]).unwrap();
        assert_eq!(value, 0);
        assert!(rest.is_empty());
        let (_, value) = parse_variable_length(&[0x80, 0x80, 0x80, 0x80, 0x81, 0x00]).unwrap();
        assert_eq!(value, 128);
        let (_, value) = parse_variable_length(&[0x8F, 0xFF, 0xFF, 0xFF, 0x7F]).unwrap();
        assert_eq!(value, u32::MAX);
    }

    #[test]
    fn test_variable_length_overflow() {
        let err = parse_variable_length(&[0x90, 0x80, 0x80, 0x80, 0x00]).unwrap_err();
        match err {
            nom::Err::Failure(e) => assert!(e.message().contains("overflows 32 bits")),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_variable_length_truncated() {
        let err = parse_variable_length(&[0x81, 0x80]).unwrap_err();
        match err {
            nom::Err::Error(e) => assert_eq!(e.message(), "unexpected end of MIDI data"),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_big_endian_numbers() {
        let data = [0x00, 0x06, 0x07, 0xA1, 0x20, 0x4D];
        let (rest, short) = parse_u16(&data).unwrap();
        assert_eq!(short, 6);
        let (rest, tempo) = parse_u24(rest).unwrap();
        assert_eq!(tempo, 500_000);
        assert_eq!(rest, b"M");
        let (_, long) = parse_u32(&[0x00, 0x00, 0x01, 0x00]).unwrap();
        assert_eq!(long, 256);
    }

    #[test]
    fn test_skip_saturates() {
        let data = [1, 2, 3];
        assert_eq!(skip(&data, 2), &[3]);
        assert!(skip(&data, 10).is_empty());
    }

    #[test]
    fn test_make_string() {
        assert_eq!(make_string(b"Piano"), "Piano");
        assert_eq!(make_string(&[0x43, 0x61, 0x66, 0xE9]), "Café");
    }
}
