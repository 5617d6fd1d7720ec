//! One-codepoint-at-a-time UTF-8 decoding.
//!
//! Text rendering must stay total: a malformed lead byte decodes to
//! codepoint 0 and advances exactly one byte, so a layout loop always makes
//! progress. Only the lead byte selects the sequence length. Continuation
//! bytes are checked only in [`Utf8Mode::Validating`].

/// Codepoint reported for bytes that cannot start a sequence
pub const REPLACEMENT: u32 = 0;

/// How strictly continuation bytes are checked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Utf8Mode {
    /// Trust the lead byte; continuation bytes contribute their low six bits
    /// whatever their high bits are.
    #[default]
    Lenient,
    /// Require `10xxxxxx` continuations; a mismatch yields codepoint 0 and
    /// consumes only the lead byte.
    Validating,
}

/// Decode the codepoint starting at `offset` (lenient)
///
/// Returns `(codepoint, consumed)`. `consumed` is at least 1 whenever
/// `offset` is inside `bytes`, and 0 at or past the end.
///
/// ```
/// use psfont_unicode::decode;
///
/// assert_eq!(decode(b"A", 0), (0x41, 1));
/// assert_eq!(decode("Ж".as_bytes(), 0), (0x0416, 2));
/// assert_eq!(decode(&[0x80], 0), (0, 1));
/// ```
pub fn decode(bytes: &[u8], offset: usize) -> (u32, usize) {
    decode_with(Utf8Mode::Lenient, bytes, offset)
}

/// Decode the codepoint starting at `offset` under `mode`
///
/// A sequence cut short by the end of `bytes` consumes only what is there;
/// the missing bits read as zero in lenient mode.
pub fn decode_with(mode: Utf8Mode, bytes: &[u8], offset: usize) -> (u32, usize) {
    let Some(&lead) = bytes.get(offset) else {
        return (REPLACEMENT, 0);
    };

    let (len, bits) = match lead {
        0x00..=0x7F => return (lead as u32, 1),
        _ if lead & 0xE0 == 0xC0 => (2, lead & 0x1F),
        _ if lead & 0xF0 == 0xE0 => (3, lead & 0x0F),
        _ if lead & 0xF8 == 0xF0 => (4, lead & 0x07),
        _ => return (REPLACEMENT, 1),
    };

    let mut codepoint = bits as u32;
    let mut consumed = 1;
    for i in 1..len {
        match bytes.get(offset + i) {
            Some(&cont) => {
                if mode == Utf8Mode::Validating && cont & 0xC0 != 0x80 {
                    return (REPLACEMENT, 1);
                }
                codepoint = (codepoint << 6) | (cont & 0x3F) as u32;
                consumed += 1;
            },
            None => {
                if mode == Utf8Mode::Validating {
                    return (REPLACEMENT, 1);
                }
                codepoint <<= 6;
            },
        }
    }

    (codepoint, consumed)
}

/// Iterator over the codepoints of a byte string
#[derive(Debug, Clone)]
pub struct Codepoints<'a> {
    bytes: &'a [u8],
    offset: usize,
    mode: Utf8Mode,
}

impl<'a> Codepoints<'a> {
    pub fn new(bytes: &'a [u8], mode: Utf8Mode) -> Self {
        Self {
            bytes,
            offset: 0,
            mode,
        }
    }

    /// Byte offset of the next codepoint
    pub fn offset(&self) -> usize {
        self.offset
    }
}

impl Iterator for Codepoints<'_> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        let (codepoint, consumed) = decode_with(self.mode, self.bytes, self.offset);
        if consumed == 0 {
            return None;
        }
        self.offset += consumed;
        Some(codepoint)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.bytes.len().saturating_sub(self.offset);
        (remaining.div_ceil(4), Some(remaining))
    }
}

/// Iterate the codepoints of `text` leniently
pub fn codepoints<T: AsRef<[u8]> + ?Sized>(text: &T) -> Codepoints<'_> {
    Codepoints::new(text.as_ref(), Utf8Mode::Lenient)
}

/// Number of codepoints in `text`, as the layout engine counts them
///
/// `strlen`-style byte counts overstate the width of non-ASCII lines; this
/// is what background boxes are sized with.
pub fn utf8_length<T: AsRef<[u8]> + ?Sized>(text: &T) -> usize {
    utf8_length_with(Utf8Mode::Lenient, text)
}

pub fn utf8_length_with<T: AsRef<[u8]> + ?Sized>(mode: Utf8Mode, text: &T) -> usize {
    Codepoints::new(text.as_ref(), mode).count()
}
