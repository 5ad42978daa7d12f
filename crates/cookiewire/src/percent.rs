//! Percent-encoding codec between raw bytes and `%XX`-escaped text.
//!
//! Both operations stream from a source [`ByteBuffer`]'s read cursor into a
//! sink's write cursor, table-driven off the shared classification tables.
//! The codec owns its sink capacity: [`encode`] reserves the 3x worst case up
//! front, [`decode`] reserves the declared length, so neither reallocates
//! mid-transform.

use crate::{
    ByteBuffer, DecodeError,
    tables::{ESCAPE, hex_value},
};

/// Percent-encodes `len` bytes from `src` into `sink`.
///
/// Bytes in the unreserved set copy verbatim; everything else becomes `%`
/// plus two uppercase hex digits. Advances `src`'s read cursor by `len`,
/// `sink`'s write cursor by the produced length, and terminates `sink`.
///
/// # Panics
///
/// Panics if fewer than `len` bytes remain unread in `src`, or if `sink` is
/// borrowed.
pub fn encode(src: &mut ByteBuffer<'_>, len: usize, sink: &mut ByteBuffer<'_>) {
    assert!(len <= src.remaining(), "encode past source content");
    sink.ensure_unused(len * 3);

    let start = src.read_pos();
    let bytes = src.slice(start..start + len);
    for &byte in bytes {
        match ESCAPE[byte as usize] {
            Some([hi, lo]) => {
                sink.push(b'%');
                sink.push(hi);
                sink.push(lo);
            }
            None => sink.push(byte),
        }
    }
    src.skip(len);
    sink.terminate();
}

/// Percent-decodes `len` bytes from `src` into `sink`.
///
/// A `%` followed by two hex digits (either case) collapses to one byte;
/// other bytes copy verbatim. On success both cursors advance and `sink` is
/// terminated.
///
/// # Errors
///
/// A `%` not followed by two hex digits within the scanned window is a
/// [`DecodeError`]. The sink's write cursor is restored to its entry value,
/// so its prior content stays valid; `src`'s read cursor is left at the
/// offending escape.
///
/// # Panics
///
/// Panics if fewer than `len` bytes remain unread in `src`, or if `sink` is
/// borrowed.
pub fn decode(
    src: &mut ByteBuffer<'_>,
    len: usize,
    sink: &mut ByteBuffer<'_>,
) -> Result<(), DecodeError> {
    assert!(len <= src.remaining(), "decode past source content");
    sink.ensure_unused(len);

    let mark = sink.len();
    let start = src.read_pos();
    let bytes = src.slice(start..start + len);
    let mut i = 0;
    let failed = loop {
        if i >= len {
            break None;
        }
        let byte = bytes[i];
        if byte != b'%' {
            sink.push(byte);
            i += 1;
            continue;
        }
        if i + 2 >= len {
            break Some(DecodeError::TruncatedEscape { offset: i });
        }
        let (hi, lo) = (bytes[i + 1], bytes[i + 2]);
        match (hex_value(hi), hex_value(lo)) {
            (Some(high), Some(low)) => {
                sink.push((high << 4) | low);
                i += 3;
            }
            (None, _) => {
                break Some(DecodeError::InvalidHexDigit {
                    byte: hi,
                    offset: i + 1,
                });
            }
            (Some(_), None) => {
                break Some(DecodeError::InvalidHexDigit {
                    byte: lo,
                    offset: i + 2,
                });
            }
        }
    };

    src.skip(i);
    match failed {
        Some(err) => {
            sink.truncate(mark);
            sink.terminate();
            Err(err)
        }
        None => {
            sink.terminate();
            Ok(())
        }
    }
}
