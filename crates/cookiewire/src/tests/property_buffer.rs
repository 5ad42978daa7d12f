use alloc::vec::Vec;

use quickcheck::QuickCheck;
use quickcheck_macros::quickcheck;

use crate::ByteBuffer;

fn test_count() -> u64 {
    if is_ci::cached() { 10_000 } else { 1_000 }
}

/// Property: after any append sequence, the write cursor equals the total
/// appended length, the content is the concatenation, and one byte of
/// terminator room remains below capacity.
#[test]
fn append_accounting_quickcheck() {
    fn prop(chunks: Vec<Vec<u8>>) -> bool {
        let mut buf = ByteBuffer::new();
        let mut expected = Vec::new();
        for chunk in &chunks {
            buf.append(chunk);
            expected.extend_from_slice(chunk);
            if buf.len() >= buf.capacity() {
                return false;
            }
        }
        buf.len() == expected.len() && buf.as_slice() == expected.as_slice()
    }

    QuickCheck::new()
        .tests(test_count())
        .quickcheck(prop as fn(Vec<Vec<u8>>) -> bool);
}

/// Property: wrapping any byte span yields a full-length source whose
/// content comes back untouched.
#[quickcheck]
fn wrap_preserves_content(bytes: Vec<u8>) -> bool {
    let buf = ByteBuffer::wrap(&bytes);
    buf.len() == bytes.len() && buf.as_slice() == bytes.as_slice() && buf.remaining() == bytes.len()
}

/// Property: `ensure_total(n)` always leaves `capacity >= n + 1`, and
/// capacity never shrinks across calls on the same buffer.
#[test]
fn capacity_monotone_quickcheck() {
    fn prop(requests: Vec<u16>) -> bool {
        let mut buf = ByteBuffer::new();
        let mut last = buf.capacity();
        for &request in &requests {
            let n = usize::from(request);
            buf.ensure_total(n);
            if buf.capacity() < n + 1 || buf.capacity() < last {
                return false;
            }
            last = buf.capacity();
        }
        true
    }

    QuickCheck::new()
        .tests(test_count())
        .quickcheck(prop as fn(Vec<u16>) -> bool);
}
