//! Growable byte buffer with an inline small-size region.
//!
//! Why this exists
//! - Cookie names and values are short in the common case; the inline region
//!   keeps them off the heap entirely. Growth is geometric (base 32, factor
//!   2) so repeated appends stay amortized O(1).
//! - Read and write cursors are independent: one buffer can act as a
//!   streaming source for a codec (read cursor advances as bytes are
//!   consumed) while another fills as the sink (write cursor advances as
//!   bytes are produced), with no intermediate copies.
//!
//! Invariants
//! - `read <= write` at all times.
//! - For inline/owned storage, `write < capacity`: one byte past the content
//!   is always reserved for a zero terminator.
//! - Borrowed storage is a read-only source; it is never grown, written, or
//!   released through this type. Any write-path call on a borrowed buffer is
//!   a caller contract violation and panics.

use alloc::{boxed::Box, vec};
use bstr::ByteSlice;
use core::{fmt, ops::Range};

/// Capacity of the built-in inline region, in bytes.
const INLINE_CAP: usize = 32;

/// Base size the geometric growth sequence starts from.
const SIZE_INIT: usize = 32;

/// Multiplicative growth factor.
const SIZE_FACTOR: usize = 2;

/// Where a buffer's bytes live.
///
/// An explicit tag, not pointer identity: comparing a storage pointer against
/// the inline region's address is fragile, while the variant makes the
/// grow/release rules unambiguous by construction.
#[derive(PartialEq)]
enum Storage<'a> {
    /// Fixed-size region embedded in the buffer value itself.
    Inline([u8; INLINE_CAP]),
    /// Heap region owned by the buffer, freed on drop.
    Owned(Box<[u8]>),
    /// External region the buffer merely reads from.
    Borrowed(&'a [u8]),
}

/// Growable byte region with independent read and write cursors.
///
/// Created empty ([`ByteBuffer::new`]), with a capacity hint
/// ([`ByteBuffer::with_capacity`]), or as a borrowed view over existing bytes
/// ([`ByteBuffer::wrap`]). The content is `as_slice()`; the write cursor
/// marks its end, the read cursor marks how far consumers have scanned.
#[derive(PartialEq)]
pub struct ByteBuffer<'a> {
    storage: Storage<'a>,
    read: usize,
    write: usize,
}

impl ByteBuffer<'static> {
    /// Creates an empty buffer backed by the inline region.
    #[must_use]
    pub fn new() -> Self {
        Self {
            storage: Storage::Inline([0; INLINE_CAP]),
            read: 0,
            write: 0,
        }
    }

    /// Creates an empty buffer able to hold `hint` content bytes without
    /// reallocating.
    ///
    /// Stays inline when `hint` fits the inline region; otherwise allocates
    /// the smallest geometric capacity that covers `hint` plus the
    /// terminator.
    #[must_use]
    pub fn with_capacity(hint: usize) -> Self {
        if hint <= INLINE_CAP {
            return Self::new();
        }
        Self {
            storage: Storage::Owned(zeroed(grown_capacity(hint + 1))),
            read: 0,
            write: 0,
        }
    }
}

impl<'a> ByteBuffer<'a> {
    /// Wraps an external byte span as a read-only source.
    ///
    /// The write cursor starts at the span's length (all of it is content)
    /// and the read cursor at zero.
    #[must_use]
    pub fn wrap(bytes: &'a [u8]) -> Self {
        Self {
            storage: Storage::Borrowed(bytes),
            read: 0,
            write: bytes.len(),
        }
    }

    /// Wraps an external byte span whose logical length is unknown, scanning
    /// to the first zero byte to find it.
    #[must_use]
    pub fn wrap_nul_terminated(bytes: &'a [u8]) -> Self {
        let len = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
        Self {
            storage: Storage::Borrowed(bytes),
            read: 0,
            write: len,
        }
    }

    /// Total bytes of backing storage.
    #[must_use]
    pub fn capacity(&self) -> usize {
        match &self.storage {
            Storage::Inline(region) => region.len(),
            Storage::Owned(region) => region.len(),
            Storage::Borrowed(span) => span.len(),
        }
    }

    /// Content length (the write cursor).
    #[must_use]
    pub fn len(&self) -> usize {
        self.write
    }

    /// Whether the buffer holds no content.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.write == 0
    }

    /// The content written so far.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.data()[..self.write]
    }

    /// A sub-range of the content.
    ///
    /// # Panics
    ///
    /// Panics if `range` reaches past the content.
    #[must_use]
    pub fn slice(&self, range: Range<usize>) -> &[u8] {
        &self.as_slice()[range]
    }

    /// Position of the read cursor.
    #[must_use]
    pub fn read_pos(&self) -> usize {
        self.read
    }

    /// Content bytes not yet consumed by the read cursor.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.write - self.read
    }

    /// The byte under the read cursor, or `None` at end of content.
    #[must_use]
    pub fn peek(&self) -> Option<u8> {
        (self.read < self.write).then(|| self.data()[self.read])
    }

    /// Advances the read cursor by `n` bytes.
    ///
    /// # Panics
    ///
    /// Panics if fewer than `n` bytes remain unread.
    pub fn skip(&mut self, n: usize) {
        assert!(n <= self.remaining(), "read cursor past content");
        self.read += n;
    }

    /// Grows storage until `capacity >= n + 1`; no-op when already there.
    ///
    /// Growth is geometric. Inline storage migrates to the heap, carrying its
    /// content; capacity never shrinks.
    pub fn ensure_total(&mut self, n: usize) {
        let needed = n + 1;
        if self.capacity() >= needed {
            return;
        }
        assert!(
            !matches!(self.storage, Storage::Borrowed(_)),
            "borrowed buffer cannot grow"
        );
        let mut fresh = zeroed(grown_capacity(needed));
        match &self.storage {
            Storage::Inline(region) => fresh[..region.len()].copy_from_slice(region),
            Storage::Owned(region) => fresh[..region.len()].copy_from_slice(region),
            Storage::Borrowed(_) => unreachable!(),
        }
        self.storage = Storage::Owned(fresh);
    }

    /// Makes room for `delta` more content bytes past the write cursor, plus
    /// the terminator.
    pub fn ensure_unused(&mut self, delta: usize) {
        if self.capacity() - self.write < delta + 1 {
            self.ensure_total(self.write + delta);
        }
    }

    /// Appends `bytes` at the write cursor, growing as needed.
    ///
    /// May reallocate and move the content.
    pub fn append(&mut self, bytes: &[u8]) {
        self.ensure_unused(bytes.len());
        let at = self.write;
        self.data_mut()[at..at + bytes.len()].copy_from_slice(bytes);
        self.write += bytes.len();
    }

    /// Appends a single byte.
    pub fn push(&mut self, byte: u8) {
        self.ensure_unused(1);
        let at = self.write;
        self.data_mut()[at] = byte;
        self.write += 1;
    }

    /// Moves both cursors back to the start; the storage is kept.
    pub fn rewind(&mut self) {
        self.read = 0;
        self.write = 0;
    }

    /// Writes a zero byte at the write cursor without advancing it.
    ///
    /// No-op when the cursor sits at the end of storage, and on borrowed
    /// buffers (their memory is not ours to write).
    pub fn terminate(&mut self) {
        if matches!(self.storage, Storage::Borrowed(_)) {
            return;
        }
        if self.write < self.capacity() {
            let at = self.write;
            self.data_mut()[at] = 0;
        }
    }

    /// Rewinds and terminates: an empty, terminated buffer.
    pub fn reset(&mut self) {
        self.rewind();
        self.terminate();
    }

    /// Cuts the content back to `len` bytes, pulling the read cursor along
    /// if it sat past the new end.
    ///
    /// # Panics
    ///
    /// Panics if `len` exceeds the current content length.
    pub fn truncate(&mut self, len: usize) {
        assert!(len <= self.write, "truncate past content");
        self.write = len;
        if self.read > self.write {
            self.read = self.write;
        }
    }

    fn data(&self) -> &[u8] {
        match &self.storage {
            Storage::Inline(region) => region,
            Storage::Owned(region) => region,
            Storage::Borrowed(span) => span,
        }
    }

    fn data_mut(&mut self) -> &mut [u8] {
        match &mut self.storage {
            Storage::Inline(region) => region,
            Storage::Owned(region) => region,
            Storage::Borrowed(_) => panic!("borrowed buffer is read-only"),
        }
    }
}

/// Smallest `SIZE_INIT * SIZE_FACTOR^k` that is at least `needed`.
fn grown_capacity(needed: usize) -> usize {
    let mut target = SIZE_INIT;
    while target < needed {
        target *= SIZE_FACTOR;
    }
    target
}

fn zeroed(capacity: usize) -> Box<[u8]> {
    vec![0; capacity].into_boxed_slice()
}

impl Default for ByteBuffer<'static> {
    fn default() -> Self {
        Self::new()
    }
}

/// Text formatting writes straight into the buffer, so integers and dates
/// need no intermediate `String`.
impl fmt::Write for ByteBuffer<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.append(s.as_bytes());
        Ok(())
    }
}

impl fmt::Debug for ByteBuffer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteBuffer")
            .field("content", &self.as_slice().as_bstr())
            .field("read", &self.read)
            .field("capacity", &self.capacity())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use core::fmt::Write;

    use super::{ByteBuffer, INLINE_CAP, grown_capacity};

    #[test]
    fn starts_inline_and_terminated() {
        let buf = ByteBuffer::new();
        assert_eq!(buf.capacity(), INLINE_CAP);
        assert_eq!(buf.len(), 0);
        assert!(buf.is_empty());
        assert_eq!(buf.peek(), None);
    }

    #[test]
    fn capacity_hint_stays_inline_when_it_fits() {
        let buf = ByteBuffer::with_capacity(INLINE_CAP);
        assert_eq!(buf.capacity(), INLINE_CAP);
    }

    #[test]
    fn capacity_hint_goes_to_heap_past_inline() {
        let buf = ByteBuffer::with_capacity(100);
        assert!(buf.capacity() >= 101);
        assert_eq!(buf.capacity(), 128);
    }

    #[test]
    fn ensure_total_reserves_terminator_room() {
        let mut buf = ByteBuffer::new();
        for n in [0, 1, 31, 32, 33, 100, 1000] {
            buf.ensure_total(n);
            assert!(buf.capacity() >= n + 1, "capacity after ensure_total({n})");
        }
    }

    #[test]
    fn capacity_is_monotone() {
        let mut buf = ByteBuffer::new();
        let mut last = buf.capacity();
        for n in [500, 10, 0, 600, 3] {
            buf.ensure_total(n);
            assert!(buf.capacity() >= last);
            last = buf.capacity();
        }
    }

    #[test]
    fn growth_is_geometric() {
        assert_eq!(grown_capacity(1), 32);
        assert_eq!(grown_capacity(32), 32);
        assert_eq!(grown_capacity(33), 64);
        assert_eq!(grown_capacity(129), 256);
    }

    #[test]
    fn inline_to_heap_migration_carries_content() {
        let mut buf = ByteBuffer::new();
        buf.append(b"0123456789abcdef0123456789");
        buf.ensure_total(200);
        assert_eq!(buf.as_slice(), b"0123456789abcdef0123456789");
        assert!(buf.capacity() >= 201);
    }

    #[test]
    fn append_accounts_for_every_byte() {
        let mut buf = ByteBuffer::new();
        let chunks: &[&[u8]] = &[b"alpha", b"", b"beta", b"0123456789012345678901234567890123"];
        let mut total = 0;
        for chunk in chunks {
            buf.append(chunk);
            total += chunk.len();
            assert_eq!(buf.len(), total);
            assert!(buf.len() < buf.capacity());
        }
        assert_eq!(buf.as_slice(), b"alphabeta0123456789012345678901234567890123");
    }

    #[test]
    fn reads_are_bounded_by_writes() {
        let mut buf = ByteBuffer::new();
        buf.append(b"ab");
        assert_eq!(buf.peek(), Some(b'a'));
        buf.skip(1);
        assert_eq!(buf.peek(), Some(b'b'));
        buf.skip(1);
        assert_eq!(buf.peek(), None);
        assert_eq!(buf.remaining(), 0);
    }

    #[test]
    fn wrap_is_a_full_length_source() {
        let buf = ByteBuffer::wrap(b"token");
        assert_eq!(buf.len(), 5);
        assert_eq!(buf.capacity(), 5);
        assert_eq!(buf.peek(), Some(b't'));
    }

    #[test]
    fn wrap_nul_terminated_scans_for_length() {
        let buf = ByteBuffer::wrap_nul_terminated(b"abc\0junk");
        assert_eq!(buf.as_slice(), b"abc");
        let no_nul = ByteBuffer::wrap_nul_terminated(b"abc");
        assert_eq!(no_nul.as_slice(), b"abc");
    }

    #[test]
    #[should_panic(expected = "borrowed buffer")]
    fn borrowed_buffers_never_grow() {
        let mut buf = ByteBuffer::wrap(b"fixed");
        buf.append(b"more");
    }

    #[test]
    fn reset_clears_cursors_but_keeps_storage() {
        let mut buf = ByteBuffer::with_capacity(100);
        buf.append(b"content");
        let cap = buf.capacity();
        buf.reset();
        assert_eq!(buf.len(), 0);
        assert_eq!(buf.capacity(), cap);
    }

    #[test]
    fn truncate_restores_an_earlier_write_position() {
        let mut buf = ByteBuffer::new();
        buf.append(b"keep");
        let mark = buf.len();
        buf.append(b"-discard");
        buf.truncate(mark);
        assert_eq!(buf.as_slice(), b"keep");
    }

    #[test]
    fn integer_formatting_fits_inline() {
        let mut buf = ByteBuffer::new();
        write!(buf, "{}", i64::MIN).unwrap();
        assert_eq!(buf.as_slice(), b"-9223372036854775808");
        assert_eq!(buf.capacity(), INLINE_CAP);
    }
}
