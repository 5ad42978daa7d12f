//! Cookie pair serialization and parsing over growable byte buffers.
//!
//! Three components, leaves first:
//! - [`ByteBuffer`]: an owned-or-borrowed byte region with an inline
//!   small-size region, geometric growth, and independent read/write cursors.
//! - [`percent`]: a table-driven codec between raw bytes and `%XX`-escaped
//!   text, streaming between two buffers.
//! - [`PairCodec`]: writes `name=value` (or name-only boolean, integer, date)
//!   pairs into a buffer and parses them back one at a time.
//!
//! Everything is synchronous and allocation-explicit; the only process-wide
//! state is a pair of compile-time lookup tables.
//!
//! ```rust
//! use cookiewire::{ByteBuffer, CodecOptions, PairCodec};
//!
//! let codec = PairCodec::new(CodecOptions::default());
//!
//! let mut cookie = ByteBuffer::new();
//! codec.put(&mut cookie, b"lang", b"en", false);
//! codec.put(&mut cookie, b"session", b"a b", true);
//! assert_eq!(cookie.as_slice(), b"lang=en;session=a%20b");
//!
//! // The split cursors let the same buffer serve as the parse source.
//! let mut name = ByteBuffer::new();
//! let mut value = ByteBuffer::new();
//! assert!(codec.get(&mut cookie, &mut name, &mut value, true).unwrap());
//! assert_eq!(name.as_slice(), b"lang");
//! assert!(codec.get(&mut cookie, &mut name, &mut value, true).unwrap());
//! assert_eq!(value.as_slice(), b"a b");
//! assert!(!codec.get(&mut cookie, &mut name, &mut value, true).unwrap());
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod buffer;
mod date;
mod error;
mod options;
mod pair;
pub mod percent;
mod tables;

#[cfg(test)]
mod tests;

pub use buffer::ByteBuffer;
pub use date::DateCodec;
pub use error::DecodeError;
pub use options::CodecOptions;
pub use pair::{PairCodec, PairIter};
