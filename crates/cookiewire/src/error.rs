use thiserror::Error;

/// Failure while percent-decoding an escaped span.
///
/// Offsets count from the start of the decoded span, pointing at the `%`
/// that opened the bad escape (or at the digit that broke it).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// A `%` with fewer than two bytes after it.
    #[error("truncated percent escape at byte {offset}")]
    TruncatedEscape {
        /// Position of the `%` within the span.
        offset: usize,
    },
    /// A `%` followed by a byte that is not a hexadecimal digit.
    #[error("invalid hex digit {byte:#04x} in percent escape at byte {offset}")]
    InvalidHexDigit {
        /// The offending byte.
        byte: u8,
        /// Position of the offending byte within the span.
        offset: usize,
    },
}
