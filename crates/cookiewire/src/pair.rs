//! Cookie pair reader/writer.
//!
//! Serializes `name=value` pairs into a [`ByteBuffer`] and parses them back
//! out one pair per call, driven by a small state machine over the buffer's
//! read cursor.
//!
//! Tokenization rules
//! - `;` (or end of content, or an embedded zero byte) ends the pair.
//! - The first `=` separates name from value; a stray `=` anywhere else
//!   makes the pair malformed and it is discarded whole.
//! - Whitespace is skipped only while no span is open (before the name,
//!   right after `=`); once a span is open it is ordinary content.
//! - A pair with no `=` is a boolean cookie; reading it yields the value
//!   `"1"`.
//!
//! The percent-codec escape set contains every structural byte above, so
//! encoded content can never be mistaken for syntax.

use bstr::BString;
use core::{fmt::Write as _, ops::Range};

use crate::{ByteBuffer, CodecOptions, DateCodec, DecodeError, percent, tables};

/// Serializes and parses cookie pairs with one fixed [`CodecOptions`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PairCodec {
    options: CodecOptions,
}

/// Tokenizer states for [`PairCodec::get`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    Name,
    Equals,
    Value,
    End,
}

impl PairCodec {
    /// Creates a codec with the given options.
    #[must_use]
    pub fn new(options: CodecOptions) -> Self {
        Self { options }
    }

    /// The options this codec was built with.
    #[must_use]
    pub fn options(&self) -> CodecOptions {
        self.options
    }

    /// Appends one `name=value` pair to `cookie`.
    ///
    /// A delimiter is written first when the buffer already holds content.
    /// With `encode`, name and value are percent-encoded, which makes any
    /// byte sequence safe to carry. The buffer is terminated on return.
    pub fn put(&self, cookie: &mut ByteBuffer<'_>, name: &[u8], value: &[u8], encode: bool) {
        self.put_value(cookie, name, value, false, encode);
    }

    /// Appends a boolean pair: the name alone, no `=`.
    ///
    /// When `set` is false the buffer is left untouched.
    pub fn put_boolean(&self, cookie: &mut ByteBuffer<'_>, name: &[u8], set: bool) {
        if set {
            self.put_value(cookie, name, b"1", true, false);
        }
    }

    /// Appends a pair whose value is `value` in decimal text.
    pub fn put_integer(&self, cookie: &mut ByteBuffer<'_>, name: &[u8], value: i64) {
        let mut scratch = ByteBuffer::new();
        // write_str into a growable buffer never errors
        let _ = write!(scratch, "{value}");
        self.put_value(cookie, name, scratch.as_slice(), false, false);
    }

    /// Appends a pair whose value is `instant` formatted as date text by the
    /// external collaborator.
    pub fn put_date<D: DateCodec + ?Sized>(
        &self,
        cookie: &mut ByteBuffer<'_>,
        name: &[u8],
        instant: f64,
        dates: &D,
    ) {
        let mut scratch = ByteBuffer::new();
        dates.format_date(instant, &mut scratch);
        self.put_value(cookie, name, scratch.as_slice(), false, false);
    }

    fn put_value(
        &self,
        cookie: &mut ByteBuffer<'_>,
        name: &[u8],
        value: &[u8],
        boolean: bool,
        encode: bool,
    ) {
        if !cookie.is_empty() {
            let delimiter: &[u8] = if self.options.space_after_delimiter {
                b"; "
            } else {
                b";"
            };
            cookie.append(delimiter);
        }

        if encode {
            percent::encode(&mut ByteBuffer::wrap(name), name.len(), cookie);
        } else {
            cookie.append(name);
        }

        if !boolean {
            cookie.push(tables::EQUALS);
            if encode {
                percent::encode(&mut ByteBuffer::wrap(value), value.len(), cookie);
            } else {
                cookie.append(value);
            }
        }

        cookie.terminate();
    }

    /// Parses one pair starting at `cookie`'s read cursor, advancing past it
    /// (including past the delimiter, but never past an embedded zero byte).
    ///
    /// `name` and `value` are reset, then filled with the pair's text,
    /// percent-decoded when `decode` is set. A pair with no `=` gets the
    /// value `"1"`. Both outputs are terminated on return.
    ///
    /// Returns `Ok(false)` when no name was captured: end of input, or an
    /// empty/malformed segment — callers iterating a cookie line stop there.
    ///
    /// # Errors
    ///
    /// A bad percent escape rejects the pair as a whole: both outputs are
    /// left reset, and the cursor has already moved past the pair, so a
    /// subsequent call continues with the rest of the input.
    pub fn get(
        &self,
        cookie: &mut ByteBuffer<'_>,
        name: &mut ByteBuffer<'_>,
        value: &mut ByteBuffer<'_>,
        decode: bool,
    ) -> Result<bool, DecodeError> {
        name.reset();
        value.reset();

        let mut state = State::Start;
        let mut open: Option<usize> = None;
        let mut name_span: Option<Range<usize>> = None;
        let mut value_span: Option<Range<usize>> = None;

        while state != State::End {
            let pos = cookie.read_pos();
            match cookie.peek() {
                // End of content, or an embedded zero byte. Close the open
                // span; the cursor stays put so later calls see end-of-input
                // immediately.
                None | Some(0) => {
                    match state {
                        State::Name => name_span = open.take().map(|s| s..pos),
                        State::Value => value_span = open.take().map(|s| s..pos),
                        _ => {}
                    }
                    state = State::End;
                }
                Some(tables::DELIMITER) => {
                    match state {
                        State::Name => name_span = open.take().map(|s| s..pos),
                        State::Value => value_span = open.take().map(|s| s..pos),
                        _ => {}
                    }
                    state = State::End;
                    cookie.skip(1);
                }
                Some(tables::EQUALS) => {
                    if state == State::Name {
                        name_span = open.take().map(|s| s..pos);
                        state = State::Equals;
                    } else {
                        // Stray '=' (second one, or before any name text):
                        // the whole pair is malformed.
                        open = None;
                        name_span = None;
                        value_span = None;
                        state = State::End;
                    }
                    cookie.skip(1);
                }
                Some(b) if tables::is_whitespace(b)
                    && matches!(state, State::Start | State::Equals) =>
                {
                    cookie.skip(1);
                }
                Some(_) => {
                    match state {
                        State::Start => {
                            open = Some(pos);
                            state = State::Name;
                        }
                        State::Equals => {
                            open = Some(pos);
                            state = State::Value;
                        }
                        State::Name | State::Value => {}
                        State::End => unreachable!(),
                    }
                    cookie.skip(1);
                }
            }
        }

        let Some(name_span) = name_span else {
            return Ok(false);
        };

        let copied = copy_span(cookie, name_span, name, decode).and_then(|()| {
            match value_span {
                Some(span) => copy_span(cookie, span, value, decode),
                None => {
                    // Boolean-cookie convention.
                    value.append(b"1");
                    value.terminate();
                    Ok(())
                }
            }
        });
        if let Err(err) = copied {
            name.reset();
            value.reset();
            return Err(err);
        }
        Ok(true)
    }

    /// Iterates every pair in `bytes`, yielding owned name/value text.
    #[must_use]
    pub fn pairs<'a>(&self, bytes: &'a [u8], decode: bool) -> PairIter<'a> {
        PairIter {
            codec: *self,
            source: ByteBuffer::wrap(bytes),
            name: ByteBuffer::new(),
            value: ByteBuffer::new(),
            decode,
            done: false,
        }
    }
}

/// Copies (or percent-decodes) a span of `source` into `out`.
fn copy_span(
    source: &ByteBuffer<'_>,
    span: Range<usize>,
    out: &mut ByteBuffer<'_>,
    decode: bool,
) -> Result<(), DecodeError> {
    let bytes = source.slice(span);
    if decode {
        percent::decode(&mut ByteBuffer::wrap(bytes), bytes.len(), out)
    } else {
        out.append(bytes);
        out.terminate();
        Ok(())
    }
}

/// Iterator over the pairs of a cookie line, created by [`PairCodec::pairs`].
///
/// Yields `Err` for a pair whose percent-escapes are malformed and keeps
/// going; ends at the first empty segment or end of input.
#[derive(Debug)]
pub struct PairIter<'a> {
    codec: PairCodec,
    source: ByteBuffer<'a>,
    name: ByteBuffer<'static>,
    value: ByteBuffer<'static>,
    decode: bool,
    done: bool,
}

impl Iterator for PairIter<'_> {
    type Item = Result<(BString, BString), DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self
            .codec
            .get(&mut self.source, &mut self.name, &mut self.value, self.decode)
        {
            Ok(true) => Some(Ok((
                BString::from(self.name.as_slice()),
                BString::from(self.value.as_slice()),
            ))),
            Ok(false) => {
                self.done = true;
                None
            }
            Err(err) => Some(Err(err)),
        }
    }
}
