use crate::ByteBuffer;

/// Textual-date collaborator consumed by [`PairCodec::put_date`].
///
/// Date parsing and formatting are deliberately outside this crate; the codec
/// only needs the two pure conversions below. Implementations must be
/// side-effect free: the codec may call them from any buffer context.
///
/// [`PairCodec::put_date`]: crate::PairCodec::put_date
pub trait DateCodec {
    /// Parses date text to a numeric instant, or `None` when the text is
    /// unparsable. Callers must check before formatting.
    fn parse_date(&self, text: &str) -> Option<f64>;

    /// Formats a numeric instant as date text, appended to `sink`.
    fn format_date(&self, instant: f64, sink: &mut ByteBuffer<'_>);
}
