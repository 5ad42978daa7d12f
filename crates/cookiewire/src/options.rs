/// Configuration options for the cookie pair codec.
///
/// The wire format leaves one genuine spelling choice open; it lives here so
/// a codec value fixes it consistently for everything it writes.
///
/// # Default
///
/// All options default to `false`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CodecOptions {
    /// Whether a single space follows the `;` delimiter between pairs.
    ///
    /// With `false` the serialized form is `lang=en;theme=dark`; with `true`
    /// it is `lang=en; theme=dark` (the spelling most HTTP stacks emit).
    /// Parsing accepts both regardless, because whitespace before a name is
    /// always skipped.
    ///
    /// # Default
    ///
    /// `false`
    pub space_after_delimiter: bool,
}
