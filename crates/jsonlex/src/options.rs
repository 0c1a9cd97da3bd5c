/// Configuration options for the lexer.
///
/// Options travel by value inside every [`Cursor`](crate::Cursor), so a scan
/// keeps the settings it was begun with. Child scans started through
/// [`Token::cursor_with`](crate::Token::cursor_with) can choose their own.
///
/// # Default
///
/// All options default to `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LexerOptions {
    /// Whether to accept `0xC0` and `0xC1` as two-byte UTF-8 lead bytes inside
    /// strings.
    ///
    /// Both bytes can only ever start an overlong encoding, so they are
    /// rejected unless this is set.
    ///
    /// # Default
    ///
    /// `false`
    pub allow_overlong_utf8_leads: bool,

    /// Whether a `\u` escape must be followed by four hexadecimal digits.
    ///
    /// When unset, `\u` is accepted like any other single-character escape
    /// and the bytes after it are scanned as ordinary string content.
    ///
    /// # Default
    ///
    /// `false`
    pub validate_unicode_escapes: bool,

    #[cfg(any(test, feature = "fuzzing"))]
    /// Panic on lexing errors instead of returning them.
    ///
    /// Enabled only in test and fuzzing builds to produce backtraces.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub panic_on_error: bool,
}
