use thiserror::Error;

/// The single error raised by the lexer and the number decoder.
///
/// `offset` is the byte offset of the offending byte in the buffer the cursor
/// was begun over (for [`UnexpectedEnd`](LexErrorKind::UnexpectedEnd), the
/// buffer length).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{kind} at byte {offset}")]
pub struct LexError {
    pub(crate) kind: LexErrorKind,
    pub(crate) offset: usize,
}

impl LexError {
    pub(crate) const fn new(kind: LexErrorKind, offset: usize) -> Self {
        Self { kind, offset }
    }

    /// What went wrong.
    #[must_use]
    pub const fn kind(&self) -> LexErrorKind {
        self.kind
    }

    /// Where it went wrong.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }
}

/// The byte class a [`LexError`] was raised for.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexErrorKind {
    /// A byte that cannot begin or separate a value.
    #[error("unexpected byte 0x{0:02X}")]
    UnexpectedByte(u8),
    /// A control byte, `0x7F`, or a byte that cannot lead a UTF-8 sequence.
    #[error("invalid byte 0x{0:02X} in string")]
    InvalidStringByte(u8),
    /// A backslash followed by something other than `" \ / b f n r t u`.
    #[error("invalid escape character 0x{0:02X}")]
    InvalidEscape(u8),
    /// A `\u` escape followed by a non-hexadecimal byte.
    #[error("invalid unicode escape digit 0x{0:02X}")]
    InvalidUnicodeEscape(u8),
    /// A multi-byte UTF-8 sequence interrupted before its last continuation
    /// byte.
    #[error("invalid utf-8 continuation byte 0x{0:02X}")]
    InvalidUtf8(u8),
    /// A non-printable byte inside a number or `true`/`false`/`null`.
    #[error("invalid byte 0x{0:02X} in literal")]
    InvalidLiteralByte(u8),
    /// A `]` or `}` with no open bracket to close.
    #[error("unbalanced close byte 0x{0:02X}")]
    UnbalancedClose(u8),
    /// The buffer ended inside a string or an unclosed object/array.
    #[error("unexpected end of input")]
    UnexpectedEnd,
    /// An object member name was not followed by a value.
    #[error("member name without a value")]
    MissingValue,
    /// A number token that cannot be split into integer, fraction and
    /// exponent.
    #[error("malformed number: {0}")]
    MalformedNumber(&'static str),
}
