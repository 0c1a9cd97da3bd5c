//! Borrowed views of delimited JSON values.

use core::{fmt, str::Utf8Error};

use bstr::BStr;

use crate::{Cursor, LexError, LexerOptions, number};

/// The JSON type of a token, decided by its first byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TokenKind {
    /// The token is empty.
    None,
    /// `{ ... }`
    Object,
    /// `[ ... ]`
    Array,
    /// Anything that is not one of the other kinds.
    Number,
    /// `"..."`
    String,
    /// `true`
    True,
    /// `false`
    False,
    /// `null`
    Null,
}

/// One complete JSON value, borrowed from the scanned buffer.
///
/// A token is a non-owning view: the buffer it was read from must outlive it
/// and cannot be mutated while it is alive. It remembers the options of the
/// scan that produced it, so child scans lex its bytes the same way.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token<'src> {
    bytes: &'src [u8],
    offset: usize,
    children: usize,
    descendants: usize,
    options: LexerOptions,
}

impl<'src> Token<'src> {
    pub(crate) fn new(
        bytes: &'src [u8],
        offset: usize,
        children: usize,
        descendants: usize,
        options: LexerOptions,
    ) -> Self {
        Self {
            bytes,
            offset,
            children,
            descendants,
            options,
        }
    }

    /// The raw bytes of the value, exactly as they appear in the buffer.
    #[must_use]
    pub fn as_bytes(&self) -> &'src [u8] {
        self.bytes
    }

    /// The raw bytes as a [`BStr`], for printing.
    #[must_use]
    pub fn as_bstr(&self) -> &'src BStr {
        BStr::new(self.bytes)
    }

    /// The raw bytes as text.
    ///
    /// # Errors
    ///
    /// Fails if the bytes are not valid UTF-8. The lexer only checks lead and
    /// continuation byte counts, so overlong forms, surrogates and lead bytes
    /// above `0xF4` get through it.
    pub fn to_str(&self) -> Result<&'src str, Utf8Error> {
        core::str::from_utf8(self.bytes)
    }

    /// Byte offset of the token in the buffer its cursor was begun over.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Length of the token in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the token spans no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Number of direct members: array elements, or object name/value pairs
    /// counted once per pair.
    #[must_use]
    pub fn children(&self) -> usize {
        self.children
    }

    /// Number of values nested inside the token at any depth, member names
    /// excluded.
    #[must_use]
    pub fn descendants(&self) -> usize {
        self.descendants
    }

    /// Classifies the token by its first byte.
    #[must_use]
    pub fn kind(&self) -> TokenKind {
        match self.bytes.first() {
            None => TokenKind::None,
            Some(b'{') => TokenKind::Object,
            Some(b'[') => TokenKind::Array,
            Some(b'"') => TokenKind::String,
            Some(b't') => TokenKind::True,
            Some(b'f') => TokenKind::False,
            Some(b'n') => TokenKind::Null,
            Some(_) => TokenKind::Number,
        }
    }

    /// Decodes a number token.
    ///
    /// See [`number::decode`] for the accumulation rules and their precision
    /// limits.
    ///
    /// # Errors
    ///
    /// Fails with [`MalformedNumber`](crate::LexErrorKind::MalformedNumber) if
    /// the token cannot be split into integer, fraction and exponent.
    pub fn to_f64(&self) -> Result<f64, LexError> {
        number::decode_at(self.bytes, self.offset)
    }

    /// Copies the token into `dst` followed by a NUL byte.
    ///
    /// At most `dst.len() - 1` bytes of the token are copied. Returns the
    /// token length if it fit, or `dst.len()` if it was truncated. An empty
    /// `dst` receives nothing and yields 0.
    pub fn copy_to(&self, dst: &mut [u8]) -> usize {
        let Some(room) = dst.len().checked_sub(1) else {
            return 0;
        };
        let n = self.bytes.len().min(room);
        dst[..n].copy_from_slice(&self.bytes[..n]);
        dst[n] = 0;
        if self.bytes.len() <= room {
            self.bytes.len()
        } else {
            dst.len()
        }
    }

    /// Byte-for-byte comparison against `other`.
    ///
    /// Strings are compared in their escaped, quoted form.
    #[must_use]
    pub fn raw_eq(&self, other: impl AsRef<[u8]>) -> bool {
        self.bytes == other.as_ref()
    }

    /// Strips the surrounding quotes from a string token.
    ///
    /// Does nothing unless the token starts with `"`. Applying it to a token
    /// that was already dequoted is not meaningful: the result is unspecified
    /// (but never out of bounds).
    pub fn dequote(&mut self) {
        if self.bytes.len() >= 2 && self.bytes[0] == b'"' {
            self.bytes = &self.bytes[1..self.bytes.len() - 1];
            self.offset += 1;
        }
    }

    /// Returns the token with its surrounding quotes stripped.
    ///
    /// See [`dequote`](Self::dequote).
    #[must_use]
    pub fn dequoted(mut self) -> Self {
        self.dequote();
        self
    }

    /// The options of the scan this token was read from.
    #[must_use]
    pub fn options(&self) -> LexerOptions {
        self.options
    }

    /// Begins a scan over this token's bytes, to read its members, with the
    /// options of the scan the token was read from.
    ///
    /// Offsets of tokens read from the returned cursor are relative to this
    /// token.
    #[must_use]
    pub fn cursor(&self) -> Cursor<'src> {
        Cursor::with_options(self.bytes, self.options)
    }

    /// Like [`cursor`](Self::cursor), overriding the inherited options.
    #[must_use]
    pub fn cursor_with(&self, options: LexerOptions) -> Cursor<'src> {
        Cursor::with_options(self.bytes, options)
    }
}

impl fmt::Debug for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("offset", &self.offset)
            .field("bytes", &self.as_bstr())
            .field("children", &self.children)
            .field("descendants", &self.descendants)
            .finish()
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_bstr(), f)
    }
}

impl PartialEq<[u8]> for Token<'_> {
    fn eq(&self, other: &[u8]) -> bool {
        self.raw_eq(other)
    }
}

impl PartialEq<&[u8]> for Token<'_> {
    fn eq(&self, other: &&[u8]) -> bool {
        self.raw_eq(other)
    }
}

impl PartialEq<str> for Token<'_> {
    fn eq(&self, other: &str) -> bool {
        self.raw_eq(other)
    }
}

impl PartialEq<&str> for Token<'_> {
    fn eq(&self, other: &&str) -> bool {
        self.raw_eq(other)
    }
}

/// An object member: a name token and the value token that follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pair<'src> {
    /// The member name, quotes included.
    pub name: Token<'src>,
    /// The member value.
    pub value: Token<'src>,
}
