//! The token-reading state machine.
//!
//! A [`Cursor`] is a plain `Copy` value: the unread input, the nesting depth,
//! the current [`LexState`], and a sticky error. Every read takes a cursor
//! and hands back the delimited token together with a new cursor, which the
//! caller threads into the next read.
//!
//! Invariants
//! - A read never recurses and never allocates. Nested values that are not
//!   being delimited are skipped by depth counting alone.
//! - A read returns at most one token. When it yields, the returned cursor is
//!   at depth 1 in the `Structural` state.
//! - Once a cursor carries an error, reads against it return that error and
//!   consume nothing.
//! - Depth never goes below zero: a close bracket at depth 0 is an error.

mod tables;

use core::iter::FusedIterator;

use tables::Op;

use crate::{
    error::{LexError, LexErrorKind},
    options::LexerOptions,
    token::{Pair, Token},
};

/// The lexer mode a cursor is in between bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum LexState {
    /// At the top of a value or between members.
    #[default]
    Structural,
    /// Inside an unquoted number, `true`, `false` or `null`.
    BareLiteral,
    /// Inside a quoted string.
    String,
    /// The byte after a backslash inside a string.
    Escape,
    /// Expecting this many more hexadecimal digits of a `\u` escape.
    UnicodeEscape(u8),
    /// Expecting this many more UTF-8 continuation bytes.
    Utf8Continuation(u8),
}

impl LexState {
    fn table(self) -> &'static [Op; 256] {
        match self {
            LexState::Structural => &tables::STRUCTURAL,
            LexState::BareLiteral => &tables::BARE,
            LexState::String => &tables::STRING,
            LexState::Escape => &tables::ESCAPE,
            LexState::UnicodeEscape(_) => &tables::UNICODE_ESCAPE,
            LexState::Utf8Continuation(_) => &tables::UTF8,
        }
    }
}

/// Resumable scan state over an immutable byte buffer.
///
/// # Examples
///
/// Threading cursor values by hand:
///
/// ```rust
/// use jsonlex::Cursor;
///
/// let begin = Cursor::new(br#"{"a": true}"#);
/// let (name, after_name) = begin.read();
/// assert_eq!(name.unwrap(), "\"a\"");
/// let (value, after_value) = after_name.read();
/// assert_eq!(value.unwrap(), "true");
/// let (end, exhausted) = after_value.read();
/// assert!(end.is_none());
/// assert!(exhausted.is_exhausted() && !exhausted.is_error());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor<'src> {
    src: &'src [u8],
    pos: usize,
    depth: usize,
    state: LexState,
    error: Option<LexError>,
    options: LexerOptions,
}

/// Bookkeeping for the token one read is delimiting.
#[derive(Default)]
struct Span {
    start: Option<usize>,
    children: usize,
    descendants: usize,
}

impl Span {
    /// A value begins at `depth` (before any push it causes).
    fn count_value(&mut self, depth: usize) {
        if depth == 2 {
            self.children += 1;
        }
        if depth >= 2 {
            self.descendants += 1;
        }
    }

    /// A separator at `depth` shows the value just counted was a name.
    fn uncount_name(&mut self, depth: usize) {
        if depth == 2 {
            self.children = self.children.saturating_sub(1);
        }
        if depth >= 2 {
            self.descendants = self.descendants.saturating_sub(1);
        }
    }
}

enum Step<'src> {
    Next,
    Emit(Token<'src>),
}

impl<'src> Cursor<'src> {
    /// Begins a scan over `src` with default options.
    #[must_use]
    pub fn new(src: &'src [u8]) -> Self {
        Self::with_options(src, LexerOptions::default())
    }

    /// Begins a scan over `src`.
    #[must_use]
    pub fn with_options(src: &'src [u8], options: LexerOptions) -> Self {
        Self {
            src,
            pos: 0,
            depth: 0,
            state: LexState::Structural,
            error: None,
            options,
        }
    }

    /// Current nesting depth.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Current lexer state.
    #[must_use]
    pub fn state(&self) -> LexState {
        self.state
    }

    /// Byte offset of the next unread byte.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// The unread part of the buffer.
    #[must_use]
    pub fn remaining(&self) -> &'src [u8] {
        &self.src[self.pos..]
    }

    /// The options this scan was begun with.
    #[must_use]
    pub fn options(&self) -> LexerOptions {
        self.options
    }

    /// Whether a read against this cursor (or one it was derived from) failed.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// The sticky error, if any.
    #[must_use]
    pub fn error(&self) -> Option<LexError> {
        self.error
    }

    /// Whether the scan has consumed all input at depth 0 without error.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.error.is_none() && self.depth == 0 && self.pos == self.src.len()
    }

    /// Reads the next token.
    ///
    /// Returns the token (or `None`) together with the cursor to use for the
    /// next read. `None` with a clean cursor means the scan is over; `None`
    /// with [`is_error`](Self::is_error) set means the input was rejected.
    /// `self` is left untouched, so a saved cursor can be read again and
    /// yields the same result.
    #[must_use]
    pub fn read(&self) -> (Option<Token<'src>>, Self) {
        let mut next = *self;
        if self.error.is_some() {
            return (None, next);
        }
        match next.scan() {
            Ok(token) => (token, next),
            Err(err) => {
                next.poison(err);
                (None, next)
            }
        }
    }

    /// Reads a member name and its value with two consecutive reads.
    ///
    /// Fails with the first failure of either read. A name followed by the
    /// end of the scan fails with [`LexErrorKind::MissingValue`].
    #[must_use]
    pub fn read_pair(&self) -> (Option<Pair<'src>>, Self) {
        let (name, next) = self.read();
        let Some(name) = name else {
            return (None, next);
        };
        let (value, mut next) = next.read();
        match value {
            Some(value) => (Some(Pair { name, value }), next),
            None => {
                if !next.is_error() {
                    next.poison(LexError::new(LexErrorKind::MissingValue, next.pos));
                }
                (None, next)
            }
        }
    }

    /// Reads the next token, advancing this cursor in place.
    ///
    /// # Errors
    ///
    /// Returns the cursor's error if the input is rejected, now or by an
    /// earlier read.
    pub fn next_token(&mut self) -> Result<Option<Token<'src>>, LexError> {
        let (token, next) = self.read();
        *self = next;
        match self.error {
            Some(err) => Err(err),
            None => Ok(token),
        }
    }

    /// Reads the next name/value pair, advancing this cursor in place.
    ///
    /// # Errors
    ///
    /// Returns the cursor's error if the input is rejected, now or by an
    /// earlier read.
    pub fn next_pair(&mut self) -> Result<Option<Pair<'src>>, LexError> {
        let (pair, next) = self.read_pair();
        *self = next;
        match self.error {
            Some(err) => Err(err),
            None => Ok(pair),
        }
    }

    /// Iterates over the remaining tokens at this cursor's level.
    #[must_use]
    pub fn tokens(self) -> Tokens<'src> {
        Tokens {
            cursor: self,
            done: false,
        }
    }

    /// Iterates over the remaining name/value pairs at this cursor's level.
    #[must_use]
    pub fn members(self) -> Members<'src> {
        Members {
            cursor: self,
            done: false,
        }
    }

    fn poison(&mut self, err: LexError) {
        trace!(
            offset = err.offset,
            depth = self.depth,
            state = ?self.state,
            "lex error: {}",
            err.kind
        );
        #[cfg(any(test, feature = "fuzzing"))]
        assert!(!self.options.panic_on_error, "lex error: {err}");
        self.error = Some(err);
    }

    fn scan(&mut self) -> Result<Option<Token<'src>>, LexError> {
        let mut span = Span::default();
        while let Some(&byte) = self.src.get(self.pos) {
            let step = match self.state {
                LexState::Structural => self.structural(byte, &mut span)?,
                LexState::BareLiteral => self.bare_literal(byte, &mut span)?,
                LexState::String => self.string(byte, &mut span)?,
                LexState::Escape => self.escape(byte)?,
                LexState::UnicodeEscape(n) => self.unicode_escape(byte, n)?,
                LexState::Utf8Continuation(n) => self.utf8_continuation(byte, n)?,
            };
            match step {
                Step::Next => self.pos += 1,
                Step::Emit(token) => {
                    trace!(
                        offset = token.offset(),
                        len = token.len(),
                        children = token.children(),
                        "token"
                    );
                    return Ok(Some(token));
                }
            }
        }

        match self.state {
            LexState::Structural | LexState::BareLiteral if self.depth == 0 => {
                self.state = LexState::Structural;
                Ok(None)
            }
            _ => Err(LexError::new(LexErrorKind::UnexpectedEnd, self.src.len())),
        }
    }

    /// Builds the token `start..end` and leaves the cursor at `resume`.
    fn emit(&mut self, span: &Span, start: usize, end: usize, resume: usize) -> Step<'src> {
        self.pos = resume;
        Step::Emit(Token::new(
            &self.src[start..end],
            start,
            span.children,
            span.descendants,
            self.options,
        ))
    }

    fn structural(&mut self, byte: u8, span: &mut Span) -> Result<Step<'src>, LexError> {
        let at = self.pos;
        match self.state.table()[usize::from(byte)] {
            Op::Skip => {}
            Op::Separator => span.uncount_name(self.depth),
            Op::QuoteOpen => {
                if self.depth == 1 {
                    span.start = Some(at);
                }
                span.count_value(self.depth);
                self.state = LexState::String;
            }
            Op::Open => {
                span.count_value(self.depth);
                if self.depth == 1 {
                    span.start = Some(at);
                }
                self.depth += 1;
            }
            Op::Close => {
                if self.depth == 0 {
                    return Err(LexError::new(LexErrorKind::UnbalancedClose(byte), at));
                }
                self.depth -= 1;
                if self.depth == 1 {
                    if let Some(start) = span.start {
                        return Ok(self.emit(span, start, at + 1, at + 1));
                    }
                }
            }
            Op::Bare => {
                if self.depth == 1 {
                    span.start = Some(at);
                }
                span.count_value(self.depth);
                self.state = LexState::BareLiteral;
            }
            _ => return Err(LexError::new(LexErrorKind::UnexpectedByte(byte), at)),
        }
        Ok(Step::Next)
    }

    fn bare_literal(&mut self, byte: u8, span: &mut Span) -> Result<Step<'src>, LexError> {
        let at = self.pos;
        match self.state.table()[usize::from(byte)] {
            Op::Skip => Ok(Step::Next),
            Op::Unbare => {
                self.state = LexState::Structural;
                match span.start {
                    // The delimiter is left unread for the next call.
                    Some(start) if self.depth == 1 => Ok(self.emit(span, start, at, at)),
                    _ => self.structural(byte, span),
                }
            }
            _ => Err(LexError::new(LexErrorKind::InvalidLiteralByte(byte), at)),
        }
    }

    fn string(&mut self, byte: u8, span: &mut Span) -> Result<Step<'src>, LexError> {
        let at = self.pos;
        self.state = match self.state.table()[usize::from(byte)] {
            Op::Skip => LexState::String,
            Op::Escape => LexState::Escape,
            Op::QuoteClose => {
                self.state = LexState::Structural;
                if self.depth == 1 {
                    if let Some(start) = span.start {
                        return Ok(self.emit(span, start, at + 1, at + 1));
                    }
                }
                LexState::Structural
            }
            Op::OverlongLead if self.options.allow_overlong_utf8_leads => {
                LexState::Utf8Continuation(1)
            }
            Op::Utf8Lead2 => LexState::Utf8Continuation(1),
            Op::Utf8Lead3 => LexState::Utf8Continuation(2),
            Op::Utf8Lead4 => LexState::Utf8Continuation(3),
            _ => return Err(LexError::new(LexErrorKind::InvalidStringByte(byte), at)),
        };
        Ok(Step::Next)
    }

    fn escape(&mut self, byte: u8) -> Result<Step<'src>, LexError> {
        self.state = match self.state.table()[usize::from(byte)] {
            Op::UnicodeEscape if self.options.validate_unicode_escapes => {
                LexState::UnicodeEscape(4)
            }
            Op::Unescape | Op::UnicodeEscape => LexState::String,
            _ => return Err(LexError::new(LexErrorKind::InvalidEscape(byte), self.pos)),
        };
        Ok(Step::Next)
    }

    fn unicode_escape(&mut self, byte: u8, remaining: u8) -> Result<Step<'src>, LexError> {
        if self.state.table()[usize::from(byte)] != Op::Hex {
            return Err(LexError::new(LexErrorKind::InvalidUnicodeEscape(byte), self.pos));
        }
        self.state = match remaining {
            1 => LexState::String,
            n => LexState::UnicodeEscape(n - 1),
        };
        Ok(Step::Next)
    }

    fn utf8_continuation(&mut self, byte: u8, remaining: u8) -> Result<Step<'src>, LexError> {
        if self.state.table()[usize::from(byte)] != Op::Continuation {
            return Err(LexError::new(LexErrorKind::InvalidUtf8(byte), self.pos));
        }
        self.state = match remaining {
            1 => LexState::String,
            n => LexState::Utf8Continuation(n - 1),
        };
        Ok(Step::Next)
    }
}

/// Iterator over the tokens of one cursor thread.
///
/// Yields `Err` once if the input is rejected and then ends.
#[derive(Debug, Clone)]
pub struct Tokens<'src> {
    cursor: Cursor<'src>,
    done: bool,
}

impl<'src> Tokens<'src> {
    /// The cursor the next token will be read from.
    #[must_use]
    pub fn cursor(&self) -> Cursor<'src> {
        self.cursor
    }
}

impl<'src> Iterator for Tokens<'src> {
    type Item = Result<Token<'src>, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.cursor.next_token() {
            Ok(Some(token)) => Some(Ok(token)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

impl FusedIterator for Tokens<'_> {}

/// Iterator over the name/value pairs of one cursor thread, in declaration
/// order.
///
/// Yields `Err` once if the input is rejected and then ends.
#[derive(Debug, Clone)]
pub struct Members<'src> {
    cursor: Cursor<'src>,
    done: bool,
}

impl<'src> Members<'src> {
    /// The cursor the next pair will be read from.
    #[must_use]
    pub fn cursor(&self) -> Cursor<'src> {
        self.cursor
    }
}

impl<'src> Iterator for Members<'src> {
    type Item = Result<Pair<'src>, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.cursor.next_pair() {
            Ok(Some(pair)) => Some(Ok(pair)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

impl FusedIterator for Members<'_> {}
