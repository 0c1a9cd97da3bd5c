//! Byte classification tables.
//!
//! One 256-entry table per lexer state maps a raw byte to the transition the
//! engine applies. The tables are built by `const fn` at compile time and are
//! never written to.

/// What the engine does with one byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Op {
    /// Reject the byte.
    Fail,
    /// Stay in the current state.
    Skip,
    /// `:` or `=` between a member name and its value.
    Separator,
    /// `[` or `{`.
    Open,
    /// `]` or `}`.
    Close,
    /// Opening quote.
    QuoteOpen,
    /// Closing quote.
    QuoteClose,
    /// Backslash inside a string.
    Escape,
    /// A single-character escape body.
    Unescape,
    /// `u` after a backslash.
    UnicodeEscape,
    /// Hexadecimal digit of a `\u` escape.
    Hex,
    /// First byte of a number or `true`/`false`/`null`.
    Bare,
    /// Byte that ends a bare literal.
    Unbare,
    /// UTF-8 lead byte of a two-byte sequence.
    Utf8Lead2,
    /// UTF-8 lead byte of a three-byte sequence.
    Utf8Lead3,
    /// UTF-8 lead byte of a four-byte sequence.
    Utf8Lead4,
    /// `0xC0`/`0xC1`, only ever the start of an overlong encoding.
    OverlongLead,
    /// UTF-8 continuation byte.
    Continuation,
}

type Table = [Op; 256];

const fn fill(mut table: Table, from: u8, to: u8, op: Op) -> Table {
    let mut b = from as usize;
    while b <= to as usize {
        table[b] = op;
        b += 1;
    }
    table
}

const fn set(mut table: Table, bytes: &[u8], op: Op) -> Table {
    let mut i = 0;
    while i < bytes.len() {
        table[bytes[i] as usize] = op;
        i += 1;
    }
    table
}

const WHITESPACE: &[u8] = b"\t\n\r ";

const fn structural() -> Table {
    let t = [Op::Fail; 256];
    let t = set(t, WHITESPACE, Op::Skip);
    let t = set(t, b",", Op::Skip);
    let t = set(t, b":=", Op::Separator);
    let t = set(t, b"[{", Op::Open);
    let t = set(t, b"]}", Op::Close);
    let t = set(t, b"\"", Op::QuoteOpen);
    let t = fill(t, b'0', b'9', Op::Bare);
    set(t, b"-tfn", Op::Bare)
}

const fn bare() -> Table {
    let t = [Op::Fail; 256];
    let t = fill(t, 0x21, 0x7E, Op::Skip);
    let t = set(t, WHITESPACE, Op::Unbare);
    set(t, b",]}", Op::Unbare)
}

const fn string() -> Table {
    let t = [Op::Fail; 256];
    let t = fill(t, 0x20, 0x7E, Op::Skip);
    let t = set(t, b"\\", Op::Escape);
    let t = set(t, b"\"", Op::QuoteClose);
    let t = fill(t, 0xC0, 0xC1, Op::OverlongLead);
    let t = fill(t, 0xC2, 0xDF, Op::Utf8Lead2);
    let t = fill(t, 0xE0, 0xEF, Op::Utf8Lead3);
    fill(t, 0xF0, 0xF7, Op::Utf8Lead4)
}

const fn escape() -> Table {
    let t = [Op::Fail; 256];
    let t = set(t, b"\"\\/bfnrt", Op::Unescape);
    set(t, b"u", Op::UnicodeEscape)
}

const fn unicode_escape() -> Table {
    let t = [Op::Fail; 256];
    let t = fill(t, b'0', b'9', Op::Hex);
    let t = fill(t, b'a', b'f', Op::Hex);
    fill(t, b'A', b'F', Op::Hex)
}

const fn utf8() -> Table {
    fill([Op::Fail; 256], 0x80, 0xBF, Op::Continuation)
}

pub(crate) static STRUCTURAL: Table = structural();
pub(crate) static BARE: Table = bare();
pub(crate) static STRING: Table = string();
pub(crate) static ESCAPE: Table = escape();
pub(crate) static UNICODE_ESCAPE: Table = unicode_escape();
pub(crate) static UTF8: Table = utf8();
