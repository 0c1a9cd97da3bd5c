//! A zero-allocation, zero-copy JSON lexer.
//!
//! `jsonlex` never builds a document tree. A [`Cursor`] walks an immutable
//! byte buffer and each read delimits exactly one JSON value one level below
//! the cursor's current nesting depth: a string, a bare literal (number,
//! `true`, `false`, `null`), or a whole balanced object or array. Nested
//! structures that were not asked for are skipped by depth bookkeeping alone,
//! so auxiliary memory stays O(1) however deeply the input nests.
//!
//! To look inside an object or array, begin a fresh cursor over that token's
//! bytes with [`Token::cursor`].
//!
//! # Examples
//!
//! ```rust
//! use jsonlex::{Cursor, TokenKind};
//!
//! let src = br#"{"name":"value", "list":[1.0, 2.0, 3.0, 4.0]}"#;
//! let mut cursor = Cursor::new(src);
//!
//! let pair = cursor.next_pair().unwrap().unwrap();
//! assert_eq!(pair.name, "\"name\"");
//! assert_eq!(pair.value.kind(), TokenKind::String);
//!
//! let pair = cursor.next_pair().unwrap().unwrap();
//! assert_eq!(pair.value.kind(), TokenKind::Array);
//! assert_eq!(pair.value.children(), 4);
//!
//! let numbers: Vec<f64> = pair
//!     .value
//!     .cursor()
//!     .tokens()
//!     .map(|token| token.unwrap().to_f64().unwrap())
//!     .collect();
//! assert_eq!(numbers, [1.0, 2.0, 3.0, 4.0]);
//!
//! assert!(cursor.next_pair().unwrap().is_none());
//! ```

#![no_std]

#[cfg(test)]
extern crate std;

#[cfg(feature = "tracing")]
macro_rules! trace {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace {
    ($($arg:tt)*) => {};
}

mod error;
mod lexer;
pub mod number;
mod options;
mod token;

#[cfg(test)]
mod tests;

pub use error::{LexError, LexErrorKind};
pub use lexer::{Cursor, LexState, Members, Tokens};
pub use options::LexerOptions;
pub use token::{Pair, Token, TokenKind};
