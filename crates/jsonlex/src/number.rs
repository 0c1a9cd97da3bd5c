//! Decoding of number tokens.
//!
//! The decoder is a fixed-point accumulator, not a general decimal to binary
//! conversion: integer and exponent digits are summed as `n * 10 + d`, the
//! fraction as `d * 10^-k`. Results are exact for the short numbers typical of
//! configuration and protocol payloads, and drift by a few ulps once the
//! fraction or exponent gets long. Use a full parser on
//! [`Token::as_bytes`](crate::Token::as_bytes) where correct rounding matters.

use crate::error::{LexError, LexErrorKind};

/// Decodes a number token into an `f64`.
///
/// The token is split on the first `.` and the first `e`/`E` into integer,
/// fraction and exponent. Trailing ASCII whitespace ends the number.
///
/// # Errors
///
/// Fails with [`LexErrorKind::MalformedNumber`] on an empty token, a second
/// decimal point, a decimal point inside the exponent, a second exponent
/// marker, or a byte outside `0-9 + - . e E`.
///
/// # Examples
///
/// ```rust
/// use jsonlex::number;
///
/// assert_eq!(number::decode(b"-1234e-2").unwrap(), -12.34);
/// assert!(number::decode(b"1.2.3").is_err());
/// ```
pub fn decode(bytes: &[u8]) -> Result<f64, LexError> {
    decode_at(bytes, 0)
}

/// Like [`decode`], reporting error offsets relative to `base`.
pub(crate) fn decode_at(bytes: &[u8], base: usize) -> Result<f64, LexError> {
    let parts = Parts::split(bytes, base)?;

    let (int, negative) = integer(parts.int);
    let frac = fraction(parts.frac);
    let exp = exponent(parts.exp);

    let scale = pow10(exp.unsigned_abs());
    let scale = if exp < 0 { 1.0 / scale } else { scale };
    let frac = if negative { -frac } else { frac };
    Ok((int + frac) * scale)
}

struct Parts<'a> {
    int: &'a [u8],
    frac: &'a [u8],
    exp: &'a [u8],
}

impl<'a> Parts<'a> {
    fn split(bytes: &'a [u8], base: usize) -> Result<Self, LexError> {
        let malformed = |why, at| LexError::new(LexErrorKind::MalformedNumber(why), base + at);

        if bytes.is_empty() {
            return Err(malformed("empty token", 0));
        }

        let mut end = bytes.len();
        let mut dot = None;
        let mut marker = None;
        for (i, &b) in bytes.iter().enumerate() {
            match b {
                b'0'..=b'9' | b'+' | b'-' => {}
                b'.' if dot.is_some() => return Err(malformed("second decimal point", i)),
                b'.' if marker.is_some() => return Err(malformed("decimal point in exponent", i)),
                b'.' => dot = Some(i),
                b'e' | b'E' if marker.is_some() => {
                    return Err(malformed("second exponent marker", i));
                }
                b'e' | b'E' => marker = Some(i),
                b' ' | b'\t' | b'\n' | b'\r' => {
                    end = i;
                    break;
                }
                _ => return Err(malformed("unexpected byte", i)),
            }
        }

        let bytes = &bytes[..end];
        let int_end = dot.or(marker).unwrap_or(end);
        let frac = match dot {
            Some(d) => &bytes[d + 1..marker.unwrap_or(end)],
            None => &bytes[end..],
        };
        let exp = match marker {
            Some(m) => &bytes[m + 1..],
            None => &bytes[end..],
        };
        Ok(Self {
            int: &bytes[..int_end],
            frac,
            exp,
        })
    }
}

/// Splits a leading sign off `seg`.
fn sign(seg: &[u8]) -> (bool, &[u8]) {
    match seg.split_first() {
        Some((b'-', rest)) => (true, rest),
        Some((b'+', rest)) => (false, rest),
        _ => (false, seg),
    }
}

fn digits(seg: &[u8]) -> impl Iterator<Item = u8> + '_ {
    seg.iter().filter(|b| b.is_ascii_digit()).map(|b| b - b'0')
}

/// Returns the signed integer value and whether a `-` was written.
fn integer(seg: &[u8]) -> (f64, bool) {
    let (negative, seg) = sign(seg);
    let n = digits(seg).fold(0.0, |n, d| n * 10.0 + f64::from(d));
    (if negative { -n } else { n }, negative)
}

fn fraction(seg: &[u8]) -> f64 {
    let mut n = 0.0;
    let mut f = 0.1;
    for d in digits(seg) {
        n += f64::from(d) * f;
        f *= 0.1;
    }
    n
}

fn exponent(seg: &[u8]) -> i32 {
    let (negative, seg) = sign(seg);
    let n = digits(seg).fold(0i32, |n, d| n.saturating_mul(10).saturating_add(i32::from(d)));
    if negative { -n } else { n }
}

/// `10^exp` by square-and-multiply. Exact up to `10^22`.
fn pow10(mut exp: u32) -> f64 {
    let mut base = 10.0_f64;
    let mut result = 1.0;
    while exp != 0 {
        if exp & 1 == 1 {
            result *= base;
        }
        exp >>= 1;
        base *= base;
    }
    result
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(b"1234", 1234.0)]
    #[case(b"-1234", -1234.0)]
    #[case(b"1234.5678", 1234.5678)]
    #[case(b"-1234.5678", -1234.5678)]
    #[case(b"2e+2", 200.0)]
    #[case(b"2E2", 200.0)]
    #[case(b"-1234e-2", -12.34)]
    #[case(b"1.0", 1.0)]
    #[case(b"0", 0.0)]
    #[case(b"10 ", 10.0)]
    #[case(b"-0.5", -0.5)]
    #[case(b"0.25", 0.25)]
    fn decodes_exactly(#[case] src: &[u8], #[case] expected: f64) {
        assert_eq!(decode(src).unwrap(), expected);
    }

    #[test]
    fn small_exponent_is_close() {
        let n = decode(b"2.567e-4").unwrap();
        assert!((0.000_256_7..=0.000_256_8).contains(&n), "{n}");
    }

    #[test]
    fn large_exponent_saturates_to_infinity() {
        assert_eq!(decode(b"1e400").unwrap(), f64::INFINITY);
        assert_eq!(decode(b"1e-400").unwrap(), 0.0);
    }

    #[rstest]
    #[case(b"", "empty token", 0)]
    #[case(b"1.2.3", "second decimal point", 3)]
    #[case(b"1e2.5", "decimal point in exponent", 3)]
    #[case(b"1e2e3", "second exponent marker", 3)]
    #[case(b"true", "unexpected byte", 0)]
    #[case(b"12x", "unexpected byte", 2)]
    fn rejects_malformed(#[case] src: &[u8], #[case] why: &'static str, #[case] offset: usize) {
        let err = decode(src).unwrap_err();
        assert_eq!(err.kind(), LexErrorKind::MalformedNumber(why));
        assert_eq!(err.offset(), offset);
    }

    #[test]
    fn offsets_are_relative_to_base() {
        let err = decode_at(b"1..2", 40).unwrap_err();
        assert_eq!(err.offset(), 42);
    }

    #[test]
    fn interior_signs_are_ignored() {
        assert_eq!(decode(b"1-2").unwrap(), 12.0);
    }
}
