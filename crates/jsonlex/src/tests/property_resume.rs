use std::{string::ToString, vec::Vec};

use quickcheck::QuickCheck;

use super::arbitrary::Doc;
use crate::Cursor;

/// Property: a cursor saved at any point in a scan reads the same token as
/// the unbroken scan did from that point, in whatever order the saved
/// cursors are revisited.
#[test]
fn saved_cursors_replay_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(doc: Doc, picks: Vec<usize>) -> bool {
        let src = doc.0.to_string();
        let mut saved = Vec::new();
        let mut tokens = Vec::new();
        let mut cursor = Cursor::new(src.as_bytes());
        loop {
            saved.push(cursor);
            let (token, next) = cursor.read();
            match token {
                Some(token) => tokens.push(token),
                None if next.is_error() => return false,
                None => break,
            }
            cursor = next;
        }

        picks.iter().all(|&pick| {
            let i = pick % saved.len();
            saved[i].read().0 == tokens.get(i).copied()
        })
    }

    #[cfg(not(miri))]
    let tests = if is_ci::cached() { 10_000 } else { 1_000 };
    #[cfg(miri)]
    let tests = 10;

    QuickCheck::new()
        .tests(tests)
        .quickcheck(prop as fn(Doc, Vec<usize>) -> bool);
}

/// Property: two cursors over the same buffer, advanced in an arbitrary
/// interleaving, each see the full token sequence.
#[test]
fn interleaved_cursors_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(doc: Doc, schedule: Vec<bool>) -> bool {
        let src = doc.0.to_string();
        let expected = Cursor::new(src.as_bytes()).tokens().collect::<Vec<_>>();

        let mut left = (Cursor::new(src.as_bytes()), Vec::new());
        let mut right = (Cursor::new(src.as_bytes()), Vec::new());
        let mut turns = schedule.into_iter().chain(core::iter::repeat(true));
        while !left.0.is_exhausted() || !right.0.is_exhausted() {
            let pick_left = turns.next().unwrap_or(true);
            let (cursor, seen) = if (pick_left && !left.0.is_exhausted()) || right.0.is_exhausted() {
                &mut left
            } else {
                &mut right
            };
            match cursor.next_token() {
                Ok(Some(token)) => seen.push(Ok(token)),
                Ok(None) => {}
                Err(err) => {
                    seen.push(Err(err));
                    break;
                }
            }
        }
        left.1 == expected && right.1 == expected
    }

    #[cfg(not(miri))]
    let tests = if is_ci::cached() { 10_000 } else { 1_000 };
    #[cfg(miri)]
    let tests = 10;

    QuickCheck::new()
        .tests(tests)
        .quickcheck(prop as fn(Doc, Vec<bool>) -> bool);
}
