#![no_main]
use arbitrary::Unstructured;
use jsonlex::{Cursor, LexErrorKind, LexerOptions, TokenKind};
use libfuzzer_sys::{fuzz_mutator, fuzz_target, fuzzer_mutate};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde_json::{Map, Number, Value};

const HEADER: usize = 5; // 1 flag byte + 4-byte seed

/// Byte sequences that sit on lexer state boundaries: separators, brackets,
/// escapes, truncated and overlong UTF-8, and bytes the tables reject.
static EDGES: &[&[u8]] = &[
    b" ", b"\t", b"\r\n", b",", b":", b"=", b"[", b"]", b"{", b"}", b"\"",
    b"\\", b"\\u", b"\\u00e9", b"\\uZZ", b"\\x",
    b"\xC0\x80", b"\xC3", b"\xC3\xA9", b"\xE2\x82", b"\xF0\x9F\x98\x80", b"\xF8", b"\x80",
    b"\x7F", b"\x01", b"-", b"1e", b"0.5", b"true", b"nul",
];

/// Rebuilds the input about one time in ten as a header followed by
/// generated JSON interleaved with edge fragments; otherwise defers to
/// libFuzzer's own mutations.
fn mutator(data: &mut [u8], size: usize, max_size: usize, seed: u32) -> usize {
    if max_size <= HEADER || (size >= HEADER && !seed.is_multiple_of(10)) {
        return fuzzer_mutate(data, size, max_size);
    }
    let mut rng = SmallRng::seed_from_u64(u64::from(seed));
    data[0] = rng.random::<u8>() & 0x03;
    data[1..HEADER].copy_from_slice(&rng.random::<u32>().to_le_bytes());

    let mut len = HEADER;
    while len < size.max(HEADER + 1) && len < max_size {
        let fragment = if rng.random_ratio(1, 4) {
            EDGES[rng.random_range(0..EDGES.len())].to_vec()
        } else {
            document(&mut rng, size)
        };
        let n = fragment.len().min(max_size - len);
        data[len..len + n].copy_from_slice(&fragment[..n]);
        len += n;
    }
    len
}

/// Serializes a generated container, retrying until the raw bytes decode.
fn document(rng: &mut SmallRng, size: usize) -> Vec<u8> {
    loop {
        let n = rng.random_range(1..=size.clamp(16, 4096));
        let raw: Vec<u8> = (0..n).map(|_| rng.random()).collect();
        let mut u = Unstructured::new(&raw);
        if let Ok(value) = container(&mut u, 3) {
            return serde_json::to_vec(&value).unwrap_or_default();
        }
    }
}

fn container(u: &mut Unstructured<'_>, depth: u32) -> arbitrary::Result<Value> {
    let len = u.int_in_range(0..=4)?;
    if u.arbitrary()? {
        (0..len).map(|_| value(u, depth)).collect::<arbitrary::Result<_>>().map(Value::Array)
    } else {
        let mut map = Map::new();
        for _ in 0..len {
            map.insert(u.arbitrary()?, value(u, depth)?);
        }
        Ok(Value::Object(map))
    }
}

fn value(u: &mut Unstructured<'_>, depth: u32) -> arbitrary::Result<Value> {
    Ok(match u.choose_index(if depth == 0 { 5 } else { 6 })? {
        0 => Value::Null,
        1 => Value::Bool(u.arbitrary()?),
        2 => Value::Number(Number::from(u.arbitrary::<i64>()?)),
        3 => Number::from_f64(u.arbitrary()?).map_or(Value::Null, Value::Number),
        4 => Value::String(u.arbitrary()?),
        _ => container(u, depth - 1)?,
    })
}

fuzz_mutator!(|data: &mut [u8], size: usize, max_size: usize, seed: u32| {
    mutator(data, size, max_size, seed)
});

/// Walks every level below `cursor`, re-reading a seed-chosen saved cursor
/// at each level to check that resuming is deterministic.
fn walk(cursor: Cursor<'_>, seed: u32) -> Result<usize, jsonlex::LexError> {
    let mut saved = cursor;
    let mut replay = None;
    let mut seen = 0;
    let mut tokens = cursor.tokens();
    loop {
        let at = tokens.cursor();
        let Some(token) = tokens.next() else { break };
        let token = token?;
        if seen == seed as usize % 8 {
            saved = at;
            replay = Some(token);
        }
        seen += 1;
        assert!(token.offset() + token.len() <= cursor.remaining().len() + cursor.position());
        assert_eq!(token.options(), cursor.options());
        if matches!(token.kind(), TokenKind::Object | TokenKind::Array) {
            seen += walk(token.cursor(), seed.rotate_left(3))?;
        }
    }
    if let Some(expected) = replay {
        assert_eq!(saved.read().0, Some(expected));
    }
    Ok(seen)
}

fn lexer(data: &[u8]) {
    if data.len() < HEADER {
        return;
    }
    let flags = data[0];
    let seed = u32::from_le_bytes([data[1], data[2], data[3], data[4]]);
    let data = &data[HEADER..];

    let options = LexerOptions {
        allow_overlong_utf8_leads: flags & 1 != 0,
        validate_unicode_escapes: flags & 2 != 0,
        panic_on_error: false,
    };
    let result = walk(Cursor::with_options(data, options), seed);

    if let Err(err) = result {
        assert!(err.offset() <= data.len());
    }

    // Well-formed containers are always accepted, except for raw DEL in
    // strings, which JSON permits and the lexer rejects.
    let Ok(value) = serde_json::from_slice::<Value>(data) else {
        return;
    };
    match result {
        Ok(_) => {}
        Err(err) if err.kind() == LexErrorKind::InvalidStringByte(0x7F) => return,
        Err(err) => panic!("valid JSON rejected: {err}"),
    }

    let top = Cursor::with_options(data, options)
        .tokens()
        .map(|t| t.expect("accepted above"))
        .count();
    match value {
        Value::Array(items) => assert_eq!(top, items.len()),
        // Duplicate names collapse in the map.
        Value::Object(map) => assert!(top % 2 == 0 && top / 2 >= map.len()),
        _ => assert_eq!(top, 0),
    }
}

fuzz_target!(|data: &[u8]| lexer(data));
