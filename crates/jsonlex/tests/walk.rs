#![allow(missing_docs)]

mod common;

use jsonlex::{Cursor, LexErrorKind, Token, TokenKind};
use serde_json::Value;

use crate::common::DOCUMENT;

/// Number of values nested anywhere inside `value`, member names excluded.
fn descendants(value: &Value) -> usize {
    match value {
        Value::Array(items) => items.iter().map(|v| 1 + descendants(v)).sum(),
        Value::Object(map) => map.values().map(|v| 1 + descendants(v)).sum(),
        _ => 0,
    }
}

/// Asserts that `token` delimits exactly `expected`, then descends into it.
fn assert_token(token: Token<'_>, expected: &Value, path: &str) {
    let parsed: Value = serde_json::from_slice(token.as_bytes())
        .unwrap_or_else(|e| panic!("{path}: token {token} is not JSON: {e}"));
    assert_eq!(&parsed, expected, "{path}");

    match expected {
        Value::Array(items) => {
            assert_eq!(token.kind(), TokenKind::Array, "{path}");
            assert_eq!(token.children(), items.len(), "{path}");
            assert_eq!(token.descendants(), descendants(expected), "{path}");
            let tokens = token
                .cursor()
                .tokens()
                .collect::<Result<Vec<_>, _>>()
                .unwrap();
            assert_eq!(tokens.len(), items.len(), "{path}");
            for (i, (t, v)) in tokens.into_iter().zip(items).enumerate() {
                assert_token(t, v, &format!("{path}[{i}]"));
            }
        }
        Value::Object(map) => {
            assert_eq!(token.kind(), TokenKind::Object, "{path}");
            assert_eq!(token.children(), map.len(), "{path}");
            assert_eq!(token.descendants(), descendants(expected), "{path}");
            assert_members(token.cursor(), map, path);
        }
        Value::Number(n) => {
            assert_eq!(token.kind(), TokenKind::Number, "{path}");
            let expected = n.as_f64().unwrap();
            let decoded = token.to_f64().unwrap();
            assert!(
                (decoded - expected).abs() <= expected.abs() * 1e-12,
                "{path}: {decoded} != {expected}"
            );
        }
        Value::String(_) => assert_eq!(token.kind(), TokenKind::String, "{path}"),
        Value::Bool(true) => assert_eq!(token.kind(), TokenKind::True, "{path}"),
        Value::Bool(false) => assert_eq!(token.kind(), TokenKind::False, "{path}"),
        Value::Null => assert_eq!(token.kind(), TokenKind::Null, "{path}"),
    }
}

fn assert_members(cursor: Cursor<'_>, map: &serde_json::Map<String, Value>, path: &str) {
    let pairs = cursor.members().collect::<Result<Vec<_>, _>>().unwrap();
    let names = pairs
        .iter()
        .map(|p| serde_json::from_slice::<String>(p.name.as_bytes()).unwrap())
        .collect::<Vec<_>>();
    let expected = map.keys().cloned().collect::<Vec<_>>();
    assert_eq!(names, expected, "{path}");

    for (pair, (key, value)) in pairs.into_iter().zip(map) {
        assert_token(pair.value, value, &format!("{path}.{key}"));
    }
}

#[test]
fn fixture_is_valid_json() {
    let value: Value = serde_json::from_str(DOCUMENT).unwrap();
    assert!(value.is_object());
}

#[test]
fn walk_matches_serde_json() {
    let value: Value = serde_json::from_str(DOCUMENT).unwrap();
    let map = value.as_object().unwrap();
    assert_members(Cursor::new(DOCUMENT.as_bytes()), map, "$");
}

#[test]
fn compact_and_pretty_forms_agree() {
    let value: Value = serde_json::from_str(DOCUMENT).unwrap();
    let compact = serde_json::to_string(&value).unwrap();
    let pretty = serde_json::to_string_pretty(&value).unwrap();

    for src in [&compact, &pretty] {
        let counts = Cursor::new(src.as_bytes())
            .members()
            .map(|p| {
                let p = p.unwrap();
                (p.value.children(), p.value.descendants())
            })
            .collect::<Vec<_>>();
        assert_eq!(counts, [(6, 6), (4, 9), (2, 12), (4, 4), (3, 10), (0, 0)]);
    }
}

#[test]
fn lookup_by_name() {
    let mut service = None;
    for pair in Cursor::new(DOCUMENT.as_bytes()).members() {
        let pair = pair.unwrap();
        if pair.name.dequoted() == "service" {
            service = Some(pair.value);
        }
    }
    let service = service.unwrap();

    let replicas = service
        .cursor()
        .members()
        .map(Result::unwrap)
        .find(|p| p.name.raw_eq("\"replicas\""))
        .unwrap();
    assert_eq!(replicas.value.to_f64(), Ok(3.0));

    let mut region = [0u8; 16];
    let name = service
        .cursor()
        .members()
        .map(Result::unwrap)
        .find(|p| p.name == "\"region\"")
        .unwrap();
    let len = name.value.dequoted().copy_to(&mut region);
    assert_eq!(&region[..len], b"eu-west-1");
    assert_eq!(region[len], 0);
}

#[test]
fn truncated_document_reports_end() {
    let cut = &DOCUMENT.as_bytes()[..DOCUMENT.len() / 2];
    let err = Cursor::new(cut)
        .members()
        .find_map(Result::err)
        .unwrap();
    assert_eq!(err.kind(), LexErrorKind::UnexpectedEnd);
    assert_eq!(err.offset(), cut.len());
}
