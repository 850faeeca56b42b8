//! Tests for `key` module

use super::error::Error;
use super::key::*;

// ========== PositionFlags Tests ==========

#[test]
fn test_flags_bit_values() {
    assert_eq!(PositionFlags::BEGIN.bits(), 0x01);
    assert_eq!(PositionFlags::MIDDLE.bits(), 0x02);
    assert_eq!(PositionFlags::END.bits(), 0x04);
    assert!(PositionFlags::NONE.is_empty());
}

#[test]
fn test_flags_combine() {
    let flags = PositionFlags::MIDDLE | PositionFlags::END;

    assert!(flags.contains(PositionFlags::MIDDLE));
    assert!(flags.contains(PositionFlags::END));
    assert!(!flags.contains(PositionFlags::BEGIN));
    assert!(flags.intersects(PositionFlags::END | PositionFlags::BEGIN));
    assert!(!flags.intersects(PositionFlags::BEGIN));
    assert_eq!(flags & PositionFlags::END, PositionFlags::END);
}

#[test]
fn test_flags_from_bits_rejects_unknown() {
    assert_eq!(PositionFlags::from_bits(0x05), Some(PositionFlags::BEGIN | PositionFlags::END));
    assert_eq!(PositionFlags::from_bits(0x08), None);
    assert_eq!(PositionFlags::from_bits(0xFF), None);
}

#[test]
fn test_flags_display() {
    assert_eq!(PositionFlags::NONE.to_string(), "NONE");
    assert_eq!(
        (PositionFlags::MIDDLE | PositionFlags::BEGIN).to_string(),
        "BEGIN|MIDDLE"
    );
}

// ========== Key Encoding Tests ==========

#[test]
fn test_empty_marker_is_single_sentinel() {
    assert_eq!(Key::EmptyMarker.encode(), vec![SENTINEL]);
    assert_eq!(Key::EmptyMarker.body(), &[SENTINEL]);
    assert_eq!(Key::EmptyMarker.encoded_len(), 1);
}

#[test]
fn test_rotation_builder() {
    let key = Key::rotation(b"llo", b"he");
    assert_eq!(key, Key::Rotation(b"llo\0he".to_vec()));
    assert_eq!(key.encode(), b"llo\0he".to_vec());
    assert!(!key.is_flagged());
    assert_eq!(key.flags(), PositionFlags::NONE);
}

#[test]
fn test_flagged_encoding_prefixes_sentinel_and_flag() {
    let key = Key::flagged(PositionFlags::BEGIN, b"hel");

    assert_eq!(key.encode(), vec![SENTINEL, 0x01, b'h', b'e', b'l']);
    assert_eq!(key.encoded_len(), 5);
    assert_eq!(key.body(), b"hel");
    assert_eq!(key.flags(), PositionFlags::BEGIN);
}

#[test]
fn test_decode_each_variant() {
    let keys = [
        Key::EmptyMarker,
        Key::Rotation(b"o\0hell".to_vec()),
        Key::Literal(b"llo".to_vec()),
        Key::Literal(Vec::new()),
        Key::flagged(PositionFlags::MIDDLE | PositionFlags::END, b"cd"),
    ];

    for key in keys {
        let decoded = Key::decode(&key.encode()).expect("decode");
        assert_eq!(decoded, key);
    }
}

#[test]
fn test_decode_rejects_flag_without_literal() {
    let err = Key::decode(&[SENTINEL, 0x02]).unwrap_err();
    assert!(matches!(err, Error::MalformedKey(_)));
    assert_eq!(err.code(), "PERM-001");
}

#[test]
fn test_decode_rejects_unknown_flag_bits() {
    let err = Key::decode(&[SENTINEL, 0x40, b'a']).unwrap_err();
    assert!(matches!(err, Error::MalformedKey(_)));
}

#[test]
fn test_decode_rejects_zero_flag() {
    assert!(Key::decode(&[SENTINEL, 0x00, b'a']).is_err());
}

#[test]
fn test_key_display_uses_marker() {
    assert_eq!(Key::rotation(b"lo", b"hel").to_string(), "lo$hel");
    assert_eq!(Key::EmptyMarker.to_string(), "$");
    assert_eq!(
        Key::flagged(PositionFlags::BEGIN, b"hel").to_string(),
        "$[BEGIN]hel"
    );
}

#[test]
fn test_render_sentinel() {
    assert_eq!(render_sentinel(b""), "");
    assert_eq!(render_sentinel(b"\0"), "$");
    assert_eq!(render_sentinel(b"hello\0"), "hello$");
    assert_eq!(render_sentinel("é\0caf".as_bytes()), "é$caf");
}

// ========== SearchKey / QueryKeys Tests ==========

#[test]
fn test_search_key_modes() {
    assert!(!SearchKey::exact(Key::EmptyMarker).partial_match);
    assert!(SearchKey::partial(Key::Literal(b"x".to_vec())).partial_match);
}

#[test]
fn test_query_keys_parallel_views() {
    let query = QueryKeys::from(vec![
        SearchKey::partial(Key::rotation(b"ab", b"")),
        SearchKey::partial(Key::flagged(PositionFlags::MIDDLE, b"c")),
    ]);

    assert_eq!(query.len(), 2);
    assert_eq!(
        query.encoded(),
        vec![b"ab\0".to_vec(), vec![SENTINEL, 0x02, b'c']]
    );
    assert_eq!(query.partial_match_flags(), vec![true, true]);
}
