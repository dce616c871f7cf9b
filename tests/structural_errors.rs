use byteorder::{ByteOrder, LittleEndian};

use NxCfg::{collect_entries, decode_bytes, CfgError, RenderMode};

mod common;
use common::*;

fn decode_err(bytes: &[u8], mode: RenderMode) -> (CfgError, String) {
    let mut out = Vec::new();
    let err = decode_bytes(bytes, mode, &mut out).expect_err("decode must fail");
    (err, String::from_utf8(out).unwrap())
}

fn patch_size(buf: &mut [u8]) {
    let n = buf.len() as u32;
    LittleEndian::write_u32(&mut buf[..4], n);
}

#[test]
fn size_mismatch_produces_no_output() {
    for mode in [RenderMode::Stream, RenderMode::Sorted] {
        let mut buf = container(&[u8_record("sys!flag", 1)]);
        LittleEndian::write_u32(&mut buf[..4], 999);
        let (err, out) = decode_err(&buf, mode);
        assert!(
            matches!(err, CfgError::SizeMismatch { declared: 999, actual: 23 }),
            "{err:?}"
        );
        assert!(out.is_empty());
    }
}

#[test]
fn short_tail_is_truncated_header() {
    let mut buf = container(&[u8_record("sys!flag", 1)]);
    buf.extend_from_slice(&[0xAA, 0xBB]);
    patch_size(&mut buf);
    let (err, out) = decode_err(&buf, RenderMode::Stream);
    assert!(
        matches!(err, CfgError::TruncatedHeader { entry_offset: 23, bytes_left: 2 }),
        "{err:?}"
    );
    // первая запись уже выведена в потоковом режиме
    assert_eq!(out, "[sys]\nflag = u8!0x01\n");

    // в режиме сбора — ничего
    let (_, out) = decode_err(&buf, RenderMode::Sorted);
    assert!(out.is_empty());
}

#[test]
fn zero_name_size_is_truncated_name() {
    let mut buf = container(&[]);
    buf.extend_from_slice(&[0; 9]);
    patch_size(&mut buf);
    let (err, _) = decode_err(&buf, RenderMode::Stream);
    assert!(
        matches!(err, CfgError::TruncatedName { entry_offset: 4, name_size: 0, .. }),
        "{err:?}"
    );
}

#[test]
fn oversized_name_halts_before_next_record() {
    let mut first = u8_record("sys!a", 1);
    // name_size заявляет больше, чем есть в буфере
    LittleEndian::write_u32(&mut first[..4], 0x1000);
    let buf = container(&[first, u8_record("sys!b", 2)]);
    let (err, out) = decode_err(&buf, RenderMode::Stream);
    assert!(
        matches!(
            err,
            CfgError::TruncatedName { entry_offset: 4, name_size: 0x1000, .. }
        ),
        "{err:?}"
    );
    assert!(out.is_empty());
}

#[test]
fn name_without_room_for_type_and_size_is_truncated() {
    // имя помещается, но 5 байт type+value_size — нет
    let mut buf = container(&[]);
    buf.extend_from_slice(&4u32.to_le_bytes());
    buf.extend_from_slice(b"a!b\0");
    buf.extend_from_slice(&[U8, 1, 0, 0]);
    patch_size(&mut buf);
    let (err, _) = decode_err(&buf, RenderMode::Stream);
    assert!(
        matches!(
            err,
            CfgError::TruncatedName { entry_offset: 4, bytes_left: 8, name_size: 4 }
        ),
        "{err:?}"
    );
}

#[test]
fn oversized_value_is_truncated_value() {
    let mut rec = u8_record("sys!a", 1);
    // value_size находится после name_size(4) + имени(6) + type(1)
    LittleEndian::write_u32(&mut rec[11..15], 50);
    let buf = container(&[rec]);
    let (err, _) = decode_err(&buf, RenderMode::Stream);
    assert!(
        matches!(
            err,
            CfgError::TruncatedValue { entry_offset: 4, bytes_left: 1, value_size: 50 }
        ),
        "{err:?}"
    );
}

#[test]
fn malformed_names() {
    let cases: Vec<Vec<u8>> = vec![
        raw_record(b"sys!flag", U8, &[1]),        // нет NUL
        raw_record(b"sys!flag\0\0", U8, &[1]),    // два NUL
        raw_record(b"sys\0flag\0", U8, &[1]),     // NUL внутри
        raw_record(&[0xFF, b'!', b'x', 0], U8, &[1]), // не UTF-8
    ];
    for rec in cases {
        let buf = container(&[rec]);
        let (err, _) = decode_err(&buf, RenderMode::Stream);
        assert!(matches!(err, CfgError::MalformedName { entry_offset: 4 }), "{err:?}");
    }
}

#[test]
fn missing_owner_anywhere_in_stream() {
    let buf = container(&[u8_record("noowner", 1)]);
    let (err, _) = decode_err(&buf, RenderMode::Stream);
    assert!(matches!(err, CfgError::MissingOwner { entry_offset: 4 }), "{err:?}");

    let first = u8_record("sys!a", 1);
    let second_off = 4 + first.len() as u64;
    let buf = container(&[first, u8_record("noowner", 1), u8_record("sys!c", 3)]);
    let (err, out) = decode_err(&buf, RenderMode::Stream);
    match err {
        CfgError::MissingOwner { entry_offset } => assert_eq!(entry_offset, second_off),
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(out, "[sys]\na = u8!0x01\n");
}

#[test]
fn fixed_width_values_are_checked() {
    for bad in [&[][..], &[1, 2][..], &[1, 2, 3, 4][..]] {
        let buf = container(&[record("sys!a", U8, bad)]);
        let (err, _) = decode_err(&buf, RenderMode::Stream);
        assert!(
            matches!(err, CfgError::ValueSizeMismatch { entry_offset: 4, expected: 1, .. }),
            "{err:?}"
        );
    }
    for bad in [&[][..], &[1][..], &[1, 2, 3][..], &[1, 2, 3, 4, 5][..]] {
        let buf = container(&[record("sys!a", U32, bad)]);
        let (err, _) = decode_err(&buf, RenderMode::Sorted);
        assert!(
            matches!(err, CfgError::ValueSizeMismatch { entry_offset: 4, expected: 4, .. }),
            "{err:?}"
        );
    }
    // STR — любая длина, включая 0
    for ok in [&[][..], &[b'a'][..], &[b'a'; 300][..]] {
        let buf = container(&[record("sys!a", STR, ok)]);
        assert!(collect_entries(&buf[..], buf.len() as u64).is_ok());
    }
}

#[test]
fn unknown_type_tag() {
    for tag in [0x00u8, 0x04, 0x7F, 0xFF] {
        let buf = container(&[record("sys!a", tag, &[1])]);
        let (err, _) = decode_err(&buf, RenderMode::Stream);
        assert!(
            matches!(err, CfgError::UnknownType { entry_offset: 4, type_byte } if type_byte == tag),
            "{err:?}"
        );
    }
}

#[test]
fn invalid_utf8_string_value() {
    let buf = container(&[record("sys!a", STR, &[0xC0, 0x80])]);
    let (err, _) = decode_err(&buf, RenderMode::Stream);
    assert!(matches!(err, CfgError::MalformedString { entry_offset: 4 }), "{err:?}");
}

#[test]
fn buffer_shorter_than_header() {
    let (err, _) = decode_err(&[4, 0], RenderMode::Stream);
    assert!(matches!(err, CfgError::FileTooSmall { size: 2 }), "{err:?}");
}

#[test]
fn error_messages_name_the_offset() {
    let buf = container(&[u8_record("sys!a", 1), u8_record("bad", 1)]);
    let (err, _) = decode_err(&buf, RenderMode::Stream);
    assert_eq!(err.entry_offset(), Some(0x14));
    let msg = err.to_string();
    assert!(msg.contains("0x14"), "{msg}");
    assert!(!msg.contains('\n'));
}
