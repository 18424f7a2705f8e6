use headpack::dictionary::HeaderField;
use headpack::entropy::{EntropyCoder, HuffmanCoder, PassthroughCoder};
use headpack::packer::{FieldView, Packer, PackerDecodeError, PackerEncodeError, PackerError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io::Cursor;
use std::sync::Arc;

fn owned(fields: Vec<FieldView<'_>>) -> Vec<(Vec<u8>, Vec<u8>)> {
    fields
        .into_iter()
        .map(|field| (field.name.into_owned(), field.value.into_owned()))
        .collect()
}

fn random_fields(rng: &mut StdRng, count: usize) -> Vec<(Vec<u8>, Vec<u8>)> {
    const NAME_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789-";
    (0..count)
        .map(|_| {
            let name_len = rng.random_range(1..16);
            let name = (0..name_len)
                .map(|_| NAME_CHARS[rng.random_range(0..NAME_CHARS.len())])
                .collect();
            let mut value = vec![0u8; rng.random_range(1..40)];
            if rng.random_range(0..2) == 0 {
                rng.fill(&mut value[..]);
            } else {
                for b in value.iter_mut() {
                    *b = rng.random_range(b' '..=b'~');
                }
            }
            (name, value)
        })
        .collect()
}

#[test]
fn test_concrete_scenario_uses_each_field_kind() {
    let mut packer = Packer::builder()
        .name("content-type")
        .field("content-encoding", ["snappy"])
        .build()
        .unwrap();

    let fields = [
        ("content-type", "text/plain"),
        ("content-encoding", "snappy"),
        ("x-trace", "abc123"),
    ];
    let frame = packer.encode(fields).unwrap();

    let body = &frame[2..];
    assert_eq!(u16::from_le_bytes([frame[0], frame[1]]) as usize, body.len());

    // content-type: name reference to index 0, value coded since shorter
    let coded = HuffmanCoder.encoded_len(b"text/plain") as usize;
    assert!(coded < b"text/plain".len());
    assert_eq!(body[0], 0x02);
    assert_eq!(body[1], 0);
    assert_eq!(body[2] as usize, (coded << 1) | 1);

    // content-encoding: snappy is entry 2, after the two name-only entries
    let next = 3 + coded;
    assert_eq!(&body[next..next + 2], &[0x03, 2]);

    // x-trace: unknown name, full literal
    assert_eq!(body[next + 2], 0x01);

    let decoded = packer.decode(&frame).unwrap();
    assert_eq!(
        owned(decoded),
        fields
            .iter()
            .map(|(n, v)| (n.as_bytes().to_vec(), v.as_bytes().to_vec()))
            .collect::<Vec<_>>()
    );
}

#[test]
fn test_random_round_trips_with_and_without_dictionary() {
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for round in 0..200 {
        let count = rng.random_range(0..20);
        let fields = random_fields(&mut rng, count);

        // Register roughly half of the fields, some by name only.
        let mut builder = Packer::builder().max_frame_size(65_535);
        for (i, (name, value)) in fields.iter().enumerate() {
            let name = String::from_utf8(name.clone()).unwrap();
            match (round + i) % 3 {
                0 => builder = builder.name(&name),
                1 => {
                    if let Ok(value) = std::str::from_utf8(value) {
                        if value.trim() == value {
                            builder = builder.field(&name, [value]);
                        }
                    }
                }
                _ => {}
            }
        }

        let mut with_dictionary = builder.build().unwrap();
        let mut without_dictionary = Packer::builder().max_frame_size(65_535).build().unwrap();

        for packer in [&mut with_dictionary, &mut without_dictionary] {
            let frame = packer.encode(fields.iter().map(|(n, v)| (n, v))).unwrap();
            assert_eq!(owned(packer.decode(&frame).unwrap()), fields);
        }
    }
}

#[test]
fn test_literal_names_keep_their_case() {
    let mut packer = Packer::builder()
        .name("content-type")
        .build()
        .unwrap();
    let frame = packer
        .encode([("X-Trace", "abc123"), ("Content-Type", "text/plain")])
        .unwrap();

    // unknown names travel as literals, registered ones match regardless of case
    assert_eq!(frame[2], 0x01);

    let decoded = packer.decode(&frame).unwrap();
    assert_eq!(decoded[0].name(), b"X-Trace");
    assert_eq!(decoded[0].value(), b"abc123");
    assert_eq!(decoded[1].name(), b"content-type");
    assert_eq!(decoded[1].value(), b"text/plain");
}

#[test]
fn test_varint_overflow_in_frame() {
    let packer = Packer::new();
    let mut frame = vec![12, 0, 0x03];
    frame.extend_from_slice(&[0xff; 10]);
    frame.push(0x01);

    assert_eq!(
        packer.decode(&frame),
        Err(PackerDecodeError::VarIntOverflow { offset: 1 })
    );
}

#[test]
fn test_index_past_dictionary_end() {
    let packer = Packer::builder().field("a", ["b"]).build().unwrap();

    assert_eq!(
        packer.decode(&[2, 0, 0x03, 50]),
        Err(PackerDecodeError::UnknownPairIndex(50))
    );
    assert_eq!(
        packer.decode(&[4, 0, 0x02, 50, 1 << 1, b'v']),
        Err(PackerDecodeError::UnknownNameIndex(50))
    );
}

#[test]
fn test_literal_longer_than_frame() {
    let packer = Packer::new();

    assert_eq!(
        packer.decode(&[4, 0, 0x01, 10 << 1, b'a', b'b']),
        Err(PackerDecodeError::TruncatedLiteral {
            claimed: 10,
            remaining: 2
        })
    );
}

#[test]
fn test_dictionary_stability() {
    let mut packer = Packer::builder()
        .field("method", ["get", "put"])
        .build()
        .unwrap();

    let first = packer.encode([("method", "put")]).unwrap();
    let second = packer.encode([("method", "put")]).unwrap();
    assert_eq!(first, second);
    assert_eq!(first, vec![2, 0, 0x03, 2]);

    let literal_a = packer.encode([("path", "/users")]).unwrap();
    let literal_b = packer.encode([("path", "/users")]).unwrap();
    assert_eq!(literal_a, literal_b);
    assert_eq!(literal_a[2], 0x01);
}

#[test]
fn test_size_enforcement_writes_nothing() {
    let mut packer = Packer::builder().max_frame_size(64).build().unwrap();
    let mut rng = StdRng::seed_from_u64(7);
    let mut blob = vec![0u8; 100];
    rng.fill(&mut blob[..]);

    let err = packer.encode([(&b"blob"[..], &blob[..])]).unwrap_err();
    assert!(matches!(err, PackerEncodeError::FrameTooLarge { max: 64, .. }));

    let mut out = Vec::new();
    let err = packer
        .pack_to(&mut out, [(&b"blob"[..], &blob[..])])
        .unwrap_err();
    assert!(matches!(err, PackerError::Encode(PackerEncodeError::FrameTooLarge { .. })));
    assert!(out.is_empty());

    // The packer is still usable afterwards.
    let frame = packer.encode([("small", "ok")]).unwrap();
    assert_eq!(owned(packer.decode(&frame).unwrap()).len(), 1);
}

#[test]
fn test_entropy_coding_is_transparent_for_every_length() {
    let max_frame_size = 1024;
    // tag, raw one byte name literal, two byte value prefix
    let max_value_len = max_frame_size - 5;

    let mut rng = StdRng::seed_from_u64(42);
    let mut huffman = Packer::builder().max_frame_size(max_frame_size).build().unwrap();
    let mut passthrough = Packer::builder()
        .max_frame_size(max_frame_size)
        .entropy_coder(Arc::new(PassthroughCoder))
        .build()
        .unwrap();

    for len in 1..=max_value_len {
        let mut binary = vec![0u8; len];
        rng.fill(&mut binary[..]);
        let text: Vec<u8> = (0..len).map(|i| b"etaoinshrdlu"[i % 12]).collect();

        for value in [&binary, &text] {
            for packer in [&mut huffman, &mut passthrough] {
                let frame = packer.encode([(&b"v"[..], &value[..])]).unwrap();
                let decoded = packer.decode(&frame).unwrap();
                assert_eq!(decoded.len(), 1);
                assert_eq!(decoded[0].value(), &value[..], "length {}", len);
            }
        }
    }
}

#[test]
fn test_passthrough_coder_sends_raw_literals() {
    let mut packer = Packer::new().with_entropy_coder(Arc::new(PassthroughCoder));
    let frame = packer.encode([("ab", "cd")]).unwrap();
    assert_eq!(frame, vec![7, 0, 0x01, 2 << 1, b'a', b'b', 2 << 1, b'c', b'd']);
}

#[test]
fn test_truncation_and_tag_corruption_are_rejected() {
    let mut rng = StdRng::seed_from_u64(99);
    let mut packer = Packer::builder()
        .max_frame_size(65_535)
        .field("status", ["ok", "error"])
        .name("host")
        .build()
        .unwrap();

    for _ in 0..200 {
        let count = rng.random_range(1..8);
        let mut fields = random_fields(&mut rng, count);
        fields.push((b"status".to_vec(), b"ok".to_vec()));
        fields.push((b"host".to_vec(), b"db-1".to_vec()));
        let frame = packer.encode(fields.iter().map(|(n, v)| (n, v))).unwrap();

        // Dropping the last byte breaks the declared length.
        assert!(matches!(
            packer.decode(&frame[..frame.len() - 1]),
            Err(PackerDecodeError::LengthMismatch { .. })
        ));

        // Any tag outside the three known kinds is refused.
        let mut flipped = frame.clone();
        flipped[2] = rng.random_range(4..=u8::MAX);
        assert!(matches!(
            packer.decode(&flipped),
            Err(PackerDecodeError::UnknownFieldKind { offset: 0, .. })
        ));
    }
}

#[test]
fn test_cutting_a_field_short_is_an_error() {
    let mut packer = Packer::builder()
        .field("kind", ["a"])
        .name("known")
        .build()
        .unwrap();

    let samples: [(&[u8], &[u8]); 3] = [
        (b"unknown-name", b"some value that is long"),
        (b"known", b"\x00\x01\x02 binary"),
        (b"kind", b"a"),
    ];
    for (name, value) in samples {
        let frame = packer.encode([(name, value)]).unwrap();
        let body = &frame[2..];
        for cut in 1..body.len() {
            let mut truncated = (cut as u16).to_le_bytes().to_vec();
            truncated.extend_from_slice(&body[..cut]);
            assert!(
                packer.decode(&truncated).is_err(),
                "cut at {} of {:?}",
                cut,
                name
            );
        }
    }
}

#[test]
fn test_random_input_never_panics() {
    let mut rng = StdRng::seed_from_u64(1234);
    let packer = Packer::builder().field("a", ["b", "c"]).build().unwrap();

    for _ in 0..2000 {
        let len = rng.random_range(0..64);
        let mut body = vec![0u8; len];
        rng.fill(&mut body[..]);
        let mut frame = (len as u16).to_le_bytes().to_vec();
        frame.extend_from_slice(&body);
        let _ = packer.decode(&frame);
    }
}

#[test]
fn test_stream_round_trip_through_io() {
    let mut sender = Packer::builder().field("k", ["v"]).build().unwrap();
    let mut receiver = sender.share();

    let mut wire = Vec::new();
    sender.pack_to(&mut wire, [("k", "v"), ("other", "x")]).unwrap();
    sender.pack_to(&mut wire, [("k", "w")]).unwrap();

    let mut reader = Cursor::new(wire);
    let first = owned(receiver.unpack_from(&mut reader).unwrap());
    assert_eq!(first.len(), 2);
    let second = owned(receiver.unpack_from(&mut reader).unwrap());
    assert_eq!(second, vec![(b"k".to_vec(), b"w".to_vec())]);

    match receiver.unpack_from(&mut reader) {
        Err(PackerError::Io(e)) => assert_eq!(e.kind(), std::io::ErrorKind::UnexpectedEof),
        other => panic!("expected end of stream, got {:?}", other),
    }
}

#[test]
fn test_decode_into_collects_owned_fields() {
    let mut packer = Packer::new();
    let frame = packer.encode([("a", "1"), ("b", "2")]).unwrap();

    let mut sink: Vec<HeaderField> = Vec::new();
    assert_eq!(packer.decode_into(&frame, &mut sink), Ok(2));
    assert_eq!(sink, vec![HeaderField::new("a", "1"), HeaderField::new("b", "2")]);

    let decoded = packer.decode(&frame).unwrap();
    assert_eq!(decoded[1].to_field(), HeaderField::new("b", "2"));
}
