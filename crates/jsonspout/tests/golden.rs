use jsonspout::{ChunkSplitter, MersenneTwister, write_document};

/// The first 37 chunks of the seed-0 stream as produced by the reference
/// generator.
const SEED0_PREFIX: &[u8] = include_bytes!("fixtures/seed0_prefix.bin");

const SEED0_CHUNK_SIZES: [usize; 37] = [
    861, 189, 0, 4, 1, 384, 4, 639, 191, 304, 1, 548, 812, 637, 1, 323, 0, 579, 618, 1, 719, 0,
    821, 653, 642, 132, 1024, 1024, 720, 945, 4, 745, 456, 782, 622, 694, 1024,
];

/// End offsets of the first whole documents in the seed-0 stream.
const SEED0_DOCUMENT_ENDS: [usize; 6] = [2, 59, 68, 306, 327, 329];

#[test]
fn seed_zero_reproduces_reference_bytes() {
    let mut splitter = ChunkSplitter::from_seed(0);
    let mut joined = Vec::with_capacity(SEED0_PREFIX.len());
    for expected in SEED0_CHUNK_SIZES {
        let chunk = splitter.next_chunk();
        assert_eq!(chunk.len(), expected);
        joined.extend_from_slice(&chunk);
    }
    assert_eq!(joined.len(), SEED0_PREFIX.len());
    assert!(joined == SEED0_PREFIX, "seed 0 stream diverged from reference");
}

#[test]
fn seed_zero_documents_end_where_expected() {
    let mut rng = MersenneTwister::from_seed(0);
    let mut out = Vec::new();
    for end in SEED0_DOCUMENT_ENDS {
        write_document(&mut rng, &mut out);
        assert_eq!(out.len(), end);
    }
    assert_eq!(&out[..2], b"{}");
    assert_eq!(&out[..], &SEED0_PREFIX[..out.len()]);
}

#[test]
fn independent_streams_agree() {
    let a: Vec<_> = ChunkSplitter::from_seed(77).take(500).collect();
    let b: Vec<_> = ChunkSplitter::from_seed(77).take(500).collect();
    assert_eq!(a, b);

    let c: Vec<_> = ChunkSplitter::from_seed(78).take(500).collect();
    assert_ne!(a, c);
}

#[test]
fn chunk_edges_ignore_document_and_character_boundaries() {
    let mut offset = 0;
    let mut ends = Vec::new();
    let mut broken_utf8 = 0;
    for size in SEED0_CHUNK_SIZES {
        let chunk = &SEED0_PREFIX[offset..offset + size];
        offset += size;
        ends.push(offset);
        if core::str::from_utf8(chunk).is_err() {
            broken_utf8 += 1;
        }
    }
    assert!(broken_utf8 > 0);
    assert!(ends.iter().all(|end| !SEED0_DOCUMENT_ENDS.contains(end)));
}

#[test]
fn stream_is_not_one_json_value() {
    let stream: Vec<u8> = ChunkSplitter::from_seed(0).take(64).flatten().collect();
    assert!(serde_json::from_slice::<serde_json::Value>(&stream).is_err());
}

#[test]
fn streaming_parser_finds_concatenated_documents() {
    let mut values =
        serde_json::Deserializer::from_slice(SEED0_PREFIX).into_iter::<serde_json::Value>();

    for end in &SEED0_DOCUMENT_ENDS[..3] {
        let value = values
            .next()
            .expect("a document")
            .expect("strict JSON document");
        assert!(value.is_object());
        assert_eq!(values.byte_offset(), *end);
    }

    // The fourth document carries `-Infinity`, which strict JSON rejects.
    assert!(matches!(values.next(), Some(Err(_))));
}
