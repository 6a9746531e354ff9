use crate::{
    KEYS, Literal, MersenneTwister, Number, SCALARS, Value, ValueGenerator, max_len,
    rand::testing::{Scripted, bits},
};

/// Two words that make `random()` return a value just below 1.0.
const HIGH_FLOAT: [u32; 2] = [u32::MAX, u32::MAX];

fn scalar_word(index: u32) -> u32 {
    // SCALARS has 36 entries: `below(36)` reads 6 bits.
    bits(index, 6)
}

fn pool_index(literal: Literal) -> u32 {
    SCALARS
        .iter()
        .position(|l| match (l, &literal) {
            (Literal::Float(a), Literal::Float(b)) => a.to_bits() == b.to_bits(),
            (a, b) => a == b,
        })
        .expect("literal is in the pool") as u32
}

/// Asserts every collection respects `max(10 - depth, 1)` where slot `i` of a
/// collection at depth `d` sits at depth `d + i`.
fn assert_decay(value: &Value, depth: usize) {
    match value {
        Value::Array(items) => {
            assert!(items.len() <= max_len(depth), "array too long at {depth}");
            for (i, item) in items.iter().enumerate() {
                assert_decay(item, depth + i);
            }
        }
        Value::Object(object) => {
            assert!(object.len() <= max_len(depth), "object too long at {depth}");
            for (i, item) in object.values().enumerate() {
                assert_decay(item, depth + i);
            }
        }
        _ => {}
    }
}

#[test]
fn max_len_decays_to_one() {
    assert_eq!(max_len(0), 10);
    assert_eq!(max_len(3), 7);
    assert_eq!(max_len(9), 1);
    assert_eq!(max_len(10), 1);
    assert_eq!(max_len(500), 1);
}

#[test]
fn zero_words_yield_first_high_range_codepoint() {
    let mut rng = Scripted::new([0; 6]);
    let value = ValueGenerator::new(&mut rng).generate(0);

    // kind, random() x2, length, range selector, codepoint
    assert_eq!(value, Value::String("\u{E000}".to_owned()));
    assert_eq!(rng.drawn, 6);
}

#[test]
fn empty_document_draws_only_its_length() {
    let mut rng = Scripted::new([0]);
    let value = ValueGenerator::new(&mut rng).generate_document();

    assert_eq!(value, Value::Object(Default::default()));
    assert_eq!(rng.drawn, 1);
}

#[test]
fn object_key_is_drawn_before_its_value() {
    let mut words = vec![bits(1, 4)];
    words.extend(HIGH_FLOAT);
    words.push(bits(4, 4)); // KEYS[4]
    words.push(bits(0, 3)); // scalar
    words.extend(HIGH_FLOAT);
    words.push(scalar_word(pool_index(Literal::Str("hello, world"))));

    let mut rng = Scripted::new(words);
    let value = ValueGenerator::new(&mut rng).generate_document();

    let Value::Object(object) = value else {
        panic!("documents are objects");
    };
    assert_eq!(object.keys().collect::<Vec<_>>(), [KEYS[4]]);
    assert_eq!(object.get("quack"), Some(&Value::from("hello, world")));
    assert_eq!(rng.remaining(), 0);
}

#[test]
fn duplicate_keys_keep_the_last_value() {
    let mut words = vec![bits(2, 4)];
    for literal in [Literal::Int(-1), Literal::Int(8)] {
        words.extend(HIGH_FLOAT);
        words.push(bits(1, 4)); // "a"
        words.push(bits(0, 3));
        words.extend(HIGH_FLOAT);
        words.push(scalar_word(pool_index(literal)));
    }

    let mut rng = Scripted::new(words);
    let value = ValueGenerator::new(&mut rng).generate_document();

    let Value::Object(object) = value else {
        panic!("documents are objects");
    };
    assert_eq!(object.len(), 1);
    assert_eq!(object.get("a"), Some(&Value::Number(Number::Int(8))));
}

#[test]
fn deep_chain_does_not_recurse() {
    const LEVELS: usize = 1_000;

    // First slots stay at the parent's depth, so a chain of one-element
    // arrays never decays.
    let mut words = Vec::with_capacity(LEVELS * 2 + 4);
    for _ in 0..LEVELS {
        words.push(bits(1, 3)); // array
        words.push(bits(1, 4)); // one slot
    }
    words.push(bits(0, 3));
    words.extend(HIGH_FLOAT);
    words.push(scalar_word(pool_index(Literal::Null)));

    let mut rng = Scripted::new(words);
    let value = ValueGenerator::new(&mut rng).generate(0);

    assert_eq!(value.nesting(), LEVELS);
    assert_eq!(rng.remaining(), 0);
}

#[test]
fn seeded_documents_are_reproducible() {
    let mut a = MersenneTwister::from_seed(7);
    let mut b = MersenneTwister::from_seed(7);
    for _ in 0..50 {
        let left = ValueGenerator::new(&mut a).generate_document();
        let right = ValueGenerator::new(&mut b).generate_document();
        // NaN != NaN, so compare renderings instead of values.
        assert_eq!(format!("{left:?}"), format!("{right:?}"));
    }
}

#[test]
fn documents_respect_depth_decay() {
    for seed in 0..20 {
        let mut rng = MersenneTwister::from_seed(seed);
        let mut generator = ValueGenerator::new(&mut rng);
        for _ in 0..50 {
            let document = generator.generate_document();
            assert!(matches!(document, Value::Object(_)));
            assert_decay(&document, 0);
        }
    }
}

#[test]
fn random_characters_are_short_and_valid() {
    let mut rng = MersenneTwister::from_seed(3);
    let mut generator = ValueGenerator::new(&mut rng);
    let mut saw_high = false;
    let mut saw_low = false;
    for _ in 0..2_000 {
        let s = generator.characters();
        let count = s.chars().count();
        assert!((1..=4).contains(&count), "{count} codepoints");
        for c in s.chars() {
            let cp = c as u32;
            assert!(!(0xD800..0xE000).contains(&cp));
            saw_low |= cp < 0xD800;
            saw_high |= cp >= 0xE000;
        }
    }
    assert!(saw_low && saw_high);
}

#[test]
fn keys_come_from_pool_or_random_characters() {
    let mut rng = MersenneTwister::from_seed(11);
    let mut generator = ValueGenerator::new(&mut rng);
    let mut pooled = 0;
    for _ in 0..1_000 {
        let key = generator.key();
        if KEYS.contains(&key.as_str()) {
            pooled += 1;
        } else {
            assert!((1..=4).contains(&key.chars().count()));
        }
    }
    // About 80% pooled, plus random strings that happen to collide.
    assert!(pooled > 700, "{pooled} pooled keys");
}
