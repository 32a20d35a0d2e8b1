use flowtext::trie::encode;
use flowtext::{KeyTrie, KeyTrieBuilder, KeyTrieError, KeyTrieOptions};

/// Keys `k000`.. with one and two unit values, above and below the inline limit
fn sample_pairs() -> Vec<(String, String)> {
    (0..300u32)
        .map(|i| {
            let value = match i % 3 {
                0 => char::from_u32(0x41 + i % 26).map(String::from),
                1 => char::from_u32(0x4E00 + i).map(String::from),
                _ => char::from_u32(0x1F600 + i % 64).map(|ch| ch.to_string()),
            }
            .unwrap();
            (format!("k{i:03}"), value)
        })
        .collect()
}

#[test]
fn every_key_resolves_before_and_after_a_byte_round_trip() {
    let pairs = sample_pairs();
    let builder = KeyTrieBuilder::from_pairs(pairs.iter().map(|(k, v)| (k, v))).unwrap();
    let trie = encode(&builder, &KeyTrieOptions::default()).unwrap();
    let reloaded = KeyTrie::from_bytes(&trie.to_bytes()).unwrap();
    assert_eq!(reloaded, trie);

    for (key, value) in &pairs {
        assert_eq!(trie.get(key).as_ref(), Some(value), "key {key}");
        assert_eq!(reloaded.get(key).as_ref(), Some(value), "key {key}");
    }

    assert_eq!(trie.get("k"), None);
    assert_eq!(trie.get("k00"), None);
    assert_eq!(trie.get("k300"), None);
    assert_eq!(trie.get("x"), None);
}

#[test]
fn merging_duplicates_keeps_every_mapping() {
    let pairs = sample_pairs();
    let mut builder = KeyTrieBuilder::from_pairs(pairs.iter().map(|(k, v)| (k, v))).unwrap();
    let before = builder.reachable_nodes();
    builder.merge_duplicates();
    assert!(builder.reachable_nodes() <= before);

    let trie = encode(&builder, &KeyTrieOptions::default()).unwrap();
    for (key, value) in &pairs {
        assert_eq!(trie.get(key).as_ref(), Some(value), "key {key}");
    }
}

#[test]
fn jump_table_overhead_changes_layout_not_lookups() {
    let pairs = [("ab", "1"), ("ad", "2"), ("ak", "3"), ("az", "4")];
    let builder = KeyTrieBuilder::from_pairs(pairs).unwrap();

    let compact = encode(
        &builder,
        &KeyTrieOptions {
            max_jump_table_overhead: 0.0,
        },
    )
    .unwrap();
    let wide = encode(
        &builder,
        &KeyTrieOptions {
            max_jump_table_overhead: 100.0,
        },
    )
    .unwrap();
    assert_ne!(compact.words(), wide.words());

    for (key, value) in pairs {
        assert_eq!(compact.get(key).as_deref(), Some(value));
        assert_eq!(wide.get(key).as_deref(), Some(value));
    }
}

#[test]
fn capacity_limits_are_reported() {
    let wide: Vec<(String, &str)> = (0..200u32)
        .filter_map(|i| char::from_u32(0x100 + i))
        .map(|ch| (ch.to_string(), "v"))
        .collect();
    let builder = KeyTrieBuilder::from_pairs(wide).unwrap();
    assert!(matches!(
        encode(&builder, &KeyTrieOptions::default()),
        Err(KeyTrieError::Capacity {
            field: "branch count",
            ..
        })
    ));

    let builder = KeyTrieBuilder::from_pairs([("key", "abc")]).unwrap();
    assert!(matches!(
        encode(&builder, &KeyTrieOptions::default()),
        Err(KeyTrieError::Capacity {
            field: "value length",
            ..
        })
    ));
}

#[test]
fn node_offsets_beyond_sixteen_bits_are_reported() {
    // 40^3 leaves of three words each, reached through full jump tables
    let alphabet: Vec<char> = ('0'..='W').collect();
    assert_eq!(alphabet.len(), 40);
    let mut keys = Vec::new();
    for &a in &alphabet {
        for &b in &alphabet {
            for &c in &alphabet {
                keys.push(format!("{a}{b}{c}"));
            }
        }
    }
    let builder = KeyTrieBuilder::from_pairs(keys.iter().map(|key| (key, "\u{1F600}"))).unwrap();

    match encode(&builder, &KeyTrieOptions::default()) {
        Err(KeyTrieError::Capacity {
            field: "node offset",
            value,
            limit,
        }) => {
            assert_eq!(limit, 0xFFFF);
            assert!(value > limit);
        }
        other => panic!("expected a node offset capacity error, got {other:?}"),
    }

    // the same shape fits once identical leaves are shared
    let mut merged = builder;
    merged.merge_duplicates();
    let trie = encode(&merged, &KeyTrieOptions::default()).unwrap();
    assert_eq!(trie.get("0W3").as_deref(), Some("\u{1F600}"));
}

#[test]
fn entity_decoding_uses_the_encoded_table() {
    assert_eq!(
        flowtext::decode_entities("Caf&eacute; &lt;b&gt; &amp;&amp; &#x263A;&nbsp;&copy"),
        "Caf\u{E9} <b> && \u{263A}\u{A0}\u{A9}"
    );
    assert_eq!(
        flowtext::decode_entities("&hearts;&NotSquareSubset;&Zopf;"),
        "\u{2665}\u{228F}\u{338}\u{2124}"
    );
}

#[test]
fn full_entity_table_survives_a_byte_round_trip() {
    let entities = flowtext::trie::key::builtin_entities();
    assert!(entities.len() > 2000);
    let reloaded = KeyTrie::from_bytes(&flowtext::entity_trie().to_bytes()).unwrap();
    for &(name, value) in entities {
        assert_eq!(reloaded.get(name).as_deref(), Some(value), "entity {name}");
    }
}
