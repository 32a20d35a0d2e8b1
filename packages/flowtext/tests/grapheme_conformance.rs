use flowtext::{GraphemeBreaker, PropertyTables};
use unicode_segmentation::UnicodeSegmentation;

/// Cases in the GraphemeBreakTest.txt format: `÷` marks a boundary and `×`
/// marks a position that must not break
const CASES: &[&str] = &[
    "÷ 0020 × 0308 ÷",
    "÷ 0020 ÷ 0020 ÷",
    "÷ 000D × 000A ÷",
    "÷ 000D ÷ 0308 ÷",
    "÷ 000A ÷ 0308 ÷",
    "÷ 0001 ÷ 0020 ÷",
    "÷ D800 ÷ 0308 ÷",
    "÷ 0061 ÷ DC00 ÷",
    "÷ DC00 ÷ D800 ÷",
    "÷ 0308 ÷ DFFF ÷",
    "÷ D800 ÷ 200D ÷",
    "÷ 000D ÷ DBFF ÷ 000A ÷",
    "÷ 1F1E6 ÷ DC00 ÷ 1F1E7 ÷",
    "÷ 0600 × 0020 ÷",
    "÷ 0061 × 0903 ÷",
    "÷ 1100 × 1161 × 11A8 ÷",
    "÷ 1100 × AC00 ÷",
    "÷ AC01 × 11A8 ÷",
    "÷ 11A8 ÷ 1100 ÷",
    "÷ 1F1E6 × 1F1E7 ÷ 1F1E8 ÷",
    "÷ 0061 ÷ 1F1E6 × 1F1E7 ÷",
    "÷ 1F476 × 1F3FF ÷ 1F476 ÷",
    "÷ 1F6D1 × 200D × 1F6D1 ÷",
    "÷ 0061 × 200D ÷ 1F6D1 ÷",
    "÷ 2701 × 200D × 2701 ÷",
    "÷ 0915 × 094D × 0924 ÷",
    "÷ 0915 × 094D × 094D × 0924 ÷",
    "÷ 0915 × 0300 ÷ 0924 ÷",
];

/// UTF-16 text and its boundary offsets
fn parse_case(line: &str) -> (Vec<u16>, Vec<usize>) {
    let mut text = Vec::new();
    let mut boundaries = Vec::new();
    for token in line.split_whitespace() {
        match token {
            "÷" => boundaries.push(text.len()),
            "×" => {}
            hex => {
                let cp = u32::from_str_radix(hex, 16).expect("hex code point");
                match char::from_u32(cp) {
                    Some(ch) => {
                        let mut buffer = [0u16; 2];
                        text.extend_from_slice(ch.encode_utf16(&mut buffer));
                    }
                    // lone surrogates are written as-is
                    None => text.push(cp as u16),
                }
            }
        }
    }
    (text, boundaries)
}

fn forward_boundaries(breaker: &GraphemeBreaker, text: &[u16]) -> Vec<usize> {
    let mut boundaries = vec![0];
    let mut offset = 0;
    while offset < text.len() {
        offset = breaker.next_break(text, offset);
        boundaries.push(offset);
    }
    boundaries
}

#[test]
fn conformance_cases() {
    let breaker = GraphemeBreaker::default();
    for line in CASES {
        let (text, expected) = parse_case(line);
        assert_eq!(forward_boundaries(&breaker, &text), expected, "case {line}");
        for index in 0..=text.len() {
            assert_eq!(
                breaker.should_break(&text, index),
                expected.contains(&index),
                "case {line} at {index}"
            );
        }
    }
}

#[test]
fn backward_walk_mirrors_forward_walk() {
    let breaker = GraphemeBreaker::default();
    let samples = [
        "e\u{301}\u{302}x\r\n\u{1F468}\u{200D}\u{1F469}\u{200D}\u{1F467}!",
        "\u{1F1FA}\u{1F1F8}\u{1F1EB}\u{1F1F7}\u{1F1E9}",
        "\u{915}\u{94D}\u{924}\u{947} \u{D55C}\u{AD6D}\u{C5B4}",
    ];
    for sample in samples {
        let text: Vec<u16> = sample.encode_utf16().collect();
        let boundaries = forward_boundaries(&breaker, &text);
        for pair in boundaries.windows(2) {
            assert_eq!(breaker.previous_break(&text, pair[1]), pair[0], "{sample:?}");
            assert!(pair[1] > pair[0]);
        }
        let ranges: Vec<_> = breaker.graphemes(&text).collect();
        assert_eq!(ranges.first().map(|range| range.start), Some(0));
        assert_eq!(ranges.last().map(|range| range.end), Some(text.len()));
    }
}

#[test]
fn agrees_with_unicode_segmentation() {
    let breaker = GraphemeBreaker::default();
    let samples = [
        "Hello, w\u{F6}rld!",
        "e\u{301}a\u{308}\u{20DD}",
        "\u{1F468}\u{200D}\u{1F469}\u{200D}\u{1F467} \u{1F476}\u{1F3FB}",
        "\u{1F1FA}\u{1F1F8}\u{1F1EB}\u{1F1F7}",
        "\u{D55C}\u{AD6D}\u{C5B4} \u{1100}\u{1161}\u{11A8}",
        "\u{E20}\u{E32}\u{E29}\u{E32}\u{E44}\u{E17}\u{E22}",
        "line\r\nbreak\n",
    ];
    for sample in samples {
        let text: Vec<u16> = sample.encode_utf16().collect();

        let mut expected = vec![0];
        let mut offset = 0;
        for grapheme in sample.graphemes(true) {
            offset += grapheme.encode_utf16().count();
            expected.push(offset);
        }

        assert_eq!(forward_boundaries(&breaker, &text), expected, "{sample:?}");
    }
}

/// UTF-16 boundaries of the extended grapheme clusters found by
/// `unicode-segmentation`
fn reference_boundaries(text: &str) -> Vec<usize> {
    let mut boundaries = vec![0];
    let mut offset = 0;
    for grapheme in text.graphemes(true) {
        offset += grapheme.encode_utf16().count();
        boundaries.push(offset);
    }
    boundaries
}

#[test]
fn every_scalar_value_agrees_with_unicode_segmentation() {
    let breaker = GraphemeBreaker::default();
    let mut mismatches = Vec::new();
    let mut checked = 0usize;

    for ch in (0..=0x10FFFF).filter_map(char::from_u32) {
        let contexts = [
            format!("{ch}\u{308}"),
            format!("a{ch}"),
            format!("{ch}{ch}"),
            format!("\u{915}\u{94D}{ch}"),
        ];
        for sample in contexts {
            let text: Vec<u16> = sample.encode_utf16().collect();
            let actual = forward_boundaries(&breaker, &text);
            if actual != reference_boundaries(&sample) {
                mismatches.push((sample, actual));
            }
            checked += 1;
        }
    }

    assert_eq!(checked, 4 * (0x110000 - 0x800));
    assert!(
        mismatches.is_empty(),
        "{} mismatches, first: {:?}",
        mismatches.len(),
        &mismatches[..mismatches.len().min(8)]
    );
}

#[test]
fn lone_surrogates_never_join_their_neighbours() {
    let breaker = GraphemeBreaker::default();
    for unit in (0xD800..=0xDFFF).step_by(0x3F) {
        for neighbour in [0x0308, 0x200D, 0x0061, 0x000A, 0x1F3FB] {
            let mut buffer = [0u16; 2];
            let Some(ch) = char::from_u32(neighbour) else {
                continue;
            };
            let encoded = ch.encode_utf16(&mut buffer);

            let mut after = vec![unit as u16];
            after.extend_from_slice(encoded);
            assert_eq!(
                forward_boundaries(&breaker, &after),
                [0, 1, after.len()],
                "{unit:04X} then {neighbour:04X}"
            );

            let mut before = encoded.to_vec();
            let split = before.len();
            before.push(unit as u16);
            let ranges: Vec<_> = breaker.graphemes(&before).collect();
            assert_eq!(ranges.last(), Some(&(split..split + 1)), "{neighbour:04X} then {unit:04X}");
        }
    }
}

#[test]
fn reloaded_tables_segment_identically() {
    let shared = GraphemeBreaker::default();
    let tables = PropertyTables::from_blobs(&flowtext::tables().to_blobs()).unwrap();
    let reloaded = GraphemeBreaker::new(&tables);
    for line in CASES {
        let (text, _) = parse_case(line);
        assert_eq!(
            forward_boundaries(&reloaded, &text),
            forward_boundaries(&shared, &text)
        );
    }
}
