use flowtext::{line_breaks, Break, LineBreakOptions, LineBreaker, NewlineBreaks, PropertyTables};

fn utf16(text: &str) -> Vec<u16> {
    text.encode_utf16().collect()
}

const SAMPLE: &str = "The quick (brown) fox\njumps over \u{65E5}\u{672C}\u{8A9E}.\n\
                      \u{5E9}\u{5DC}\u{5D5}\u{5DD} 3.14 \u{1F1EF}\u{1F1F5}\u{1F1FA}\u{1F1F8}";

#[test]
fn breaks_are_increasing_and_end_the_text() {
    let text = utf16(SAMPLE);
    let found: Vec<Break> = line_breaks(&text).collect();

    assert!(found.windows(2).all(|pair| pair[0].position < pair[1].position));
    assert_eq!(found.last(), Some(&Break { position: text.len(), required: false }));
    for found in &found {
        assert!(found.position > 0);
        if found.position < text.len() {
            assert!(!(0xDC00..=0xDFFF).contains(&text[found.position]), "{found:?}");
        }
    }
}

#[test]
fn required_breaks_follow_line_feeds() {
    let text = utf16(SAMPLE);
    let required: Vec<usize> = line_breaks(&text)
        .filter(|found| found.required)
        .map(|found| found.position)
        .collect();
    let newlines: Vec<usize> = NewlineBreaks::new(&text)
        .filter(|&offset| offset < text.len())
        .collect();
    assert_eq!(required, newlines);

    let hard_only: Vec<Break> = LineBreaker::new(
        &text,
        flowtext::tables(),
        LineBreakOptions {
            hard_breaks_only: true,
        },
    )
    .collect();
    assert_eq!(hard_only.len(), required.len() + 1);
}

#[test]
fn soft_breaks_in_the_sample() {
    let text = utf16("jumps over \u{65E5}\u{672C}\u{8A9E}.");
    let positions: Vec<usize> = line_breaks(&text).map(|found| found.position).collect();
    // after each space, between ideographs, never before the full stop
    assert_eq!(positions, [6, 11, 12, 13, 15]);
}

#[test]
fn reloaded_tables_break_identically() {
    let text = utf16(SAMPLE);
    let tables = PropertyTables::from_blobs(&flowtext::tables().to_blobs()).unwrap();
    let reloaded: Vec<Break> =
        LineBreaker::new(&text, &tables, LineBreakOptions::default()).collect();
    assert_eq!(reloaded, line_breaks(&text).collect::<Vec<_>>());
}
