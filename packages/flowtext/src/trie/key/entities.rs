//! HTML character reference decoding over an encoded key trie

use ::entities::ENTITIES;
use once_cell::sync::Lazy;

use super::{encode, KeyTrie, KeyTrieBuilder};
use crate::config::KeyTrieOptions;
use crate::error::KeyTrieError;

/// Names HTML also accepts without the closing `;`
const LEGACY_NAMES: &[&str] = &[
    "AElig", "AMP", "Aacute", "Acirc", "Agrave", "Aring", "Atilde", "Auml", "COPY", "Ccedil",
    "ETH", "Eacute", "Ecirc", "Egrave", "Euml", "GT", "Iacute", "Icirc", "Igrave", "Iuml", "LT",
    "Ntilde", "Oacute", "Ocirc", "Ograve", "Oslash", "Otilde", "Ouml", "QUOT", "REG", "THORN",
    "Uacute", "Ucirc", "Ugrave", "Uuml", "Yacute", "aacute", "acirc", "acute", "aelig",
    "agrave", "amp", "aring", "atilde", "auml", "brvbar", "ccedil", "cedil", "cent", "copy",
    "curren", "deg", "divide", "eacute", "ecirc", "egrave", "eth", "euml", "frac12", "frac14",
    "frac34", "gt", "iacute", "icirc", "iexcl", "igrave", "iquest", "iuml", "laquo", "lt",
    "macr", "micro", "middot", "nbsp", "not", "ntilde", "oacute", "ocirc", "ograve", "ordf",
    "ordm", "oslash", "otilde", "ouml", "para", "plusmn", "pound", "quot", "raquo", "reg",
    "sect", "shy", "sup1", "sup2", "sup3", "szlig", "thorn", "times", "uacute", "ucirc",
    "ugrave", "uml", "uuml", "yacute", "yen", "yuml",
];

static BUILTIN_ENTITIES: Lazy<Vec<(&'static str, &'static str)>> = Lazy::new(|| {
    let mut entities: Vec<(&'static str, &'static str)> = ENTITIES
        .iter()
        .map(|entity| (entity.entity.trim_start_matches('&'), entity.characters))
        .collect();
    for &name in LEGACY_NAMES {
        let terminated = ENTITIES.iter().find_map(|entity| {
            let key = entity.entity.strip_prefix('&')?.strip_suffix(';')?;
            (key == name).then_some(entity.characters)
        });
        match terminated {
            Some(characters) => entities.push((name, characters)),
            None => log::warn!("legacy entity {name} has no terminated form"),
        }
    }
    entities
});

/// Every WHATWG named reference as `(name, characters)`, without the
/// leading `&`. Names lacking a trailing `;` are the legacy unterminated
/// forms.
pub fn builtin_entities() -> &'static [(&'static str, &'static str)] {
    &BUILTIN_ENTITIES
}

static ENTITY_TRIE: Lazy<KeyTrie> = Lazy::new(|| {
    build_entity_trie(builtin_entities()).unwrap_or_else(|err| {
        log::error!("failed to encode built-in entity table: {err}");
        KeyTrie::empty()
    })
});

/// Encoded trie of the built-in entity table
pub fn entity_trie() -> &'static KeyTrie {
    &ENTITY_TRIE
}

/// Build, merge and encode a table of `(name, characters)` pairs
pub fn build_entity_trie(entities: &[(&str, &str)]) -> Result<KeyTrie, KeyTrieError> {
    let mut builder = KeyTrieBuilder::from_pairs(entities.iter().copied())?;
    builder.merge_duplicates();
    encode(&builder, &KeyTrieOptions::default())
}

/// Replace character references in `text` using the built-in table
pub fn decode_entities(text: &str) -> String {
    decode_entities_with(entity_trie(), text)
}

/// Replace named (`&amp;`) and numeric (`&#38;`, `&#x26;`) character
/// references. Unknown references are kept as written.
pub fn decode_entities_with(trie: &KeyTrie, text: &str) -> String {
    let units: Vec<u16> = text.encode_utf16().collect();
    let mut output = Vec::with_capacity(units.len());
    let mut index = 0;

    while index < units.len() {
        if units[index] != u16::from(b'&') {
            output.push(units[index]);
            index += 1;
            continue;
        }

        let rest = &units[index + 1..];
        if let Some((consumed, ch)) = numeric_reference(rest) {
            let mut buffer = [0u16; 2];
            output.extend_from_slice(ch.encode_utf16(&mut buffer));
            index += 1 + consumed;
            continue;
        }

        match trie
            .longest_match(rest)
            .and_then(|found| Some((found.len, trie.value_at(found.node)?)))
        {
            Some((consumed, value)) => {
                output.extend_from_slice(&value);
                index += 1 + consumed;
            }
            None => {
                output.push(units[index]);
                index += 1;
            }
        }
    }

    String::from_utf16_lossy(&output)
}

/// Parse `#123;` or `#x7B;` following an ampersand
fn numeric_reference(units: &[u16]) -> Option<(usize, char)> {
    if units.first() != Some(&u16::from(b'#')) {
        return None;
    }

    let (radix, digits_start) = match units.get(1) {
        Some(&unit) if unit == u16::from(b'x') || unit == u16::from(b'X') => (16, 2),
        _ => (10, 1),
    };

    let mut value: u32 = 0;
    let mut end = digits_start;
    while let Some(digit) = units
        .get(end)
        .and_then(|&unit| char::from_u32(u32::from(unit)))
        .and_then(|ch| ch.to_digit(radix))
    {
        value = value.saturating_mul(radix).saturating_add(digit);
        end += 1;
    }
    if end == digits_start {
        return None;
    }
    if units.get(end) == Some(&u16::from(b';')) {
        end += 1;
    }

    let ch = match value {
        0 => char::REPLACEMENT_CHARACTER,
        _ => char::from_u32(value).unwrap_or(char::REPLACEMENT_CHARACTER),
    };
    Some((end, ch))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_named_references() {
        assert_eq!(decode_entities("a &amp; b &lt;c&gt;"), "a & b <c>");
        assert_eq!(decode_entities("&copy; 2024 &mdash; &Afr;"), "\u{A9} 2024 \u{2014} \u{1D504}");
        assert_eq!(decode_entities("I &hearts; &fjlig;ords"), "I \u{2665} fjords");
    }

    #[test]
    fn legacy_references_need_no_semicolon() {
        assert_eq!(decode_entities("&ampx"), "&x");
        assert_eq!(decode_entities("&notit"), "\u{AC}it");
        assert_eq!(decode_entities("&notin;"), "\u{2209}");
    }

    #[test]
    fn unknown_references_are_kept() {
        assert_eq!(decode_entities("&bogus; & &"), "&bogus; & &");
        assert_eq!(decode_entities("&mdash"), "&mdash");
    }

    #[test]
    fn decodes_numeric_references() {
        assert_eq!(decode_entities("&#65;&#x42;&#X43"), "ABC");
        assert_eq!(decode_entities("&#x1F600;"), "\u{1F600}");
        assert_eq!(decode_entities("&#xD800;"), "\u{FFFD}");
        assert_eq!(decode_entities("&#;"), "&#;");
    }

    #[test]
    fn builtin_table_covers_the_whatwg_list() {
        let entities = builtin_entities();
        assert_eq!(LEGACY_NAMES.len(), 106);
        assert_eq!(entities.len(), ENTITIES.len() + LEGACY_NAMES.len());
        assert!(entities.contains(&("hearts;", "\u{2665}")));
        assert!(entities.contains(&("NotNestedGreaterGreater;", "\u{2AA2}\u{338}")));
        assert!(entities.contains(&("yuml", "\u{FF}")));
    }

    #[test]
    fn every_builtin_entity_round_trips() {
        let trie = entity_trie();
        assert_ne!(trie, &KeyTrie::empty());
        for &(name, value) in builtin_entities() {
            assert_eq!(trie.get(name).as_deref(), Some(value), "entity {name}");
            assert_eq!(decode_entities(&format!("&{name}")), value, "entity {name}");
        }
    }
}
