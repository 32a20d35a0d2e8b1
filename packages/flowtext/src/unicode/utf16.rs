//! Surrogate-aware stepping over UTF-16 code units
//!
//! Lone surrogates are treated as code points equal to their own value.

#[inline]
pub const fn is_high_surrogate(unit: u16) -> bool {
    matches!(unit, 0xD800..=0xDBFF)
}

#[inline]
pub const fn is_low_surrogate(unit: u16) -> bool {
    matches!(unit, 0xDC00..=0xDFFF)
}

/// Whether `index` is the second half of a well-formed surrogate pair
#[inline]
pub fn is_trailing_half(text: &[u16], index: usize) -> bool {
    index > 0
        && index < text.len()
        && is_low_surrogate(text[index])
        && is_high_surrogate(text[index - 1])
}

#[inline]
fn combine(high: u16, low: u16) -> u32 {
    ((u32::from(high) - 0xD800) << 10) + (u32::from(low) - 0xDC00) + 0x10000
}

/// Code point containing the unit at `index`.
///
/// Landing on the second half of a pair yields the whole pair.
pub fn code_point_at(text: &[u16], index: usize) -> Option<u32> {
    let unit = *text.get(index)?;
    if is_high_surrogate(unit) {
        if let Some(&next) = text.get(index + 1) {
            if is_low_surrogate(next) {
                return Some(combine(unit, next));
            }
        }
    } else if is_trailing_half(text, index) {
        return Some(combine(text[index - 1], unit));
    }
    Some(u32::from(unit))
}

/// Start of the code point that ends just before `index`
#[inline]
pub fn previous_start(text: &[u16], index: usize) -> Option<usize> {
    let previous = index.checked_sub(1)?;
    if is_trailing_half(text, previous) {
        Some(previous - 1)
    } else {
        Some(previous)
    }
}

/// Code unit length of the code point starting at `index`
#[inline]
pub fn code_point_len(text: &[u16], index: usize) -> usize {
    if is_high_surrogate(text[index]) && text.get(index + 1).is_some_and(|&next| is_low_surrogate(next)) {
        2
    } else {
        1
    }
}

/// Iterator of `(offset, code point)` pairs
pub fn code_points(text: &[u16]) -> impl Iterator<Item = (usize, u32)> + '_ {
    let mut index = 0;
    std::iter::from_fn(move || {
        let cp = code_point_at(text, index)?;
        let start = index;
        index += code_point_len(text, index);
        Some((start, cp))
    })
}
