#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

/// One code unit in, one out, so match offsets stay valid in the unfolded text.
fn fold_unit(unit: u16) -> u16 {
    let Some(ch) = char::from_u32(u32::from(unit)) else {
        return unit; // surrogate half
    };
    let mut lower = ch.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) if u32::from(l) <= 0xFFFF => u32::from(l) as u16,
        _ => unit,
    }
}

fn prepare(units: &[u16], match_case: bool) -> Vec<u16> {
    if match_case {
        units.to_vec()
    } else {
        units.iter().copied().map(fold_unit).collect()
    }
}

fn position_from(hay: &[u16], needle: &[u16], from: usize) -> Option<usize> {
    if from > hay.len() || needle.len() > hay.len() - from {
        return None;
    }
    hay[from..]
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|p| p + from)
}

/// Last match whose start lies strictly before `limit`.
fn position_before(hay: &[u16], needle: &[u16], limit: usize) -> Option<usize> {
    if needle.len() > hay.len() {
        return None;
    }
    let last_start = hay.len() - needle.len();
    (0..=last_start)
        .rev()
        .filter(|&p| p < limit)
        .find(|&p| &hay[p..p + needle.len()] == needle)
}

/// Finds `needle` relative to the current selection, wrapping around the
/// buffer once. Returns the new selection.
pub fn find(
    text: &[u16],
    needle: &[u16],
    selection: (usize, usize),
    direction: Direction,
    match_case: bool,
) -> Option<(usize, usize)> {
    if needle.is_empty() || needle.len() > text.len() {
        return None;
    }
    let hay = prepare(text, match_case);
    let pat = prepare(needle, match_case);
    let (sel_start, sel_end) = selection;

    let start = match direction {
        Direction::Forward => {
            position_from(&hay, &pat, sel_end).or_else(|| position_from(&hay, &pat, 0))
        }
        Direction::Backward => position_before(&hay, &pat, sel_start)
            .or_else(|| position_before(&hay, &pat, hay.len())),
    }?;
    Some((start, start + needle.len()))
}

/// True when the selection is exactly one occurrence of `needle`.
pub fn selection_matches(
    text: &[u16],
    selection: (usize, usize),
    needle: &[u16],
    match_case: bool,
) -> bool {
    let (start, end) = selection;
    if start >= end || end > text.len() || needle.is_empty() {
        return false;
    }
    prepare(&text[start..end], match_case) == prepare(needle, match_case)
}

/// Replaces every non-overlapping occurrence, scanning left to right.
pub fn replace_all(
    text: &[u16],
    needle: &[u16],
    replacement: &[u16],
    match_case: bool,
) -> (Vec<u16>, usize) {
    if needle.is_empty() {
        return (text.to_vec(), 0);
    }
    let hay = prepare(text, match_case);
    let pat = prepare(needle, match_case);

    let mut out = Vec::with_capacity(text.len());
    let mut last = 0;
    let mut count = 0;
    while let Some(found) = position_from(&hay, &pat, last) {
        out.extend_from_slice(&text[last..found]);
        out.extend_from_slice(replacement);
        last = found + needle.len();
        count += 1;
    }
    out.extend_from_slice(&text[last..]);
    (out, count)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn u(s: &str) -> Vec<u16> {
        s.encode_utf16().collect()
    }

    #[test]
    fn test_find_forward_from_selection_end() {
        let text = u("cat dog cat dog");
        assert_eq!(
            find(&text, &u("dog"), (0, 0), Direction::Forward, false),
            Some((4, 7))
        );
        assert_eq!(
            find(&text, &u("dog"), (4, 7), Direction::Forward, false),
            Some((12, 15))
        );
    }

    #[test]
    fn test_find_forward_wraps_to_start() {
        let text = u("dog cat");
        assert_eq!(
            find(&text, &u("dog"), (0, 3), Direction::Forward, false),
            Some((0, 3))
        );
    }

    #[test]
    fn test_find_backward_and_wrap() {
        let text = u("ab ab ab");
        assert_eq!(
            find(&text, &u("ab"), (6, 8), Direction::Backward, false),
            Some((3, 5))
        );
        assert_eq!(
            find(&text, &u("ab"), (0, 2), Direction::Backward, false),
            Some((6, 8))
        );
    }

    #[test]
    fn test_find_is_case_insensitive_by_default() {
        let text = u("Hello WORLD");
        assert_eq!(
            find(&text, &u("world"), (0, 0), Direction::Forward, false),
            Some((6, 11))
        );
        assert_eq!(
            find(&text, &u("world"), (0, 0), Direction::Forward, true),
            None
        );
    }

    #[test]
    fn test_find_empty_or_missing_needle() {
        let text = u("abc");
        assert_eq!(find(&text, &[], (0, 0), Direction::Forward, false), None);
        assert_eq!(find(&text, &u("zz"), (0, 0), Direction::Forward, false), None);
        assert_eq!(find(&text, &u("abcd"), (0, 0), Direction::Forward, false), None);
    }

    #[test]
    fn test_offsets_count_utf16_units() {
        // the emoji occupies two code units
        let text = u("😀 Straße");
        assert_eq!(
            find(&text, &u("STRASSE"), (0, 0), Direction::Forward, false),
            None
        );
        assert_eq!(
            find(&text, &u("straße"), (0, 0), Direction::Forward, false),
            Some((3, 9))
        );
    }

    #[test]
    fn test_selection_matches_ignores_case() {
        let text = u("Foo bar");
        assert!(selection_matches(&text, (0, 3), &u("foo"), false));
        assert!(!selection_matches(&text, (0, 3), &u("foo"), true));
        assert!(!selection_matches(&text, (0, 0), &u("foo"), false));
    }

    #[test]
    fn test_replace_all_counts_and_keeps_surroundings() {
        let (out, count) = replace_all(&u("One one ONE two"), &u("one"), &u("1"), false);
        assert_eq!(String::from_utf16(&out).unwrap(), "1 1 1 two");
        assert_eq!(count, 3);
    }

    #[test]
    fn test_replace_all_replacement_containing_needle_terminates() {
        let (out, count) = replace_all(&u("aa"), &u("a"), &u("aa"), false);
        assert_eq!(String::from_utf16(&out).unwrap(), "aaaa");
        assert_eq!(count, 2);
    }

    #[test]
    fn test_replace_all_without_match_is_identity() {
        let text = u("nothing here");
        let (out, count) = replace_all(&text, &u("xyz"), &u("1"), false);
        assert_eq!(out, text);
        assert_eq!(count, 0);
    }
}
