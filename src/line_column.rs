const CR: u16 = b'\r' as u16;
const LF: u16 = b'\n' as u16;

/// Calculate line and column number for a caret position
///
/// # Arguments
/// * `text` - Editor contents as UTF-16 code units
/// * `caret` - Caret position in UTF-16 code units
///
/// # Returns
/// Tuple of (line, column), both 1-indexed. CR, LF and CRLF each count as a
/// single line break; a surrogate pair counts as two columns, the same as the
/// caret offsets RichEdit reports.
pub fn calculate_line_column(text: &[u16], caret: usize) -> (usize, usize) {
    let end = caret.min(text.len());
    let mut line = 1;
    let mut col = 1;
    let mut i = 0;

    while i < end {
        match text[i] {
            CR => {
                // CRLF is one break; a caret between the two stays on this line
                if text.get(i + 1) == Some(&LF) {
                    if i + 1 >= end {
                        return (line + 1, 1);
                    }
                    i += 1;
                }
                line += 1;
                col = 1;
            }
            LF => {
                line += 1;
                col = 1;
            }
            _ => col += 1,
        }
        i += 1;
    }

    (line, col)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn u(s: &str) -> Vec<u16> {
        s.encode_utf16().collect()
    }

    #[test]
    fn test_first_line_first_column() {
        assert_eq!(calculate_line_column(&u("hello world"), 0), (1, 1));
    }

    #[test]
    fn test_first_line_middle() {
        assert_eq!(calculate_line_column(&u("hello world"), 5), (1, 6));
    }

    #[test]
    fn test_crlf_second_line() {
        let text = u("hello\r\nworld");
        assert_eq!(calculate_line_column(&text, 7), (2, 1));
        assert_eq!(calculate_line_column(&text, 9), (2, 3));
    }

    #[test]
    fn test_cr_only_paragraphs() {
        // RichEdit reports paragraphs with a bare CR
        let text = u("line1\rline2\rline3");
        assert_eq!(calculate_line_column(&text, 12), (3, 1));
        assert_eq!(calculate_line_column(&text, 14), (3, 3));
    }

    #[test]
    fn test_lf_only() {
        let text = u("a\nbc\n");
        assert_eq!(calculate_line_column(&text, 4), (2, 3));
        assert_eq!(calculate_line_column(&text, 5), (3, 1));
    }

    #[test]
    fn test_empty_line() {
        let text = u("line1\r\n\r\nline3");
        assert_eq!(calculate_line_column(&text, 7), (2, 1));
        assert_eq!(calculate_line_column(&text, 9), (3, 1));
    }

    #[test]
    fn test_japanese_text() {
        let text = u("あいう\r\nえお");
        assert_eq!(calculate_line_column(&text, 3), (1, 4));
        assert_eq!(calculate_line_column(&text, 6), (2, 2));
    }

    #[test]
    fn test_surrogate_pair_counts_two_units() {
        let text = u("😀x");
        assert_eq!(calculate_line_column(&text, 2), (1, 3));
        assert_eq!(calculate_line_column(&text, 3), (1, 4));
    }

    #[test]
    fn test_caret_past_end_is_clamped() {
        assert_eq!(calculate_line_column(&u("hello\r\nworld"), 100), (2, 6));
    }
}
