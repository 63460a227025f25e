const CR: u16 = b'\r' as u16;
const LF: u16 = b'\n' as u16;

fn is_space(unit: u16) -> bool {
    char::from_u32(u32::from(unit)).is_some_and(char::is_whitespace)
}

/// NUL-terminated UTF-16 for passing strings to Win32.
pub fn to_wide(text: &str) -> Vec<u16> {
    text.encode_utf16().chain(Some(0)).collect()
}

/// Offset of the first character of 1-based `line`.
///
/// CR, LF and CRLF each end one line. Lines past the end map to the end of
/// the text so Go To never fails on a large number.
pub fn line_start_offset(text: &[u16], line: usize) -> usize {
    if line <= 1 {
        return 0;
    }
    let mut current = 1;
    let mut i = 0;
    while i < text.len() {
        let unit = text[i];
        i += 1;
        if unit == CR && text.get(i) == Some(&LF) {
            i += 1;
        }
        if unit == CR || unit == LF {
            current += 1;
            if current == line {
                return i;
            }
        }
    }
    text.len()
}

/// Start of the word before `pos` (Ctrl+Backspace).
pub fn word_start_before(text: &[u16], pos: usize) -> usize {
    let mut i = pos.min(text.len());
    while i > 0 && is_space(text[i - 1]) {
        i -= 1;
    }
    while i > 0 && !is_space(text[i - 1]) {
        i -= 1;
    }
    i
}

/// End of the word at `pos`, including trailing whitespace (Ctrl+Delete).
pub fn word_end_after(text: &[u16], pos: usize) -> usize {
    let mut i = pos.min(text.len());
    while i < text.len() && !is_space(text[i]) {
        i += 1;
    }
    while i < text.len() && is_space(text[i]) {
        i += 1;
    }
    i
}

/// Formats a timestamp the way the Time/Date command inserts it,
/// e.g. `"03:07 PM 10/17/2026"`.
pub fn format_time_date(hour: u32, minute: u32, month: u32, day: u32, year: u32) -> String {
    let meridiem = if hour >= 12 { "PM" } else { "AM" };
    let hour12 = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{hour12:02}:{minute:02} {meridiem} {month:02}/{day:02}/{year:04}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn u(s: &str) -> Vec<u16> {
        s.encode_utf16().collect()
    }

    #[test]
    fn test_to_wide_is_nul_terminated() {
        assert_eq!(to_wide("ab"), vec![0x61, 0x62, 0]);
        assert_eq!(to_wide(""), vec![0]);
    }

    #[test]
    fn test_line_start_offset_mixed_breaks() {
        let text = u("one\r\ntwo\nthree\rfour");
        assert_eq!(line_start_offset(&text, 1), 0);
        assert_eq!(line_start_offset(&text, 2), 5);
        assert_eq!(line_start_offset(&text, 3), 9);
        assert_eq!(line_start_offset(&text, 4), 15);
    }

    #[test]
    fn test_line_start_offset_past_end() {
        let text = u("a\rb");
        assert_eq!(line_start_offset(&text, 99), 3);
        assert_eq!(line_start_offset(&[], 5), 0);
    }

    #[test]
    fn test_line_start_offset_trailing_break() {
        let text = u("a\r");
        assert_eq!(line_start_offset(&text, 2), 2);
    }

    #[test]
    fn test_word_start_before_skips_spaces_then_word() {
        let text = u("hello big  world");
        assert_eq!(word_start_before(&text, 16), 11);
        assert_eq!(word_start_before(&text, 11), 6);
        assert_eq!(word_start_before(&text, 3), 0);
        assert_eq!(word_start_before(&text, 0), 0);
    }

    #[test]
    fn test_word_end_after_takes_word_and_spaces() {
        let text = u("hello big  world");
        assert_eq!(word_end_after(&text, 0), 6);
        assert_eq!(word_end_after(&text, 6), 11);
        assert_eq!(word_end_after(&text, 11), 16);
        assert_eq!(word_end_after(&text, 16), 16);
    }

    #[test]
    fn test_word_ops_treat_line_breaks_as_space() {
        let text = u("foo\rbar");
        assert_eq!(word_start_before(&text, 4), 0);
        assert_eq!(word_end_after(&text, 0), 4);
    }

    #[test]
    fn test_format_time_date_twelve_hour_clock() {
        assert_eq!(format_time_date(0, 5, 1, 2, 2026), "12:05 AM 01/02/2026");
        assert_eq!(format_time_date(12, 0, 12, 31, 1999), "12:00 PM 12/31/1999");
        assert_eq!(format_time_date(15, 7, 10, 17, 2026), "03:07 PM 10/17/2026");
        assert_eq!(format_time_date(9, 30, 6, 9, 2026), "09:30 AM 06/09/2026");
    }
}
