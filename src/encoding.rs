use encoding_rs::{
    BIG5, EUC_KR, EncoderResult, Encoding, GBK, SHIFT_JIS, UTF_8, UTF_16BE, UTF_16LE,
    WINDOWS_874, WINDOWS_1250, WINDOWS_1251, WINDOWS_1252, WINDOWS_1253, WINDOWS_1254,
    WINDOWS_1255, WINDOWS_1256, WINDOWS_1257, WINDOWS_1258,
};
use serde::{Deserialize, Serialize};

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];
const UTF16LE_BOM: [u8; 2] = [0xFF, 0xFE];
const UTF16BE_BOM: [u8; 2] = [0xFE, 0xFF];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextEncoding {
    #[default]
    Utf8,
    Utf8Bom,
    Utf16Le,
    Utf16Be,
    Ansi,
}

impl TextEncoding {
    pub const ALL: [TextEncoding; 5] = [
        TextEncoding::Utf8,
        TextEncoding::Utf8Bom,
        TextEncoding::Utf16Le,
        TextEncoding::Utf16Be,
        TextEncoding::Ansi,
    ];

    /// i18n key of the display name
    pub fn label_key(self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "ENCODING_UTF8",
            TextEncoding::Utf8Bom => "ENCODING_UTF8_BOM",
            TextEncoding::Utf16Le => "ENCODING_UTF16LE",
            TextEncoding::Utf16Be => "ENCODING_UTF16BE",
            TextEncoding::Ansi => "ENCODING_ANSI",
        }
    }

    pub fn bom(self) -> &'static [u8] {
        match self {
            TextEncoding::Utf8Bom => &UTF8_BOM,
            TextEncoding::Utf16Le => &UTF16LE_BOM,
            TextEncoding::Utf16Be => &UTF16BE_BOM,
            TextEncoding::Utf8 | TextEncoding::Ansi => &[],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LineEnding {
    #[default]
    Crlf,
    Lf,
    Cr,
}

impl LineEnding {
    pub const ALL: [LineEnding; 3] = [LineEnding::Crlf, LineEnding::Lf, LineEnding::Cr];

    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Crlf => "\r\n",
            LineEnding::Lf => "\n",
            LineEnding::Cr => "\r",
        }
    }

    pub fn label_key(self) -> &'static str {
        match self {
            LineEnding::Crlf => "LINE_ENDING_CRLF",
            LineEnding::Lf => "LINE_ENDING_LF",
            LineEnding::Cr => "LINE_ENDING_CR",
        }
    }
}

pub fn detect_encoding(bytes: &[u8]) -> TextEncoding {
    if bytes.starts_with(&UTF8_BOM) {
        TextEncoding::Utf8Bom
    } else if bytes.starts_with(&UTF16LE_BOM) {
        TextEncoding::Utf16Le
    } else if bytes.starts_with(&UTF16BE_BOM) {
        TextEncoding::Utf16Be
    } else if std::str::from_utf8(bytes).is_ok() {
        TextEncoding::Utf8
    } else {
        TextEncoding::Ansi
    }
}

/// Sniffs both the encoding and the line ending of raw file contents.
pub fn detect(bytes: &[u8]) -> (TextEncoding, LineEnding) {
    let encoding = detect_encoding(bytes);
    // CR and LF are single bytes in every supported ANSI code page
    let text = decode(bytes, encoding, WINDOWS_1252);
    (encoding, detect_line_ending(&text))
}

/// The style of the first line break wins; text without breaks is CRLF.
pub fn detect_line_ending(text: &str) -> LineEnding {
    let bytes = text.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        match b {
            b'\r' if bytes.get(i + 1) == Some(&b'\n') => return LineEnding::Crlf,
            b'\r' => return LineEnding::Cr,
            b'\n' => return LineEnding::Lf,
            _ => {}
        }
    }
    LineEnding::Crlf
}

pub fn decode(bytes: &[u8], encoding: TextEncoding, ansi: &'static Encoding) -> String {
    let text = match encoding {
        TextEncoding::Utf8 | TextEncoding::Utf8Bom => {
            let payload = bytes.strip_prefix(&UTF8_BOM).unwrap_or(bytes);
            UTF_8.decode_without_bom_handling(payload).0.into_owned()
        }
        TextEncoding::Utf16Le => {
            let payload = bytes.strip_prefix(&UTF16LE_BOM).unwrap_or(bytes);
            UTF_16LE
                .decode_without_bom_handling(even_prefix(payload))
                .0
                .into_owned()
        }
        TextEncoding::Utf16Be => {
            let payload = bytes.strip_prefix(&UTF16BE_BOM).unwrap_or(bytes);
            UTF_16BE
                .decode_without_bom_handling(even_prefix(payload))
                .0
                .into_owned()
        }
        TextEncoding::Ansi => ansi.decode_without_bom_handling(bytes).0.into_owned(),
    };
    // RichEdit truncates at the first NUL
    text.replace('\0', " ")
}

// A dangling byte cannot form a UTF-16 code unit.
fn even_prefix(bytes: &[u8]) -> &[u8] {
    &bytes[..bytes.len() & !1]
}

/// Rewrites every CRLF, lone CR and lone LF as `ending`.
pub fn normalize_line_endings(text: &str, ending: LineEnding) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 16);
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push_str(ending.as_str());
            }
            '\n' => out.push_str(ending.as_str()),
            _ => out.push(ch),
        }
    }
    out
}

pub fn encode(
    text: &str,
    encoding: TextEncoding,
    ending: LineEnding,
    ansi: &'static Encoding,
) -> Vec<u8> {
    let text = normalize_line_endings(text, ending);
    let mut out = Vec::with_capacity(text.len() + 3);
    out.extend_from_slice(encoding.bom());
    match encoding {
        TextEncoding::Utf8 | TextEncoding::Utf8Bom => out.extend_from_slice(text.as_bytes()),
        TextEncoding::Utf16Le => {
            for unit in text.encode_utf16() {
                out.extend_from_slice(&unit.to_le_bytes());
            }
        }
        TextEncoding::Utf16Be => {
            for unit in text.encode_utf16() {
                out.extend_from_slice(&unit.to_be_bytes());
            }
        }
        TextEncoding::Ansi => encode_ansi(&text, ansi, &mut out),
    }
    out
}

// Unmappable characters become '?', the same best-fit fallback the
// system converter uses.
fn encode_ansi(text: &str, ansi: &'static Encoding, out: &mut Vec<u8>) {
    let mut encoder = ansi.new_encoder();
    let mut buf = [0u8; 1024];
    let mut input = text;
    loop {
        let (result, read, written) =
            encoder.encode_from_utf8_without_replacement(input, &mut buf, true);
        out.extend_from_slice(&buf[..written]);
        input = &input[read..];
        match result {
            EncoderResult::InputEmpty => break,
            EncoderResult::OutputFull => {}
            EncoderResult::Unmappable(_) => out.push(b'?'),
        }
    }
}

/// Maps a Windows ANSI code page to the matching codec.
pub fn ansi_for_codepage(codepage: u32) -> &'static Encoding {
    match codepage {
        874 => WINDOWS_874,
        932 => SHIFT_JIS,
        936 => GBK,
        949 => EUC_KR,
        950 => BIG5,
        1250 => WINDOWS_1250,
        1251 => WINDOWS_1251,
        1253 => WINDOWS_1253,
        1254 => WINDOWS_1254,
        1255 => WINDOWS_1255,
        1256 => WINDOWS_1256,
        1257 => WINDOWS_1257,
        1258 => WINDOWS_1258,
        _ => WINDOWS_1252,
    }
}

/// The codec for the process ANSI code page.
#[cfg(windows)]
pub fn system_ansi() -> &'static Encoding {
    let codepage = unsafe { windows_sys::Win32::Globalization::GetACP() };
    ansi_for_codepage(codepage)
}

#[cfg(not(windows))]
pub fn system_ansi() -> &'static Encoding {
    WINDOWS_1252
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_boms() {
        assert_eq!(detect_encoding(b"\xEF\xBB\xBFabc"), TextEncoding::Utf8Bom);
        assert_eq!(detect_encoding(b"\xFF\xFEa\x00"), TextEncoding::Utf16Le);
        assert_eq!(detect_encoding(b"\xFE\xFF\x00a"), TextEncoding::Utf16Be);
    }

    #[test]
    fn test_detect_plain_utf8_and_ansi() {
        assert_eq!(detect_encoding("héllo".as_bytes()), TextEncoding::Utf8);
        assert_eq!(detect_encoding(b""), TextEncoding::Utf8);
        // 0xE9 alone is 'é' in windows-1252 but not valid UTF-8
        assert_eq!(detect_encoding(b"caf\xE9"), TextEncoding::Ansi);
    }

    #[test]
    fn test_detect_line_ending_uses_first_break() {
        assert_eq!(detect_line_ending("a\r\nb\nc"), LineEnding::Crlf);
        assert_eq!(detect_line_ending("a\nb\r\nc"), LineEnding::Lf);
        assert_eq!(detect_line_ending("a\rb"), LineEnding::Cr);
        assert_eq!(detect_line_ending("no breaks"), LineEnding::Crlf);
    }

    #[test]
    fn test_detect_reads_line_ending_through_utf16() {
        assert_eq!(
            detect(b"\xFF\xFEa\x00\r\x00\n\x00"),
            (TextEncoding::Utf16Le, LineEnding::Crlf)
        );
        assert_eq!(
            detect(b"\xFE\xFF\x00a\x00\n"),
            (TextEncoding::Utf16Be, LineEnding::Lf)
        );
        assert_eq!(detect(b""), (TextEncoding::Utf8, LineEnding::Crlf));
    }

    #[test]
    fn test_decode_strips_bom_and_replaces_nul() {
        let text = decode(b"\xEF\xBB\xBFa\0b", TextEncoding::Utf8Bom, WINDOWS_1252);
        assert_eq!(text, "a b");
    }

    #[test]
    fn test_decode_bom_only_is_empty() {
        assert_eq!(decode(b"\xFF\xFE", TextEncoding::Utf16Le, WINDOWS_1252), "");
    }

    #[test]
    fn test_decode_utf16_ignores_odd_trailing_byte() {
        let text = decode(b"\xFF\xFEh\x00i\x00!", TextEncoding::Utf16Le, WINDOWS_1252);
        assert_eq!(text, "hi");
        let text = decode(b"\xFE\xFF\x00h\x00i", TextEncoding::Utf16Be, WINDOWS_1252);
        assert_eq!(text, "hi");
    }

    #[test]
    fn test_decode_ansi_uses_codepage() {
        assert_eq!(decode(b"caf\xE9", TextEncoding::Ansi, WINDOWS_1252), "café");
        let sjis = decode(b"\x82\xA0", TextEncoding::Ansi, ansi_for_codepage(932));
        assert_eq!(sjis, "あ");
    }

    #[test]
    fn test_normalize_mixed_line_endings() {
        assert_eq!(
            normalize_line_endings("a\r\nb\nc\rd", LineEnding::Lf),
            "a\nb\nc\nd"
        );
        assert_eq!(
            normalize_line_endings("a\rb\n", LineEnding::Crlf),
            "a\r\nb\r\n"
        );
    }

    #[test]
    fn test_encode_writes_bom_and_payload() {
        let bytes = encode("hi\n", TextEncoding::Utf16Le, LineEnding::Crlf, WINDOWS_1252);
        assert_eq!(bytes, b"\xFF\xFEh\x00i\x00\r\x00\n\x00");

        let bytes = encode("hi", TextEncoding::Utf16Be, LineEnding::Crlf, WINDOWS_1252);
        assert_eq!(bytes, b"\xFE\xFF\x00h\x00i");

        let bytes = encode("x\r\ny", TextEncoding::Utf8Bom, LineEnding::Cr, WINDOWS_1252);
        assert_eq!(bytes, b"\xEF\xBB\xBFx\ry");
    }

    #[test]
    fn test_encode_ansi_replaces_unmappable() {
        let bytes = encode("café あ", TextEncoding::Ansi, LineEnding::Crlf, WINDOWS_1252);
        assert_eq!(bytes, b"caf\xE9 ?");
    }

    #[test]
    fn test_utf16_surrogate_pair_survives_save_and_load() {
        let original = "emoji 😀 line\r\nnext";
        let bytes = encode(original, TextEncoding::Utf16Le, LineEnding::Crlf, WINDOWS_1252);
        assert_eq!(detect_encoding(&bytes), TextEncoding::Utf16Le);
        assert_eq!(decode(&bytes, TextEncoding::Utf16Le, WINDOWS_1252), original);
    }

    #[test]
    fn test_ansi_for_codepage_fallback() {
        assert_eq!(ansi_for_codepage(932), SHIFT_JIS);
        assert_eq!(ansi_for_codepage(1251), WINDOWS_1251);
        assert_eq!(ansi_for_codepage(65001), WINDOWS_1252);
    }
}
