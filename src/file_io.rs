use crate::encoding::{self, LineEnding, TextEncoding};
use crate::error::Result;
use encoding_rs::Encoding;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq)]
pub struct LoadedFile {
    pub text: String,
    pub encoding: TextEncoding,
    pub line_ending: LineEnding,
}

/// Reads `path`, sniffing the encoding unless the caller forces one.
pub fn load_file(
    path: &Path,
    forced: Option<TextEncoding>,
    ansi: &'static Encoding,
) -> Result<LoadedFile> {
    let bytes = fs::read(path)?;
    let encoding = forced.unwrap_or_else(|| encoding::detect_encoding(&bytes));
    let text = encoding::decode(&bytes, encoding, ansi);
    let line_ending = encoding::detect_line_ending(&text);

    tracing::info!(
        path = %path.display(),
        bytes = bytes.len(),
        ?encoding,
        ?line_ending,
        "loaded file"
    );

    Ok(LoadedFile {
        text,
        encoding,
        line_ending,
    })
}

pub fn save_file(
    path: &Path,
    text: &str,
    encoding: TextEncoding,
    line_ending: LineEnding,
    ansi: &'static Encoding,
) -> Result<()> {
    let bytes = encoding::encode(text, encoding, line_ending, ansi);
    fs::write(path, &bytes)?;
    tracing::info!(
        path = %path.display(),
        bytes = bytes.len(),
        ?encoding,
        ?line_ending,
        "saved file"
    );
    Ok(())
}

/// Turns a command-line argument into a path, dropping surrounding quotes.
pub fn path_from_arg(arg: &str) -> Option<PathBuf> {
    let trimmed = arg.trim().trim_matches('"').trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(PathBuf::from(trimmed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use encoding_rs::WINDOWS_1252;

    #[test]
    fn test_load_detects_encoding_and_line_ending() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("unix.txt");
        fs::write(&path, b"\xEF\xBB\xBFone\ntwo\n").unwrap();

        let loaded = load_file(&path, None, WINDOWS_1252).unwrap();
        assert_eq!(loaded.text, "one\ntwo\n");
        assert_eq!(loaded.encoding, TextEncoding::Utf8Bom);
        assert_eq!(loaded.line_ending, LineEnding::Lf);
    }

    #[test]
    fn test_load_empty_file_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.txt");
        fs::write(&path, b"").unwrap();

        let loaded = load_file(&path, None, WINDOWS_1252).unwrap();
        assert_eq!(loaded.text, "");
        assert_eq!(loaded.encoding, TextEncoding::Utf8);
        assert_eq!(loaded.line_ending, LineEnding::Crlf);
    }

    #[test]
    fn test_load_bom_only_file_keeps_encoding() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bom.txt");
        fs::write(&path, b"\xEF\xBB\xBF").unwrap();

        let loaded = load_file(&path, None, WINDOWS_1252).unwrap();
        assert_eq!(loaded.text, "");
        assert_eq!(loaded.encoding, TextEncoding::Utf8Bom);
        assert_eq!(loaded.line_ending, LineEnding::Crlf);
    }

    #[test]
    fn test_forced_encoding_overrides_detection() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latin.txt");
        // valid UTF-8 ("Ã©"), but the user asked for ANSI
        fs::write(&path, b"\xC3\xA9").unwrap();

        let loaded = load_file(&path, Some(TextEncoding::Ansi), WINDOWS_1252).unwrap();
        assert_eq!(loaded.text, "Ã©");
        assert_eq!(loaded.encoding, TextEncoding::Ansi);
    }

    #[test]
    fn test_save_normalizes_to_document_line_ending() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");

        // RichEdit hands back CR-only paragraphs
        save_file(
            &path,
            "a\rb\rc",
            TextEncoding::Utf8,
            LineEnding::Crlf,
            WINDOWS_1252,
        )
        .unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"a\r\nb\r\nc");

        let loaded = load_file(&path, None, WINDOWS_1252).unwrap();
        assert_eq!(loaded.line_ending, LineEnding::Crlf);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_file(&dir.path().join("missing.txt"), None, WINDOWS_1252).unwrap_err();
        assert!(matches!(err, AppError::Io(_)));
    }

    #[test]
    fn test_path_from_arg_strips_quotes() {
        assert_eq!(
            path_from_arg("  \"C:\\notes\\todo list.txt\" "),
            Some(PathBuf::from("C:\\notes\\todo list.txt"))
        );
        assert_eq!(path_from_arg("plain.txt"), Some(PathBuf::from("plain.txt")));
        assert_eq!(path_from_arg("  "), None);
        assert_eq!(path_from_arg("\"\""), None);
    }
}
