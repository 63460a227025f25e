use crate::encoding::{LineEnding, TextEncoding};
use std::path::{Path, PathBuf};

/// The single open document. `path == None` means Untitled.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub path: Option<PathBuf>,
    pub encoding: TextEncoding,
    pub line_ending: LineEnding,
    pub modified: bool,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn loaded(&mut self, path: PathBuf, encoding: TextEncoding, line_ending: LineEnding) {
        self.path = Some(path);
        self.encoding = encoding;
        self.line_ending = line_ending;
        self.modified = false;
    }

    pub fn mark_saved(&mut self, path: PathBuf) {
        self.path = Some(path);
        self.modified = false;
    }

    pub fn mark_modified(&mut self) {
        self.modified = true;
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn display_name(&self, untitled: &str) -> String {
        self.path
            .as_deref()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| untitled.to_string())
    }

    /// "*name - App" while modified, "name - App" otherwise.
    pub fn window_title(&self, untitled: &str, app_name: &str) -> String {
        let marker = if self.modified { "*" } else { "" };
        format!("{}{} - {}", marker, self.display_name(untitled), app_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_document_is_untitled_utf8_crlf() {
        let doc = Document::new();
        assert_eq!(doc.path, None);
        assert_eq!(doc.encoding, TextEncoding::Utf8);
        assert_eq!(doc.line_ending, LineEnding::Crlf);
        assert!(!doc.modified);
        assert_eq!(doc.window_title("Untitled", "Notepad"), "Untitled - Notepad");
    }

    #[test]
    fn test_title_marks_modified_document() {
        let mut doc = Document::new();
        doc.loaded(
            PathBuf::from("C:/notes/todo.txt"),
            TextEncoding::Utf16Le,
            LineEnding::Lf,
        );
        assert_eq!(doc.window_title("Untitled", "Notepad"), "todo.txt - Notepad");

        doc.mark_modified();
        assert_eq!(doc.window_title("Untitled", "Notepad"), "*todo.txt - Notepad");
    }

    #[test]
    fn test_save_as_moves_path_and_clears_modified() {
        let mut doc = Document::new();
        doc.mark_modified();
        doc.mark_saved(PathBuf::from("draft.txt"));
        assert_eq!(doc.path(), Some(Path::new("draft.txt")));
        assert!(!doc.modified);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut doc = Document::new();
        doc.loaded(PathBuf::from("a.txt"), TextEncoding::Ansi, LineEnding::Cr);
        doc.mark_modified();
        doc.reset();
        assert_eq!(doc, Document::default());
        assert_eq!(doc.display_name("無題"), "無題");
    }
}
