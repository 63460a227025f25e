use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const MAX_RECENT_FILES: usize = 10;

/// Most-recently-used file list, newest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecentFiles {
    paths: Vec<PathBuf>,
}

impl RecentFiles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves `path` to the front, dropping the oldest entry past the limit.
    pub fn add(&mut self, path: &Path) {
        self.paths.retain(|p| p != path);
        self.paths.insert(0, path.to_path_buf());
        self.paths.truncate(MAX_RECENT_FILES);
    }

    pub fn remove(&mut self, path: &Path) -> bool {
        let before = self.paths.len();
        self.paths.retain(|p| p != path);
        self.paths.len() != before
    }

    pub fn get(&self, index: usize) -> Option<&Path> {
        self.paths.get(index).map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Drops entries beyond the limit, e.g. after loading a hand-edited file.
    pub fn enforce_limit(&mut self) {
        self.paths.truncate(MAX_RECENT_FILES);
    }

    /// Menu captions: the bare file name of each entry.
    pub fn menu_labels(&self) -> Vec<String> {
        self.paths
            .iter()
            .map(|p| {
                p.file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| p.to_string_lossy().into_owned())
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_puts_newest_first() {
        let mut recent = RecentFiles::new();
        recent.add(Path::new("a.txt"));
        recent.add(Path::new("b.txt"));
        assert_eq!(recent.get(0), Some(Path::new("b.txt")));
        assert_eq!(recent.get(1), Some(Path::new("a.txt")));
    }

    #[test]
    fn test_readding_moves_to_front_without_duplicates() {
        let mut recent = RecentFiles::new();
        recent.add(Path::new("a.txt"));
        recent.add(Path::new("b.txt"));
        recent.add(Path::new("a.txt"));
        assert_eq!(recent.len(), 2);
        assert_eq!(recent.get(0), Some(Path::new("a.txt")));
    }

    #[test]
    fn test_list_is_capped_at_ten() {
        let mut recent = RecentFiles::new();
        for i in 0..15 {
            recent.add(&PathBuf::from(format!("file{i}.txt")));
        }
        assert_eq!(recent.len(), MAX_RECENT_FILES);
        assert_eq!(recent.get(0), Some(Path::new("file14.txt")));
        assert_eq!(recent.get(9), Some(Path::new("file5.txt")));
    }

    #[test]
    fn test_remove_failed_entry() {
        let mut recent = RecentFiles::new();
        recent.add(Path::new("gone.txt"));
        assert!(recent.remove(Path::new("gone.txt")));
        assert!(!recent.remove(Path::new("gone.txt")));
        assert!(recent.is_empty());
    }

    #[test]
    fn test_menu_labels_use_file_names() {
        let mut recent = RecentFiles::new();
        recent.add(&Path::new("docs").join("notes.txt"));
        assert_eq!(recent.menu_labels(), vec!["notes.txt".to_string()]);
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let mut recent = RecentFiles::new();
        recent.add(Path::new("a.txt"));
        let json = serde_json::to_string(&recent).unwrap();
        assert_eq!(json, r#"["a.txt"]"#);
        let back: RecentFiles = serde_json::from_str(&json).unwrap();
        assert_eq!(back, recent);
    }
}
