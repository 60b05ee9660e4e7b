//! Source file scanner
//!
//! Recursive discovery of TMDB movie-detail JSON documents. Results are
//! sorted so imports process files in a stable order.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

/// Scanner errors
#[derive(Debug, Error)]
pub enum ScanError {
    /// Specified path does not exist
    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    /// Path exists but is not a directory
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),
}

/// Movie document scanner
pub struct FileScanner {
    ignore_patterns: Vec<String>,
    max_depth: Option<usize>,
}

impl FileScanner {
    /// Create new file scanner with default ignore patterns
    ///
    /// Ignores system files like .DS_Store, Thumbs.db, .git, etc.
    pub fn new() -> Self {
        Self {
            ignore_patterns: vec![
                ".DS_Store".to_string(),
                "Thumbs.db".to_string(),
                ".git".to_string(),
                ".svn".to_string(),
                "node_modules".to_string(),
            ],
            max_depth: None,
        }
    }

    /// Limit recursion depth (1 = only the root directory's entries)
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// Scan directory for `*.json` documents
    pub fn scan(&self, root_path: &Path) -> Result<Vec<PathBuf>, ScanError> {
        if !root_path.exists() {
            return Err(ScanError::PathNotFound(root_path.to_path_buf()));
        }

        if !root_path.is_dir() {
            return Err(ScanError::NotADirectory(root_path.to_path_buf()));
        }

        let mut files = Vec::new();
        let mut symlink_visited = HashSet::new();

        let walker = WalkDir::new(root_path)
            .follow_links(false)
            .max_depth(self.max_depth.unwrap_or(usize::MAX))
            .into_iter()
            .filter_entry(|e| self.should_process_entry(e, &mut symlink_visited));

        for entry in walker {
            match entry {
                Ok(entry) => {
                    if entry.file_type().is_file() && is_json_file(entry.path()) {
                        files.push(entry.path().to_path_buf());
                    }
                }
                Err(e) => {
                    // Keep scanning past unreadable entries
                    tracing::warn!("Error accessing entry: {}", e);
                }
            }
        }

        files.sort();
        tracing::debug!(
            "Scan complete: {} movie documents under {}",
            files.len(),
            root_path.display()
        );
        Ok(files)
    }

    /// Check if entry should be processed
    fn should_process_entry(
        &self,
        entry: &DirEntry,
        symlink_visited: &mut HashSet<PathBuf>,
    ) -> bool {
        // The source root is always walked, whatever its name
        if entry.depth() == 0 {
            return true;
        }

        let path = entry.path();
        let file_name = entry.file_name().to_string_lossy();

        if self.ignore_patterns.iter().any(|pattern| file_name == pattern.as_str()) {
            return false;
        }

        if entry.file_type().is_symlink() {
            if let Ok(canonical) = path.canonicalize() {
                if !symlink_visited.insert(canonical) {
                    tracing::warn!("Symlink loop detected: {}", path.display());
                    return false;
                }
            }
        }

        true
    }
}

impl Default for FileScanner {
    fn default() -> Self {
        Self::new()
    }
}

fn is_json_file(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_json_extension_detection() {
        assert!(is_json_file(Path::new("550.json")));
        assert!(is_json_file(Path::new("dir/13.JSON")));
        assert!(!is_json_file(Path::new("notes.txt")));
        assert!(!is_json_file(Path::new("json")));
    }

    #[test]
    fn test_scan_nonexistent_path() {
        let scanner = FileScanner::new();
        match scanner.scan(Path::new("/nonexistent/path")) {
            Err(ScanError::PathNotFound(_)) => {}
            other => panic!("Expected PathNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_scan_file_as_directory() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("550.json");
        fs::write(&file, "{}").unwrap();

        match FileScanner::new().scan(&file) {
            Err(ScanError::NotADirectory(_)) => {}
            other => panic!("Expected NotADirectory error, got {:?}", other),
        }
    }

    #[test]
    fn test_scan_finds_nested_json_sorted() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("1999")).unwrap();
        fs::create_dir_all(root.join(".git")).unwrap();
        fs::write(root.join("1999").join("550.json"), "{}").unwrap();
        fs::write(root.join("13.json"), "{}").unwrap();
        fs::write(root.join("readme.txt"), "ignore me").unwrap();
        fs::write(root.join(".git").join("config.json"), "{}").unwrap();

        let files = FileScanner::new().scan(root).unwrap();
        assert_eq!(files, vec![root.join("13.json"), root.join("1999").join("550.json")]);
    }

    #[test]
    fn test_root_named_like_ignored_entry_is_scanned() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("tmdb.github-mirror");
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join("550.json"), "{}").unwrap();

        let files = FileScanner::new().scan(&root).unwrap();
        assert_eq!(files, vec![root.join("550.json")]);

        let git_root = temp_dir.path().join(".git");
        fs::create_dir_all(&git_root).unwrap();
        fs::write(git_root.join("13.json"), "{}").unwrap();
        assert_eq!(FileScanner::new().scan(&git_root).unwrap().len(), 1);
    }

    #[test]
    fn test_ignore_patterns_match_whole_names() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("node_modules")).unwrap();
        fs::create_dir_all(root.join("node_modules_backup")).unwrap();
        fs::write(root.join("node_modules").join("1.json"), "{}").unwrap();
        fs::write(root.join("node_modules_backup").join("2.json"), "{}").unwrap();
        fs::write(root.join("x.github.json"), "{}").unwrap();

        let files = FileScanner::new().scan(root).unwrap();
        assert_eq!(
            files,
            vec![
                root.join("node_modules_backup").join("2.json"),
                root.join("x.github.json"),
            ]
        );
    }

    #[test]
    fn test_max_depth_limits_recursion() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("nested")).unwrap();
        fs::write(root.join("1.json"), "{}").unwrap();
        fs::write(root.join("nested").join("2.json"), "{}").unwrap();

        let files = FileScanner::new().with_max_depth(1).scan(root).unwrap();
        assert_eq!(files, vec![root.join("1.json")]);
    }

    #[test]
    fn test_scan_empty_directory() {
        let temp_dir = TempDir::new().unwrap();
        let result = FileScanner::new().scan(temp_dir.path()).unwrap();
        assert!(result.is_empty());
    }
}
