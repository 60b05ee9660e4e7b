//! Movie ID cache
//!
//! Remembers which TMDB ids have already been ingested so repeated imports can
//! skip them. Persisted as a plain JSON array of ids.
//!
//! Cache problems are never fatal: a corrupt file loads as an empty cache and
//! a failed save is logged.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{error, info};

use crate::Result;

#[derive(Debug, Clone)]
pub struct MovieIdCache {
    path: PathBuf,
    ids: BTreeSet<i64>,
}

impl MovieIdCache {
    /// Load the cache from `path`; missing or unreadable files give an empty cache
    pub fn load(path: &Path) -> Self {
        let ids = if path.exists() {
            match Self::read_ids(path) {
                Ok(ids) => {
                    info!("Loaded {} movie IDs from cache", ids.len());
                    ids
                }
                Err(e) => {
                    error!("Error loading movie IDs cache {}: {}", path.display(), e);
                    BTreeSet::new()
                }
            }
        } else {
            BTreeSet::new()
        };

        Self {
            path: path.to_path_buf(),
            ids,
        }
    }

    fn read_ids(path: &Path) -> Result<BTreeSet<i64>> {
        let content = std::fs::read_to_string(path)?;
        let ids: Vec<i64> = serde_json::from_str(&content)?;
        Ok(ids.into_iter().collect())
    }

    /// Save the cache; failures are logged and reported as `false`
    pub fn save(&self) -> bool {
        match self.write_ids() {
            Ok(()) => {
                info!("Saved {} movie IDs to cache", self.ids.len());
                true
            }
            Err(e) => {
                error!("Error saving movie IDs cache {}: {}", self.path.display(), e);
                false
            }
        }
    }

    fn write_ids(&self) -> Result<()> {
        let ids: Vec<i64> = self.ids.iter().copied().collect();
        let content = serde_json::to_string(&ids)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    pub fn extend<I: IntoIterator<Item = i64>>(&mut self, ids: I) {
        self.ids.extend(ids);
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let cache = MovieIdCache::load(&temp_dir.path().join("ids.json"));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_save_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ids.json");

        let mut cache = MovieIdCache::load(&path);
        cache.extend([550, 13, 680, 550]);
        assert_eq!(cache.len(), 3);
        assert!(cache.save());

        let stored: Vec<i64> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(stored, vec![13, 550, 680]);

        let reloaded = MovieIdCache::load(&path);
        assert_eq!(reloaded.len(), 3);
    }

    #[test]
    fn test_corrupt_file_falls_back_to_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ids.json");
        std::fs::write(&path, "{not json").unwrap();

        let cache = MovieIdCache::load(&path);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_save_into_missing_directory_reports_failure() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing").join("ids.json");

        let mut cache = MovieIdCache::load(&path);
        cache.extend([1]);
        assert!(!cache.save());
    }
}
