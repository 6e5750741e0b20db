//! In-memory load cache keyed by canonical path and modification time.
//!
//! The cache is an ordinary value owned by the host (CLI run or TUI
//! session); there is no process-wide state. A lookup whose file has a
//! different mtime than the cached entry reloads and replaces it.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use tracing::{debug, info};

use super::loader::{load_workbook, LoadedWorkbook};
use super::LoadError;

struct CacheEntry {
    modified: SystemTime,
    workbook: Arc<LoadedWorkbook>,
}

/// Parsed workbooks by file identity.
#[derive(Default)]
pub struct WorkbookCache {
    entries: HashMap<PathBuf, CacheEntry>,
    hits: u64,
    misses: u64,
}

impl WorkbookCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached workbook for `path`, loading it on a miss or when
    /// the file changed on disk since it was cached.
    pub fn get_or_load(&mut self, path: &Path) -> Result<Arc<LoadedWorkbook>, LoadError> {
        let (canonical, modified) = identity(path)?;

        if let Some(entry) = self.entries.get(&canonical) {
            if entry.modified == modified {
                self.hits += 1;
                debug!(path = %canonical.display(), "workbook cache hit");
                return Ok(Arc::clone(&entry.workbook));
            }
            info!(path = %canonical.display(), "workbook changed on disk, reloading");
        }

        self.misses += 1;
        let workbook = Arc::new(load_workbook(&canonical)?);
        self.entries.insert(
            canonical,
            CacheEntry {
                modified,
                workbook: Arc::clone(&workbook),
            },
        );
        Ok(workbook)
    }

    /// Whether a current (same mtime) entry exists for `path`.
    pub fn is_fresh(&self, path: &Path) -> bool {
        match identity(path) {
            Ok((canonical, modified)) => self
                .entries
                .get(&canonical)
                .is_some_and(|e| e.modified == modified),
            Err(_) => false,
        }
    }

    /// Drop the entry for `path`. Returns whether one existed.
    pub fn invalidate(&mut self, path: &Path) -> bool {
        let key = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        self.entries.remove(&key).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}

fn identity(path: &Path) -> Result<(PathBuf, SystemTime), LoadError> {
    let canonical = path
        .canonicalize()
        .map_err(|_| LoadError::NotFound(path.to_path_buf()))?;
    let modified = std::fs::metadata(&canonical)
        .and_then(|m| m.modified())
        .map_err(|source| LoadError::Io {
            path: canonical.clone(),
            source,
        })?;
    Ok((canonical, modified))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_not_cached() {
        let mut cache = WorkbookCache::new();
        let err = cache
            .get_or_load(Path::new("/no/such/workbook.xlsx"))
            .err()
            .unwrap();
        assert!(matches!(err, LoadError::NotFound(_)));
        assert!(cache.is_empty());
        assert_eq!(cache.misses(), 0);
    }

    #[test]
    fn invalidate_unknown_path_is_false() {
        let mut cache = WorkbookCache::new();
        assert!(!cache.invalidate(Path::new("/no/such/workbook.xlsx")));
        assert!(!cache.is_fresh(Path::new("/no/such/workbook.xlsx")));
    }
}
