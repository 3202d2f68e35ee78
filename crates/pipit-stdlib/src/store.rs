//! In-memory directory history

use parking_lot::Mutex;
use pipit_core::error::StoreError;
use pipit_core::external::{Dir, DirStore};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Score added to a directory on every visit.
pub const VISIT_SCORE: f64 = 10.0;

/// A [`DirStore`] that keeps scores in memory for the life of the process.
///
/// Every visit adds [`VISIT_SCORE`]. Listings are ordered by score, highest
/// first, with ties broken by path.
#[derive(Debug, Default)]
pub struct MemoryDirStore {
    scores: Mutex<HashMap<String, f64>>,
}

impl MemoryDirStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn sorted(&self, keep: impl Fn(&str) -> bool) -> Vec<Dir> {
        let mut dirs: Vec<Dir> = self
            .scores
            .lock()
            .iter()
            .filter(|(path, _)| keep(path))
            .map(|(path, score)| Dir {
                path: path.clone(),
                score: *score,
            })
            .collect();
        dirs.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.path.cmp(&b.path))
        });
        dirs
    }
}

impl DirStore for MemoryDirStore {
    fn add_dir(&self, path: &str) -> Result<(), StoreError> {
        *self.scores.lock().entry(path.to_string()).or_insert(0.0) += VISIT_SCORE;
        Ok(())
    }

    fn list_dirs(&self) -> Result<Vec<Dir>, StoreError> {
        Ok(self.sorted(|_| true))
    }

    fn find_dirs(&self, fragment: &str) -> Result<Vec<Dir>, StoreError> {
        Ok(self.sorted(|path| path.contains(fragment)))
    }
}
