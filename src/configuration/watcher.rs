/*!
# Configuration Change Tracking

Polling watcher over the `Configuration.xml` files of a workspace.
Each poll fingerprints the manifests (path, modification time, size)
and reports what changed since the previous poll, so the host can
rebuild the forest.
*/

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::fs;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::core::errors::Result;

use super::discovery::CONFIGURATION_FILE;
use super::workspace::{FileQuery, Workspace};

/// Kind of manifest change, ordered by how much work it implies
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ManifestChange {
    Changed,
    Created,
    Deleted,
}

/// Tracks `Configuration.xml` files between polls
#[derive(Debug, Clone)]
pub struct ConfigurationWatcher {
    /// Fingerprints of the manifests seen by the last scan
    fingerprints: HashMap<PathBuf, u64>,
    last_scan: SystemTime,
    limit: usize,
}

impl ConfigurationWatcher {
    /// Creates a watcher and takes the initial snapshot
    pub fn new<W: Workspace + ?Sized>(workspace: &W, limit: usize) -> Result<Self> {
        let mut watcher = Self {
            fingerprints: HashMap::new(),
            last_scan: SystemTime::now(),
            limit,
        };
        watcher.fingerprints = watcher.scan(workspace)?;
        Ok(watcher)
    }

    /// Number of manifests currently tracked
    pub fn tracked_files(&self) -> usize {
        self.fingerprints.len()
    }

    pub fn last_scan(&self) -> SystemTime {
        self.last_scan
    }

    /// Rescans and reports the most significant change, if any.
    ///
    /// Deletion outranks creation, which outranks modification: the
    /// first two require a fresh scan, the last only a refresh.
    pub fn poll<W: Workspace + ?Sized>(&mut self, workspace: &W) -> Result<Option<ManifestChange>> {
        let current = self.scan(workspace)?;
        let mut change: Option<ManifestChange> = None;

        for (path, fingerprint) in &current {
            let observed = match self.fingerprints.get(path) {
                None => Some(ManifestChange::Created),
                Some(previous) if previous != fingerprint => Some(ManifestChange::Changed),
                Some(_) => None,
            };
            change = change.max(observed);
        }

        if self.fingerprints.keys().any(|path| !current.contains_key(path)) {
            change = Some(ManifestChange::Deleted);
        }

        if let Some(change) = change {
            tracing::debug!("Configuration manifests changed: {:?}", change);
        }

        self.fingerprints = current;
        Ok(change)
    }

    fn scan<W: Workspace + ?Sized>(&mut self, workspace: &W) -> Result<HashMap<PathBuf, u64>> {
        let manifests = workspace.find_files(&FileQuery::named(CONFIGURATION_FILE), self.limit)?;

        let mut fingerprints = HashMap::new();
        for path in manifests {
            // файл мог исчезнуть между поиском и чтением метаданных
            if let Some(fingerprint) = fingerprint(&path) {
                fingerprints.insert(path, fingerprint);
            }
        }

        self.last_scan = SystemTime::now();
        tracing::debug!("Scanned {} configuration manifests", fingerprints.len());
        Ok(fingerprints)
    }
}

/// Hash of path, modification time and size
fn fingerprint(path: &Path) -> Option<u64> {
    let metadata = fs::metadata(path).ok()?;
    let mut hasher = DefaultHasher::new();
    path.hash(&mut hasher);
    metadata.modified().ok()?.hash(&mut hasher);
    metadata.len().hash(&mut hasher);
    Some(hasher.finish())
}
