/*!
# Workspace

The set of root folders the viewer scans, plus the file search the
discoverer needs. The [`Workspace`] trait is the seam to the host: a
CLI uses [`LocalWorkspace`] over the file system, tests and embedders
can supply their own.
*/

use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::core::errors::Result;

use super::walker::has_xml_extension;

/// What to look for in the workspace
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileQuery {
    /// Files with exactly this name (`**/Configuration.xml`)
    Named(String),
    /// XML files somewhere below a directory with this name
    /// (`**/Catalogs/**/*.xml`)
    XmlUnder(String),
}

impl FileQuery {
    pub fn named(name: impl Into<String>) -> Self {
        FileQuery::Named(name.into())
    }

    pub fn xml_under(folder: impl Into<String>) -> Self {
        FileQuery::XmlUnder(folder.into())
    }

    /// Tests a file path relative to a workspace root
    pub fn matches(&self, relative: &Path) -> bool {
        match self {
            FileQuery::Named(name) => relative
                .file_name()
                .map_or(false, |file_name| file_name == name.as_str()),
            FileQuery::XmlUnder(folder) => {
                has_xml_extension(relative)
                    && relative
                        .parent()
                        .map_or(false, |parent| parent.iter().any(|c| c == folder.as_str()))
            }
        }
    }
}

impl std::fmt::Display for FileQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileQuery::Named(name) => write!(f, "**/{}", name),
            FileQuery::XmlUnder(folder) => write!(f, "**/{}/**/*.xml", folder),
        }
    }
}

/// Host-provided view of the workspace
pub trait Workspace {
    /// Root folders, in workspace order
    fn folders(&self) -> &[PathBuf];

    /// Finds at most `limit` files matching `query` across all folders
    fn find_files(&self, query: &FileQuery, limit: usize) -> Result<Vec<PathBuf>>;

    /// Replaces the root folder set
    fn set_folders(&mut self, folders: Vec<PathBuf>);
}

/// File-system workspace backed by `walkdir`
#[derive(Debug, Clone, Default)]
pub struct LocalWorkspace {
    folders: Vec<PathBuf>,
    exclude_dirs: Vec<String>,
}

impl LocalWorkspace {
    pub fn new(folders: Vec<PathBuf>) -> Self {
        Self {
            folders,
            exclude_dirs: vec!["node_modules".to_string()],
        }
    }

    /// Directory names never descended into
    pub fn with_exclude_dirs(mut self, exclude_dirs: Vec<String>) -> Self {
        self.exclude_dirs = exclude_dirs;
        self
    }

    fn is_excluded(&self, entry: &DirEntry) -> bool {
        entry.depth() > 0
            && entry.file_type().is_dir()
            && self
                .exclude_dirs
                .iter()
                .any(|excluded| entry.file_name() == excluded.as_str())
    }
}

impl Workspace for LocalWorkspace {
    fn folders(&self) -> &[PathBuf] {
        &self.folders
    }

    fn find_files(&self, query: &FileQuery, limit: usize) -> Result<Vec<PathBuf>> {
        let mut found = Vec::new();

        for folder in &self.folders {
            if found.len() >= limit {
                break;
            }
            if !folder.is_dir() {
                tracing::warn!("Workspace folder is not a directory: {}", folder.display());
                continue;
            }

            let walker = WalkDir::new(folder)
                .follow_links(false)
                .sort_by_file_name()
                .into_iter()
                .filter_entry(|e| !self.is_excluded(e));

            for entry in walker {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) => {
                        tracing::debug!("Skipping unreadable entry during {}: {}", query, e);
                        continue;
                    }
                };
                if !entry.file_type().is_file() {
                    continue;
                }

                let relative = entry.path().strip_prefix(folder).unwrap_or(entry.path());
                if query.matches(relative) {
                    found.push(entry.into_path());
                    if found.len() >= limit {
                        break;
                    }
                }
            }
        }

        tracing::debug!("Found {} files for {}", found.len(), query);
        Ok(found)
    }

    fn set_folders(&mut self, folders: Vec<PathBuf>) {
        self.folders = folders;
    }
}
