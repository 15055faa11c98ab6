/*!
# Configuration Discovery

Finds the 1C configurations of a workspace and builds the forest shown
by the tree.

1. `Configuration.xml` files anchor configurations. One manifest: its
   object-type folders become the top level. Several: each configuration
   is wrapped in a `configuration-root` node named after its directory.
2. Without any manifest, configuration roots are inferred: a directory
   holding at least `detection_threshold` known object-type folders is
   taken as a root and labelled "(detected)".

Per-file and per-pattern failures are logged and skipped; a broken file
means a missing object, never a failed scan.
*/

use std::path::{Path, PathBuf};

use crate::core::errors::Result;
use crate::core::settings::DiscoverySettings;

use super::catalog::{self, ObjectTypeInfo};
use super::object::ConfigObject;
use super::object_parser::ObjectParser;
use super::walker::DirectoryWalker;
use super::workspace::{FileQuery, Workspace};

/// Manifest file anchoring a configuration dump
pub const CONFIGURATION_FILE: &str = "Configuration.xml";

/// Discovers configurations in a workspace
#[derive(Debug, Clone)]
pub struct ConfigurationDiscoverer {
    settings: DiscoverySettings,
    walker: DirectoryWalker,
}

impl ConfigurationDiscoverer {
    pub fn new(settings: DiscoverySettings, parser: ObjectParser) -> Self {
        Self {
            settings,
            walker: DirectoryWalker::new(parser),
        }
    }

    pub fn settings(&self) -> &DiscoverySettings {
        &self.settings
    }

    /// Scans the workspace and returns the top-level forest.
    ///
    /// Errors only when the manifest search itself fails; everything
    /// below it degrades to fewer objects.
    pub fn discover<W: Workspace + ?Sized>(&self, workspace: &W) -> Result<Vec<ConfigObject>> {
        let mut results = Vec::new();

        if workspace.folders().is_empty() {
            tracing::info!("No workspace folders found");
            return Ok(results);
        }
        tracing::debug!("Scanning {} workspace folders", workspace.folders().len());

        let manifests = workspace.find_files(
            &FileQuery::named(CONFIGURATION_FILE),
            self.settings.max_configuration_files,
        )?;
        tracing::debug!("Found {} {} files", manifests.len(), CONFIGURATION_FILE);

        if manifests.is_empty() {
            tracing::debug!("No {} found, detecting 1C structure patterns", CONFIGURATION_FILE);
            results.extend(self.detect_configuration_structures(workspace));
        } else {
            let grouped = manifests.len() > 1;
            for manifest in &manifests {
                let folders = self.parse_configuration_root(manifest);
                if folders.is_empty() {
                    continue;
                }

                if grouped {
                    let dir = manifest.parent().unwrap_or(manifest.as_path());
                    let name = configuration_name(dir);
                    results.push(ConfigObject::configuration_root(
                        &name,
                        format!("Configuration: {}", name),
                        dir,
                        folders,
                    ));
                } else {
                    results.extend(folders);
                }
            }
        }

        tracing::info!(
            "Workspace parsing completed. Found {} configuration nodes",
            results.len()
        );
        Ok(results)
    }

    /// Folders of the configuration anchored by `manifest`
    pub fn parse_configuration_root(&self, manifest: &Path) -> Vec<ConfigObject> {
        if !ObjectParser::is_configuration_manifest(manifest) {
            tracing::warn!("Not a configuration manifest: {}", manifest.display());
            return Vec::new();
        }
        match manifest.parent() {
            Some(dir) => self.parse_configuration_directory(dir),
            None => Vec::new(),
        }
    }

    /// Folders of a configuration directory, manifest or not
    pub fn parse_configuration_directory(&self, dir: &Path) -> Vec<ConfigObject> {
        tracing::debug!("Parsing configuration directory: {}", dir.display());

        catalog::object_types()
            .filter_map(|info| self.parse_object_folder(dir, info))
            .collect()
    }

    fn parse_object_folder(&self, config_dir: &Path, info: &ObjectTypeInfo) -> Option<ConfigObject> {
        let object_dir = config_dir.join(info.folder);
        if !object_dir.is_dir() {
            return None;
        }

        let objects = self.walker.walk(&object_dir, info.kind);
        if objects.is_empty() {
            return None;
        }
        tracing::debug!("Parsed {} objects from {}", objects.len(), info.folder);
        Some(ConfigObject::folder(info.folder, &object_dir, objects))
    }

    /// Heuristic detection of configuration roots without a manifest
    fn detect_configuration_structures<W: Workspace + ?Sized>(&self, workspace: &W) -> Vec<ConfigObject> {
        let mut roots: Vec<PathBuf> = Vec::new();

        for info in catalog::object_types() {
            let query = FileQuery::xml_under(info.folder);
            let files = match workspace.find_files(&query, self.settings.max_files_per_type) {
                Ok(files) => files,
                Err(e) => {
                    tracing::warn!("Search for {} failed: {}", query, e);
                    continue;
                }
            };

            for file in files {
                if let Some(root) = self.find_configuration_root(&file, info.folder) {
                    if !roots.contains(&root) {
                        tracing::debug!("Found potential configuration root: {}", root.display());
                        roots.push(root);
                    }
                }
            }
        }

        let mut results = Vec::new();
        for root in roots {
            let folders = self.parse_configuration_directory(&root);
            if folders.is_empty() {
                continue;
            }
            let name = configuration_name(&root);
            results.push(ConfigObject::configuration_root(
                &name,
                format!("Configuration: {} (detected)", name),
                &root,
                folders,
            ));
        }

        tracing::debug!("Detected {} configuration structures", results.len());
        results
    }

    /// Walks up from `file`; every ancestor named `folder` proposes its
    /// parent. The nearest proposal holding enough known folders wins.
    pub fn find_configuration_root(&self, file: &Path, folder: &str) -> Option<PathBuf> {
        file.ancestors()
            .skip(1)
            .filter(|dir| dir.file_name().map_or(false, |name| name == folder))
            .filter_map(Path::parent)
            .find(|candidate| {
                let found = count_object_folders(candidate);
                tracing::debug!(
                    "Found {} object type folders in {}",
                    found,
                    candidate.display()
                );
                found >= self.settings.detection_threshold
            })
            .map(Path::to_path_buf)
    }
}

/// Number of known object-type folders directly inside `dir`
pub fn count_object_folders(dir: &Path) -> usize {
    catalog::object_types()
        .filter(|info| dir.join(info.folder).is_dir())
        .count()
}

/// Display name of a configuration: its directory name
pub fn configuration_name(dir: &Path) -> String {
    dir.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "Unknown".to_string())
}
