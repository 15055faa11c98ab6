/*!
# Configuration Scan

Quick check whether the workspace holds 1C configurations at all,
used at startup, by the scan command and when the workspace changes.
Unlike discovery it does not build the forest; it only reports where
configurations were found.
*/

use std::path::{Path, PathBuf};

use crate::configuration::{FileQuery, Workspace, CONFIGURATION_FILE};

use super::commands::Notice;

/// Folders probed when no manifest is found directly
pub const DEEP_SEARCH_FOLDERS: [&str; 5] = [
    "Catalogs",
    "Documents",
    "Reports",
    "DataProcessors",
    "CommonModules",
];

/// Files inspected per probed folder
pub const DEEP_SEARCH_LIMIT: usize = 5;

/// Parent levels checked for a manifest above a probed file
pub const PARENT_SEARCH_DEPTH: usize = 5;

/// Result of a workspace scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanReport {
    /// Manifests found by name
    Manifests(Vec<PathBuf>),
    /// A directory holding a manifest found above typical object folders
    Structure(PathBuf),
    NotFound,
}

impl ScanReport {
    pub fn has_config(&self) -> bool {
        !matches!(self, ScanReport::NotFound)
    }

    /// User-facing notice, `None` when nothing was found
    pub fn notice(&self, folders: &[PathBuf]) -> Option<Notice> {
        match self {
            ScanReport::Manifests(files) if files.len() == 1 => Some(Notice::info(format!(
                "1C Configuration detected in: {}! Use the 1C Configuration view to explore objects.",
                relative_path(&files[0], folders)
            ))),
            ScanReport::Manifests(files) => Some(Notice::info(format!(
                "{} 1C Configurations detected! Use the 1C Configuration view to explore objects.",
                files.len()
            ))),
            ScanReport::Structure(dir) => Some(Notice::info(format!(
                "1C Configuration structure detected in: {}! Configuration.xml might be missing. \
                 Use the 1C Configuration view to explore available objects.",
                relative_path(dir, folders)
            ))),
            ScanReport::NotFound => None,
        }
    }
}

/// Looks for `Configuration.xml` files, falling back to a deep search
pub fn check_for_configurations<W: Workspace + ?Sized>(workspace: &W, limit: usize) -> ScanReport {
    match workspace.find_files(&FileQuery::named(CONFIGURATION_FILE), limit) {
        Ok(files) if !files.is_empty() => {
            tracing::info!("1C configurations found: {:?}", files);
            ScanReport::Manifests(files)
        }
        Ok(_) => deep_config_search(workspace),
        Err(e) => {
            tracing::error!("Error checking for 1C configurations: {}", e);
            ScanReport::NotFound
        }
    }
}

/// Probes typical object folders and looks for a manifest above them
pub fn deep_config_search<W: Workspace + ?Sized>(workspace: &W) -> ScanReport {
    let Some(workspace_root) = workspace.folders().first() else {
        return ScanReport::NotFound;
    };

    for folder in DEEP_SEARCH_FOLDERS {
        let files = match workspace.find_files(&FileQuery::xml_under(folder), DEEP_SEARCH_LIMIT) {
            Ok(files) => files,
            Err(e) => {
                tracing::error!("Error performing deep config search: {}", e);
                return ScanReport::NotFound;
            }
        };

        for file in files {
            if let Some(dir) = find_configuration_xml_in_parents(&file, workspace_root) {
                tracing::debug!("Configuration structure found in {}", dir.display());
                return ScanReport::Structure(dir);
            }
        }
    }

    ScanReport::NotFound
}

/// Walks up from `file` (at most five levels, never leaving
/// `workspace_root`) and returns the first directory holding a manifest
pub fn find_configuration_xml_in_parents(file: &Path, workspace_root: &Path) -> Option<PathBuf> {
    file.ancestors()
        .skip(1)
        .take(PARENT_SEARCH_DEPTH)
        .take_while(|dir| dir.starts_with(workspace_root))
        .find(|dir| dir.join(CONFIGURATION_FILE).is_file())
        .map(Path::to_path_buf)
}

/// Path relative to the first workspace folder containing it
pub fn relative_path(path: &Path, folders: &[PathBuf]) -> String {
    folders
        .iter()
        .find_map(|folder| path.strip_prefix(folder).ok())
        .unwrap_or(path)
        .display()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configuration::LocalWorkspace;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_single_manifest_notice_uses_relative_path() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().to_path_buf();
        write(&root.join("src/cf/Configuration.xml"), "<MetaDataObject/>");

        let workspace = LocalWorkspace::new(vec![root.clone()]);
        let report = check_for_configurations(&workspace, 10);

        assert!(report.has_config());
        let notice = report.notice(workspace.folders()).unwrap();
        let expected = Path::new("src").join("cf").join("Configuration.xml");
        assert_eq!(
            notice.message,
            format!(
                "1C Configuration detected in: {}! Use the 1C Configuration view to explore objects.",
                expected.display()
            )
        );
    }

    #[test]
    fn test_several_manifests_are_counted() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().to_path_buf();
        write(&root.join("a/Configuration.xml"), "<MetaDataObject/>");
        write(&root.join("b/Configuration.xml"), "<MetaDataObject/>");

        let workspace = LocalWorkspace::new(vec![root]);
        let notice = check_for_configurations(&workspace, 10)
            .notice(workspace.folders())
            .unwrap();

        assert!(notice.message.starts_with("2 1C Configurations detected!"));
    }

    #[test]
    fn test_nothing_found() {
        let temp_dir = TempDir::new().unwrap();
        write(&temp_dir.path().join("readme.txt"), "hello");

        let workspace = LocalWorkspace::new(vec![temp_dir.path().to_path_buf()]);
        let report = check_for_configurations(&workspace, 10);

        assert_eq!(report, ScanReport::NotFound);
        assert_eq!(report.notice(workspace.folders()), None);
    }

    #[test]
    fn test_find_configuration_xml_in_parents_respects_depth() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write(&root.join("cfg/Configuration.xml"), "<MetaDataObject/>");
        let near = root.join("cfg/Catalogs/Foo.xml");
        let far = root.join("cfg/a/b/c/d/e/Catalogs/Foo.xml");

        assert_eq!(
            find_configuration_xml_in_parents(&near, root),
            Some(root.join("cfg"))
        );
        assert_eq!(find_configuration_xml_in_parents(&far, root), None);
    }

    #[test]
    fn test_relative_path_outside_workspace() {
        let folders = vec![PathBuf::from("/work")];
        assert_eq!(relative_path(Path::new("/other/x.xml"), &folders), "/other/x.xml");
    }
}
