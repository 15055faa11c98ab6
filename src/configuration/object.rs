/*!
# Configuration Objects

`ConfigObject` is a node of the configuration forest: either a parsed
metadata object (leaf) or a synthetic grouping node (folder,
configuration root) carrying children.
*/

use serde::{Serialize, Serializer};
use std::fmt;
use std::path::{Path, PathBuf};

use super::catalog::ObjectKind;
use super::localization::{compare_display_names, localized_folder_name};
use super::properties::ObjectProperties;

/// Kind of a forest node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Parsed metadata object
    Object(ObjectKind),
    /// Object-type folder (`Catalogs`)
    Folder,
    /// Synthetic root grouping one configuration
    ConfigurationRoot,
    /// Sentinel shown when nothing is visible
    Help,
}

impl NodeKind {
    /// Wire name of the kind (`Catalog`, `folder`, `configuration-root`, `help`)
    pub fn type_name(&self) -> &'static str {
        match self {
            NodeKind::Object(kind) => kind.tag_name(),
            NodeKind::Folder => "folder",
            NodeKind::ConfigurationRoot => "configuration-root",
            NodeKind::Help => "help",
        }
    }

    pub fn object_kind(&self) -> Option<ObjectKind> {
        match self {
            NodeKind::Object(kind) => Some(*kind),
            _ => None,
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(self, NodeKind::Folder | NodeKind::ConfigurationRoot)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_name())
    }
}

impl Serialize for NodeKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.type_name())
    }
}

/// Node of the configuration forest
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigObject {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub display_name: String,
    /// Backing file or directory; empty for nodes without one
    pub file_path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub synonym: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<ObjectProperties>,
    /// `Some` for containers, `None` for leaf objects
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<ConfigObject>>,
}

impl ConfigObject {
    /// Folder node for an object-type directory
    pub fn folder(folder_name: &str, dir: &Path, children: Vec<ConfigObject>) -> Self {
        Self {
            name: folder_name.to_string(),
            kind: NodeKind::Folder,
            display_name: localized_folder_name(folder_name).to_string(),
            file_path: dir.to_path_buf(),
            uuid: None,
            synonym: None,
            comment: None,
            properties: None,
            children: Some(children),
        }
    }

    /// Root node grouping the folders of one configuration
    pub fn configuration_root(
        name: &str,
        display_name: String,
        dir: &Path,
        children: Vec<ConfigObject>,
    ) -> Self {
        Self {
            name: name.to_string(),
            kind: NodeKind::ConfigurationRoot,
            display_name,
            file_path: dir.to_path_buf(),
            uuid: None,
            synonym: None,
            comment: None,
            properties: None,
            children: Some(children),
        }
    }

    /// Sentinel leaf shown when the visible forest is empty
    pub fn help() -> Self {
        Self {
            name: "no-config-found".to_string(),
            kind: NodeKind::Help,
            display_name: "Click here for help".to_string(),
            file_path: PathBuf::new(),
            uuid: None,
            synonym: None,
            comment: Some("No 1C configuration found. Click to see options.".to_string()),
            properties: None,
            children: None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.kind.type_name()
    }

    pub fn is_container(&self) -> bool {
        self.children.is_some()
    }

    /// Children of a container, empty slice for leaves
    pub fn child_nodes(&self) -> &[ConfigObject] {
        self.children.as_deref().unwrap_or(&[])
    }

    pub fn child_count(&self) -> usize {
        self.child_nodes().len()
    }

    /// `true` when the node is backed by a file on disk
    pub fn has_file(&self) -> bool {
        !self.file_path.as_os_str().is_empty()
    }
}

/// Sorts objects by display name, locale-aware
pub fn sort_by_display_name(objects: &mut [ConfigObject]) {
    objects.sort_by(|a, b| compare_display_names(&a.display_name, &b.display_name));
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_node_kind_names() {
        assert_eq!(NodeKind::Object(ObjectKind::Catalog).type_name(), "Catalog");
        assert_eq!(NodeKind::Folder.type_name(), "folder");
        assert_eq!(NodeKind::ConfigurationRoot.type_name(), "configuration-root");
        assert_eq!(NodeKind::Help.type_name(), "help");
        assert!(NodeKind::Folder.is_container());
        assert!(!NodeKind::Help.is_container());
    }

    #[test]
    fn test_help_node_is_leaf_without_file() {
        let help = ConfigObject::help();
        assert!(!help.is_container());
        assert!(!help.has_file());
        assert_eq!(help.child_count(), 0);
    }

    #[test]
    fn test_folder_uses_localized_name() {
        let folder = ConfigObject::folder("Documents", Path::new("/cfg/Documents"), Vec::new());
        assert_eq!(folder.display_name, "Документы");
        assert!(folder.is_container());
        assert_eq!(folder.file_path, PathBuf::from("/cfg/Documents"));
    }

    #[test]
    fn test_serialization_shape() {
        let folder = ConfigObject::folder("Roles", Path::new("/cfg/Roles"), Vec::new());
        let value = serde_json::to_value(&folder).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "Roles",
                "type": "folder",
                "displayName": "Роли",
                "filePath": "/cfg/Roles",
                "children": []
            })
        );
    }
}
