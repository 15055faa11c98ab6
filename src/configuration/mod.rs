/*!
# Configuration Management

Discovery and parsing of 1C configuration dumps: the object-type
catalog, the XML object parser, the directory walker and the
workspace-level discoverer that assembles the forest.
*/

pub mod catalog;
pub mod discovery;
pub mod localization;
pub mod object;
pub mod object_parser;
pub mod properties;
pub mod walker;
pub mod watcher;
pub mod workspace;
pub mod xml_tree;

pub use catalog::{ObjectKind, ObjectTypeInfo, OBJECT_TYPES};
pub use discovery::{ConfigurationDiscoverer, CONFIGURATION_FILE};
pub use localization::{compare_display_names, localized_folder_name};
pub use object::{ConfigObject, NodeKind};
pub use object_parser::ObjectParser;
pub use properties::{ObjectProperties, PropertyBag, PropertyValue};
pub use walker::DirectoryWalker;
pub use watcher::{ConfigurationWatcher, ManifestChange};
pub use workspace::{FileQuery, LocalWorkspace, Workspace};
pub use xml_tree::XmlNode;
