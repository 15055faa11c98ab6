/*!
# Core Module

Core functionality shared by the viewer: error handling,
settings management and file helpers.
*/

pub mod errors;
pub mod fs_utils;
pub mod settings;

pub use errors::{Result, ViewerError};
pub use fs_utils::read_xml_file;
pub use settings::{DiscoverySettings, DisplaySettings, ViewerSettings, WatchSettings};
