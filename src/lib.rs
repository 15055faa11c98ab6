/*!
# 1C Configuration Viewer

Navigator for 1C:Enterprise configuration dumps: finds configuration
projects in a workspace, parses their XML metadata files into a
two-level tree (object-type folders and objects), filters the tree by
substring search and renders object details as an HTML page.

## Architecture

```text
onec-config-viewer
├── Configuration   - catalog, XML parser, walker, discovery, watcher
├── Tree            - canonical forest, search projection, tree items
├── Reports         - text tree, JSON, HTML details page
├── App             - viewer context, commands, workspace scan
├── Core            - errors, settings, file helpers
└── CLI             - tree / search / show / scan / watch
```

## Usage

### CLI
```bash
# Print the tree of the configurations under ./src
onec-config-viewer tree ./src

# Search objects
onec-config-viewer search Товары ./src

# Details page of one object
onec-config-viewer show Goods ./src --output goods.html

# Follow Configuration.xml changes
onec-config-viewer watch ./src
```

### Library
```rust,ignore
use onec_config_viewer::discover_configurations;

let forest = discover_configurations("./src")?;
for folder in &forest {
    println!("{} ({})", folder.display_name, folder.child_count());
}
```
*/

pub mod app;
pub mod cli_common;
pub mod configuration;
pub mod core;
pub mod reports;
pub mod tree;

pub use app::{CommandOutcome, Notice, ViewerCommand, ViewerContext};
pub use configuration::{
    ConfigObject, ConfigurationDiscoverer, LocalWorkspace, NodeKind, ObjectKind, ObjectParser,
    Workspace,
};
pub use core::{Result, ViewerError, ViewerSettings};
pub use reports::{DetailsPage, ReportFormat, ReportManager};
pub use tree::{ConfigTreeModel, ModelEvent, TreeItem};

use std::path::Path;

/// Discovers the configurations under one directory with default settings
pub fn discover_configurations<P: AsRef<Path>>(root: P) -> Result<Vec<ConfigObject>> {
    let settings = ViewerSettings::default();
    let workspace = LocalWorkspace::new(vec![root.as_ref().to_path_buf()])
        .with_exclude_dirs(settings.discovery.exclude_dirs.clone());
    let discoverer = ConfigurationDiscoverer::new(
        settings.discovery,
        ObjectParser::new(settings.display.synonym_language),
    );
    discoverer.discover(&workspace)
}
