/*!
# Directory Walker

Collects the objects of one kind from an object-type folder.

Both dump layouts are supported without special casing:
- flat: `Catalogs/Товары.xml`
- nested: `Catalogs/Товары/Товары.xml`, `Catalogs/Товары/Forms/...`

Every `.xml` file is offered to the parser with the folder's kind;
files describing something else (forms, templates) are rejected there.
*/

use std::fs;
use std::path::{Path, PathBuf};

use super::catalog::ObjectKind;
use super::object::{sort_by_display_name, ConfigObject};
use super::object_parser::ObjectParser;

/// Walks object-type folders and parses their XML files
#[derive(Debug, Clone, Default)]
pub struct DirectoryWalker {
    parser: ObjectParser,
}

impl DirectoryWalker {
    pub fn new(parser: ObjectParser) -> Self {
        Self { parser }
    }

    pub fn parser(&self) -> &ObjectParser {
        &self.parser
    }

    /// Parses every object of `kind` below `dir`, sorted by display name
    pub fn walk(&self, dir: &Path, kind: ObjectKind) -> Vec<ConfigObject> {
        let mut objects = Vec::new();

        if !dir.is_dir() {
            tracing::debug!("Directory does not exist: {}", dir.display());
            return objects;
        }

        self.walk_recursive(dir, kind, &mut objects);
        sort_by_display_name(&mut objects);

        tracing::debug!("Parsed {} objects from {}", objects.len(), dir.display());
        objects
    }

    fn walk_recursive(&self, dir: &Path, kind: ObjectKind, objects: &mut Vec<ConfigObject>) {
        let (files, subdirs) = match list_entries(dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("Error reading directory {}: {}", dir.display(), e);
                return;
            }
        };

        tracing::debug!(
            "Found {} XML files and {} subdirectories in {}",
            files.len(),
            subdirs.len(),
            dir.display()
        );

        // Сначала XML файлы текущей папки, затем вложенные папки
        for file in &files {
            if let Some(object) = self.parser.parse_object_file(file, kind) {
                objects.push(object);
            }
        }

        for subdir in &subdirs {
            self.walk_recursive(subdir, kind, objects);
        }
    }
}

/// Direct `.xml` files and subdirectories of `dir`, sorted by file name
fn list_entries(dir: &Path) -> std::io::Result<(Vec<PathBuf>, Vec<PathBuf>)> {
    let mut files = Vec::new();
    let mut subdirs = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let file_type = entry.file_type()?;

        if file_type.is_dir() {
            subdirs.push(path);
        } else if file_type.is_file() && has_xml_extension(&path) {
            files.push(path);
        }
    }

    files.sort();
    subdirs.sort();
    Ok((files, subdirs))
}

pub(crate) fn has_xml_extension(path: &Path) -> bool {
    path.extension().map_or(false, |ext| ext == "xml")
}
