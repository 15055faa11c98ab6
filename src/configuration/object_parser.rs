/*!
# Metadata Object Parser

Reads one metadata XML file (`Catalogs/Товары.xml`) and turns the object
element below `MetaDataObject` into a [`ConfigObject`].

A file whose object element does not match the expected kind yields
nothing: object-type folders also contain forms, templates and other
auxiliary documents that are not objects of that kind.
*/

use std::path::Path;

use crate::core::errors::{Result, ViewerError};
use crate::core::fs_utils::read_xml_file;

use super::catalog::ObjectKind;
use super::object::{ConfigObject, NodeKind};
use super::properties::{localized_items, ObjectProperties};
use super::xml_tree::XmlNode;

/// Root element of every metadata file
pub const METADATA_ROOT: &str = "MetaDataObject";

/// Parser of individual metadata files
#[derive(Debug, Clone)]
pub struct ObjectParser {
    synonym_language: String,
}

impl Default for ObjectParser {
    fn default() -> Self {
        Self::new("ru")
    }
}

impl ObjectParser {
    /// Creates a parser preferring synonyms in `synonym_language`
    pub fn new(synonym_language: impl Into<String>) -> Self {
        Self {
            synonym_language: synonym_language.into(),
        }
    }

    /// Reads and parses a whole XML document
    pub fn read_document(path: &Path) -> Result<XmlNode> {
        let content = read_xml_file(path)?;
        XmlNode::parse_document(&content).map_err(|message| ViewerError::xml(path, message))
    }

    /// Parses an object file, logging and swallowing any failure
    pub fn parse_object_file(&self, path: &Path, kind: ObjectKind) -> Option<ConfigObject> {
        match self.try_parse_object_file(path, kind) {
            Ok(object) => object,
            Err(e) => {
                tracing::warn!("Error parsing object file {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Parses an object file; `Ok(None)` when the file holds another kind
    pub fn try_parse_object_file(&self, path: &Path, kind: ObjectKind) -> Result<Option<ConfigObject>> {
        let document = Self::read_document(path)?;
        Ok(self.parse_object_document(&document, path, kind))
    }

    /// Builds an object from an already parsed document
    pub fn parse_object_document(
        &self,
        document: &XmlNode,
        path: &Path,
        kind: ObjectKind,
    ) -> Option<ConfigObject> {
        if document.name != METADATA_ROOT {
            return None;
        }
        let object = document.child(kind.tag_name())?;
        let properties = object.child("Properties");

        let name = properties
            .and_then(|p| p.child_text("Name"))
            .map(str::to_string)
            .unwrap_or_else(|| file_stem(path));

        let synonym = properties
            .and_then(|p| self.extract_synonym(p))
            .unwrap_or_else(|| name.clone());

        Some(ConfigObject {
            display_name: synonym.clone(),
            name,
            kind: NodeKind::Object(kind),
            file_path: path.to_path_buf(),
            uuid: object.attr("uuid").map(str::to_string),
            synonym: Some(synonym),
            comment: properties
                .and_then(|p| p.child_text("Comment"))
                .map(str::to_string),
            properties: properties.map(|p| ObjectProperties::from_element(kind, p)),
            children: None,
        })
    }

    /// Picks the synonym translation to display.
    ///
    /// Several translations: the one in the preferred language (if any).
    /// A single translation: that one, whatever its language.
    fn extract_synonym(&self, properties: &XmlNode) -> Option<String> {
        let items = localized_items(properties.child("Synonym")?);
        let chosen = match items.as_slice() {
            [] => None,
            [single] => Some(single),
            many => many.iter().find(|item| item.lang == self.synonym_language),
        }?;
        if chosen.content.is_empty() {
            None
        } else {
            Some(chosen.content.clone())
        }
    }

    /// `true` if the file is a `MetaDataObject/Configuration` manifest
    pub fn is_configuration_manifest(path: &Path) -> bool {
        match Self::read_document(path) {
            Ok(document) => {
                document.name == METADATA_ROOT && document.child("Configuration").is_some()
            }
            Err(e) => {
                tracing::warn!("Error parsing configuration file {}: {}", path.display(), e);
                false
            }
        }
    }

    /// Re-reads the backing file of an object for the details view.
    ///
    /// Returns the `MetaDataObject` element, or `None` for nodes without
    /// a backing file (folders, help) and files that no longer exist.
    pub fn object_details(object: &ConfigObject) -> Result<Option<XmlNode>> {
        if !object.has_file() || !object.file_path.is_file() {
            return Ok(None);
        }
        Self::read_document(&object.file_path).map(Some)
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn catalog_xml(name: Option<&str>, synonym_items: &str) -> String {
        let name = name
            .map(|n| format!("<Name>{}</Name>", n))
            .unwrap_or_default();
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<MetaDataObject xmlns="http://v8.1c.ru/8.3/MDClasses" xmlns:v8="http://v8.1c.ru/8.1/data/core" version="2.15">
    <Catalog uuid="9f1d2c3b-0000-4000-8000-000000000001">
        <Properties>
            {}
            <Synonym>{}</Synonym>
            <Comment>Основной справочник</Comment>
            <Hierarchical>true</Hierarchical>
        </Properties>
    </Catalog>
</MetaDataObject>"#,
            name, synonym_items
        )
    }

    fn item(lang: &str, content: &str) -> String {
        format!(
            "<v8:item><v8:lang>{}</v8:lang><v8:content>{}</v8:content></v8:item>",
            lang, content
        )
    }

    fn write(dir: &TempDir, file: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(file);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_parse_catalog_object() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "Товары.xml", &catalog_xml(Some("Товары"), &item("ru", "Товары и услуги")));

        let object = ObjectParser::default()
            .parse_object_file(&path, ObjectKind::Catalog)
            .unwrap();

        assert_eq!(object.name, "Товары");
        assert_eq!(object.display_name, "Товары и услуги");
        assert_eq!(object.synonym.as_deref(), Some("Товары и услуги"));
        assert_eq!(object.uuid.as_deref(), Some("9f1d2c3b-0000-4000-8000-000000000001"));
        assert_eq!(object.comment.as_deref(), Some("Основной справочник"));
        assert_eq!(object.kind, NodeKind::Object(ObjectKind::Catalog));
        assert_eq!(object.file_path, path);
        assert!(object.children.is_none());
        assert!(object.properties.is_some());
    }

    #[test]
    fn test_preferred_language_among_many() {
        let dir = TempDir::new().unwrap();
        let items = format!("{}{}", item("en", "Goods"), item("ru", "Товары"));
        let path = write(&dir, "Goods.xml", &catalog_xml(Some("Goods"), &items));

        let object = ObjectParser::default()
            .parse_object_file(&path, ObjectKind::Catalog)
            .unwrap();
        assert_eq!(object.display_name, "Товары");

        let english = ObjectParser::new("en")
            .parse_object_file(&path, ObjectKind::Catalog)
            .unwrap();
        assert_eq!(english.display_name, "Goods");
    }

    #[test]
    fn test_many_without_preferred_language_falls_back_to_name() {
        let dir = TempDir::new().unwrap();
        let items = format!("{}{}", item("en", "Goods"), item("de", "Waren"));
        let path = write(&dir, "Goods.xml", &catalog_xml(Some("Goods"), &items));

        let object = ObjectParser::default()
            .parse_object_file(&path, ObjectKind::Catalog)
            .unwrap();
        assert_eq!(object.display_name, "Goods");
        assert_eq!(object.synonym.as_deref(), Some("Goods"));
    }

    #[test]
    fn test_single_entry_used_regardless_of_language() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "Goods.xml", &catalog_xml(Some("Goods"), &item("en", "Goods &amp; Services")));

        let object = ObjectParser::default()
            .parse_object_file(&path, ObjectKind::Catalog)
            .unwrap();
        assert_eq!(object.display_name, "Goods & Services");
    }

    #[test]
    fn test_missing_name_uses_file_stem() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "Склады.xml", &catalog_xml(None, ""));

        let object = ObjectParser::default()
            .parse_object_file(&path, ObjectKind::Catalog)
            .unwrap();
        assert_eq!(object.name, "Склады");
        assert_eq!(object.display_name, "Склады");
    }

    #[test]
    fn test_kind_mismatch_yields_nothing() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "Товары.xml", &catalog_xml(Some("Товары"), ""));

        assert!(ObjectParser::default()
            .parse_object_file(&path, ObjectKind::Document)
            .is_none());
    }

    #[test]
    fn test_malformed_file_yields_nothing() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "Broken.xml", "<MetaDataObject><Catalog>");

        let parser = ObjectParser::default();
        assert!(parser.parse_object_file(&path, ObjectKind::Catalog).is_none());
        assert!(parser.try_parse_object_file(&path, ObjectKind::Catalog).is_err());
    }

    #[test]
    fn test_parsing_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "Товары.xml", &catalog_xml(Some("Товары"), &item("ru", "Товары")));

        let parser = ObjectParser::default();
        let first = parser.parse_object_file(&path, ObjectKind::Catalog);
        let second = parser.parse_object_file(&path, ObjectKind::Catalog);
        assert!(first.is_some());
        assert_eq!(first, second);
    }

    #[test]
    fn test_configuration_manifest_detection() {
        let dir = TempDir::new().unwrap();
        let manifest = write(
            &dir,
            "Configuration.xml",
            r#"<MetaDataObject><Configuration uuid="1"><Properties><Name>Торговля</Name></Properties></Configuration></MetaDataObject>"#,
        );
        let other = write(&dir, "Other.xml", &catalog_xml(Some("X"), ""));

        assert!(ObjectParser::is_configuration_manifest(&manifest));
        assert!(!ObjectParser::is_configuration_manifest(&other));
    }

    #[test]
    fn test_object_details_rereads_file() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "Товары.xml", &catalog_xml(Some("Товары"), ""));
        let object = ObjectParser::default()
            .parse_object_file(&path, ObjectKind::Catalog)
            .unwrap();

        let details = ObjectParser::object_details(&object).unwrap().unwrap();
        assert_eq!(details.name, METADATA_ROOT);
        assert!(details.child("Catalog").is_some());

        assert!(ObjectParser::object_details(&ConfigObject::help())
            .unwrap()
            .is_none());
    }
}
