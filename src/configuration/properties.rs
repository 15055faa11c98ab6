/*!
# Object Properties

Typed view of the `Properties` element of a metadata object.

Catalogs and documents expose the flags the details page highlights as
typed fields; every other kind is kept as an opaque property bag. All
variants retain the complete bag, so nothing from the source file is
lost.
*/

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

use super::catalog::ObjectKind;
use super::xml_tree::XmlNode;

/// Properties shown in the "Properties" section of the details page,
/// in display order
pub const HIGHLIGHTED_PROPERTIES: [&str; 9] = [
    "UseStandardCommands",
    "Hierarchical",
    "CodeLength",
    "DescriptionLength",
    "CheckUnique",
    "Autonumbering",
    "NumberType",
    "NumberLength",
    "Posting",
];

/// Translation of a multi-language value (`v8:item`)
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct LocalizedString {
    pub lang: String,
    pub content: String,
}

/// Value of a single property
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Bool(bool),
    Integer(i64),
    Text(String),
    Localized(Vec<LocalizedString>),
    /// Structured value kept as parsed XML
    Element(XmlNode),
    Empty,
}

impl PropertyValue {
    pub fn from_element(node: &XmlNode) -> Self {
        if !node.children.is_empty() && node.children.iter().all(|c| c.name == "v8:item") {
            return PropertyValue::Localized(localized_items(node));
        }

        if !node.children.is_empty() {
            return PropertyValue::Element(node.clone());
        }

        match node.text() {
            None => PropertyValue::Empty,
            Some("true") => PropertyValue::Bool(true),
            Some("false") => PropertyValue::Bool(false),
            Some(text) => match text.parse::<i64>() {
                Ok(number) if !(text.len() > 1 && text.starts_with('0')) => {
                    PropertyValue::Integer(number)
                }
                _ => PropertyValue::Text(text.to_string()),
            },
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropertyValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            PropertyValue::Integer(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            PropertyValue::Text(value) => Some(value),
            _ => None,
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Bool(true) => write!(f, "Yes"),
            PropertyValue::Bool(false) => write!(f, "No"),
            PropertyValue::Integer(value) => write!(f, "{}", value),
            PropertyValue::Text(value) => write!(f, "{}", value),
            PropertyValue::Localized(items) => {
                let parts: Vec<String> = items
                    .iter()
                    .map(|item| format!("{}: {}", item.lang, item.content))
                    .collect();
                write!(f, "{}", parts.join("; "))
            }
            PropertyValue::Element(node) => write!(f, "{}", node.to_json()),
            PropertyValue::Empty => Ok(()),
        }
    }
}

/// Collects `v8:item` entries of a multi-language element
pub fn localized_items(node: &XmlNode) -> Vec<LocalizedString> {
    node.children_named("v8:item")
        .map(|item| LocalizedString {
            lang: item.child_text("v8:lang").unwrap_or_default().to_string(),
            content: item.child_text("v8:content").unwrap_or_default().to_string(),
        })
        .collect()
}

/// Ordered name → value map of the `Properties` element
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyBag {
    entries: Vec<(String, PropertyValue)>,
}

impl PropertyBag {
    pub fn from_element(properties: &XmlNode) -> Self {
        let entries = properties
            .children
            .iter()
            .map(|child| (child.name.clone(), PropertyValue::from_element(child)))
            .collect();
        Self { entries }
    }

    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(PropertyValue::as_bool)
    }

    fn integer(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(PropertyValue::as_integer)
    }

    fn text(&self, name: &str) -> Option<String> {
        self.get(name).and_then(PropertyValue::as_text).map(str::to_string)
    }
}

impl Serialize for PropertyBag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Catalog-specific flags
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogProperties {
    pub hierarchical: Option<bool>,
    pub code_length: Option<i64>,
    pub description_length: Option<i64>,
    pub check_unique: Option<bool>,
    pub autonumbering: Option<bool>,
    pub use_standard_commands: Option<bool>,
    pub all: PropertyBag,
}

/// Document-specific flags
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentProperties {
    /// Either a boolean flag or the `Allow`/`Deny` enumeration
    pub posting: Option<PropertyValue>,
    pub number_type: Option<String>,
    pub number_length: Option<i64>,
    pub check_unique: Option<bool>,
    pub autonumbering: Option<bool>,
    pub use_standard_commands: Option<bool>,
    pub all: PropertyBag,
}

/// Parsed `Properties` element, tagged by object kind
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub enum ObjectProperties {
    Catalog(CatalogProperties),
    Document(DocumentProperties),
    /// Kinds without typed fields
    Opaque(PropertyBag),
}

impl ObjectProperties {
    pub fn from_element(kind: ObjectKind, properties: &XmlNode) -> Self {
        let all = PropertyBag::from_element(properties);
        match kind {
            ObjectKind::Catalog => ObjectProperties::Catalog(CatalogProperties {
                hierarchical: all.bool("Hierarchical"),
                code_length: all.integer("CodeLength"),
                description_length: all.integer("DescriptionLength"),
                check_unique: all.bool("CheckUnique"),
                autonumbering: all.bool("Autonumbering"),
                use_standard_commands: all.bool("UseStandardCommands"),
                all,
            }),
            ObjectKind::Document => ObjectProperties::Document(DocumentProperties {
                posting: all.get("Posting").cloned(),
                number_type: all.text("NumberType"),
                number_length: all.integer("NumberLength"),
                check_unique: all.bool("CheckUnique"),
                autonumbering: all.bool("Autonumbering"),
                use_standard_commands: all.bool("UseStandardCommands"),
                all,
            }),
            _ => ObjectProperties::Opaque(all),
        }
    }

    /// Complete property bag regardless of variant
    pub fn bag(&self) -> &PropertyBag {
        match self {
            ObjectProperties::Catalog(props) => &props.all,
            ObjectProperties::Document(props) => &props.all,
            ObjectProperties::Opaque(bag) => bag,
        }
    }

    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.bag().get(name)
    }

    /// Well-known properties present on this object, in display order
    pub fn highlights(&self) -> Vec<(&'static str, &PropertyValue)> {
        HIGHLIGHTED_PROPERTIES
            .iter()
            .filter_map(|name| self.get(name).map(|value| (*name, value)))
            .collect()
    }
}
