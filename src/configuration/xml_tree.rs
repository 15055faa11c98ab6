/*!
# Generic XML Tree

Small DOM built on top of `quick-xml` events. Metadata files are tiny,
so the whole document is materialized; lookups then walk the tree by
qualified element names (`Properties`, `v8:item`, ...).

The tree can be converted to JSON for the raw data section of the
details page.
*/

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One XML element with its attributes, text and child elements
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct XmlNode {
    /// Qualified element name as written in the document (`v8:item`)
    pub name: String,
    pub attributes: Vec<(String, String)>,
    /// Concatenated text content, `None` for elements without text
    pub text: Option<String>,
    pub children: Vec<XmlNode>,
}

impl XmlNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Parses a document and returns its root element
    pub fn parse_document(content: &str) -> Result<XmlNode, String> {
        let mut reader = Reader::from_str(content);
        reader.trim_text(true);

        let mut buf = Vec::new();
        let mut stack: Vec<XmlNode> = Vec::new();
        let mut root: Option<XmlNode> = None;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => {
                    stack.push(Self::from_start(e)?);
                }
                Ok(Event::Empty(ref e)) => {
                    let node = Self::from_start(e)?;
                    Self::attach(node, &mut stack, &mut root)?;
                }
                Ok(Event::End(_)) => {
                    let node = stack
                        .pop()
                        .ok_or_else(|| "unexpected closing tag".to_string())?;
                    Self::attach(node, &mut stack, &mut root)?;
                }
                Ok(Event::Text(e)) => {
                    let text = e.unescape().map_err(|e| e.to_string())?;
                    if let Some(current) = stack.last_mut() {
                        current.push_text(&text);
                    }
                }
                Ok(Event::CData(e)) => {
                    let raw = e.into_inner();
                    if let Some(current) = stack.last_mut() {
                        current.push_text(&String::from_utf8_lossy(&raw));
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(format!(
                        "error at position {}: {}",
                        reader.buffer_position(),
                        e
                    ))
                }
                _ => {}
            }
            buf.clear();
        }

        if !stack.is_empty() {
            return Err("unexpected end of document".to_string());
        }
        root.ok_or_else(|| "document has no root element".to_string())
    }

    fn from_start(e: &BytesStart<'_>) -> Result<XmlNode, String> {
        let mut node = XmlNode::new(String::from_utf8_lossy(e.name().as_ref()).to_string());
        for attr in e.attributes() {
            let attr = attr.map_err(|e| e.to_string())?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
            let value = attr.unescape_value().map_err(|e| e.to_string())?.to_string();
            node.attributes.push((key, value));
        }
        Ok(node)
    }

    fn attach(
        node: XmlNode,
        stack: &mut [XmlNode],
        root: &mut Option<XmlNode>,
    ) -> Result<(), String> {
        match stack.last_mut() {
            Some(parent) => {
                parent.children.push(node);
                Ok(())
            }
            None if root.is_none() => {
                *root = Some(node);
                Ok(())
            }
            None => Err("document has more than one root element".to_string()),
        }
    }

    fn push_text(&mut self, text: &str) {
        match &mut self.text {
            Some(existing) => existing.push_str(text),
            None => self.text = Some(text.to_string()),
        }
    }

    /// Element name without namespace prefix
    pub fn local_name(&self) -> &str {
        self.name.rsplit(':').next().unwrap_or(&self.name)
    }

    /// First child element with the given qualified name
    pub fn child(&self, name: &str) -> Option<&XmlNode> {
        self.children.iter().find(|c| c.name == name)
    }

    /// All child elements with the given qualified name
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlNode> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Follows a chain of child names (`["Properties", "Name"]`)
    pub fn descendant(&self, path: &[&str]) -> Option<&XmlNode> {
        path.iter().try_fold(self, |node, name| node.child(name))
    }

    /// Attribute value by qualified name
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Non-empty text of the element
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref().filter(|t| !t.is_empty())
    }

    /// Non-empty text of the first child with the given name
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).and_then(XmlNode::text)
    }

    /// `true` for an element carrying nothing but (optional) text
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty() && self.attributes.is_empty()
    }

    /// Converts the element content to JSON.
    ///
    /// Leaf elements become scalars, attributes are prefixed with `@_`,
    /// text next to child elements is stored under `#text`, and repeated
    /// child names are collected into arrays.
    pub fn to_json(&self) -> Value {
        if self.is_leaf() {
            return self.text.as_deref().map(parse_scalar).unwrap_or(Value::String(String::new()));
        }

        let mut map = Map::new();
        for (key, value) in &self.attributes {
            map.insert(format!("@_{}", key), parse_scalar(value));
        }
        for child in &self.children {
            let value = child.to_json();
            match map.get_mut(&child.name) {
                // значения дочерних элементов никогда не бывают массивами
                Some(Value::Array(items)) => items.push(value),
                Some(existing) => {
                    let previous = existing.take();
                    *existing = Value::Array(vec![previous, value]);
                }
                None => {
                    map.insert(child.name.clone(), value);
                }
            }
        }
        if let Some(text) = self.text() {
            map.insert("#text".to_string(), parse_scalar(text));
        }
        Value::Object(map)
    }

    /// Wraps the element in an object keyed by its name
    pub fn to_named_json(&self) -> Value {
        let mut map = Map::new();
        map.insert(self.name.clone(), self.to_json());
        Value::Object(map)
    }
}

/// Interprets element text the way metadata values are written:
/// booleans, integers, decimals; everything else stays a string.
pub fn parse_scalar(text: &str) -> Value {
    match text {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }

    // коды с ведущими нулями ("007") остаются строками
    let digits = text.strip_prefix('-').unwrap_or(text);
    let leading_zero = digits.len() > 1 && digits.starts_with('0') && !digits.starts_with("0.");
    if !leading_zero && !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit() || c == '.') {
        if let Ok(int) = text.parse::<i64>() {
            return Value::from(int);
        }
        if let Ok(float) = text.parse::<f64>() {
            if let Some(number) = serde_json::Number::from_f64(float) {
                return Value::Number(number);
            }
        }
    }
    Value::String(text.to_string())
}
