/*!
# Object Details Page

Генерация автономной HTML страницы с подробностями объекта метаданных.

## Разделы страницы:
- Заголовок с иконкой типа, отображаемым и внутренним именем
- Основная информация (имя, тип, UUID, комментарий, путь к файлу)
- Основные свойства объекта (`Hierarchical`, `CodeLength`, `Posting`, ...)
- Реквизиты, формы и команды из `ChildObjects`
- Исходные данные разобранного XML в виде JSON

## Использование:

```rust,ignore
use onec_config_viewer::reports::html::DetailsPage;

let details = ObjectParser::object_details(&object)?;
let html = DetailsPage::new().render(&object, details.as_ref());
std::fs::write("details.html", html)?;
```
*/

use crate::configuration::properties::localized_items;
use crate::configuration::{ConfigObject, XmlNode};

/// HTML генератор страницы подробностей объекта
pub struct DetailsPage {
    /// Включить встроенные стили
    include_inline_css: bool,
    /// Предпочитаемый язык синонимов реквизитов и форм
    synonym_language: String,
}

impl DetailsPage {
    pub fn new() -> Self {
        Self {
            include_inline_css: true,
            synonym_language: "ru".to_string(),
        }
    }

    pub fn with_config(include_css: bool, synonym_language: impl Into<String>) -> Self {
        Self {
            include_inline_css: include_css,
            synonym_language: synonym_language.into(),
        }
    }

    /// Генерирует страницу по объекту и его разобранному XML
    /// (корень `MetaDataObject`, если файл удалось прочитать)
    pub fn render(&self, object: &ConfigObject, details: Option<&XmlNode>) -> String {
        let mut html = String::new();

        html.push_str(&self.generate_html_header(&format!("1C: {}", object.display_name)));
        if self.include_inline_css {
            html.push_str(&self.generate_css_styles());
        }
        html.push_str("</head>\n<body>\n<div class=\"container\">\n");

        html.push_str(&self.generate_object_header(object));
        html.push_str("    <main class=\"object-content\">\n");
        html.push_str(&self.generate_basic_info(object));
        html.push_str(&self.generate_properties_section(object));

        // первый дочерний элемент MetaDataObject - сам объект
        let element = details.and_then(|root| root.children.first());
        html.push_str(&self.generate_attributes_section(element));
        html.push_str(&self.generate_forms_section(element));
        html.push_str(&self.generate_commands_section(element));
        html.push_str(&self.generate_raw_data_section(details));

        html.push_str("    </main>\n");
        html.push_str(&format!(
            "    <footer>Сгенерировано: {}</footer>\n",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
        ));
        html.push_str("</div>\n</body>\n</html>\n");

        html
    }

    /// Генерирует страницу ошибки загрузки подробностей
    pub fn render_error(&self, object: &ConfigObject, error: &str) -> String {
        let mut html = self.generate_html_header("Error Loading Object");
        html.push_str(
            r#"<style>
body { font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; padding: 20px; }
.error { color: #c62828; }
</style>
</head>
<body>
"#,
        );
        html.push_str(&format!(
            r#"    <h1>Error Loading Object Details</h1>
    <p>Failed to load details for: <strong>{}</strong></p>
    <div class="error">
        <pre>{}</pre>
    </div>
</body>
</html>
"#,
            html_escape(&object.display_name),
            html_escape(error)
        ));
        html
    }

    fn generate_html_header(&self, title: &str) -> String {
        format!(
            r#"<!DOCTYPE html>
<html lang="ru">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{}</title>
"#,
            html_escape(title)
        )
    }

    fn generate_css_styles(&self) -> String {
        r#"<style>
body {
    font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
    margin: 0;
    padding: 20px;
    background-color: #f5f5f5;
    color: #333;
}

.container {
    max-width: 1000px;
    margin: 0 auto;
    background: white;
    padding: 30px;
    border-radius: 8px;
    box-shadow: 0 2px 10px rgba(0,0,0,0.1);
}

.object-header {
    margin-bottom: 24px;
    padding-bottom: 16px;
    border-bottom: 2px solid #eee;
}

.object-title { margin: 0; color: #2c3e50; }
.object-meta { color: #7f8c8d; margin-top: 6px; }
.object-name { margin-left: 8px; }

.object-icon {
    display: inline-block;
    width: 16px;
    height: 16px;
    margin-right: 8px;
    border-radius: 3px;
    background: #95a5a6;
}
.icon-catalog { background: #2980b9; }
.icon-document { background: #27ae60; }
.icon-report { background: #8e44ad; }
.icon-dataprocessor { background: #d35400; }
.icon-accumulation-register { background: #16a085; }
.icon-information-register { background: #2c3e50; }
.icon-common-module { background: #c0392b; }
.icon-common-form { background: #f39c12; }
.icon-constant { background: #7f8c8d; }
.icon-enum { background: #1abc9c; }

.info-section { margin-bottom: 24px; }
.info-section h2 { color: #34495e; font-size: 1.2em; border-bottom: 1px solid #eee; padding-bottom: 4px; }

.info-grid {
    display: grid;
    grid-template-columns: repeat(auto-fit, minmax(280px, 1fr));
    gap: 8px 24px;
}
.info-item label { font-weight: 600; margin-right: 6px; }
.uuid, .file-path { font-family: Consolas, monospace; word-break: break-all; }

.attribute-item, .form-item, .command-item {
    padding: 6px 0;
    border-bottom: 1px dashed #eee;
}
.attribute-item h3 { margin: 0; font-size: 1em; }
.attribute-type { color: #2980b9; margin-right: 8px; }
.attribute-synonym, .form-synonym, .command-synonym { color: #7f8c8d; margin-left: 6px; }

.raw-data pre {
    background: #f8f9fa;
    padding: 12px;
    border-radius: 4px;
    overflow-x: auto;
    font-size: 12px;
}

footer { color: #95a5a6; font-size: 0.85em; text-align: right; }
</style>
"#
        .to_string()
    }

    fn generate_object_header(&self, object: &ConfigObject) -> String {
        let icon_class = object
            .kind
            .object_kind()
            .map_or("icon-default", |kind| kind.css_icon_class());
        let name = if object.name != object.display_name {
            format!(r#"<span class="object-name">({})</span>"#, html_escape(&object.name))
        } else {
            String::new()
        };

        format!(
            r#"    <header class="object-header">
        <h1 class="object-title"><span class="object-icon {}"></span>{}</h1>
        <div class="object-meta"><span class="object-type">{}</span>{}</div>
    </header>
"#,
            icon_class,
            html_escape(&object.display_name),
            object.type_name(),
            name
        )
    }

    fn generate_basic_info(&self, object: &ConfigObject) -> String {
        let mut items = vec![
            info_item("Name", &html_escape(&object.name), None),
            info_item("Display Name", &html_escape(&object.display_name), None),
            info_item("Type", object.type_name(), None),
        ];
        if let Some(uuid) = &object.uuid {
            items.push(info_item("UUID", &html_escape(uuid), Some("uuid")));
        }
        if let Some(comment) = &object.comment {
            items.push(info_item("Comment", &html_escape(comment), None));
        }
        items.push(info_item(
            "File Path",
            &html_escape(&object.file_path.display().to_string()),
            Some("file-path"),
        ));

        section("Basic Information", "info-grid", &items.concat())
    }

    fn generate_properties_section(&self, object: &ConfigObject) -> String {
        let Some(properties) = &object.properties else {
            return String::new();
        };

        let items: String = properties
            .highlights()
            .into_iter()
            .map(|(name, value)| info_item(name, &html_escape(&value.to_string()), None))
            .collect();

        if items.is_empty() {
            return String::new();
        }
        section("Properties", "info-grid", &items)
    }

    fn generate_attributes_section(&self, element: Option<&XmlNode>) -> String {
        let attributes = child_objects(element, "Attribute");
        if attributes.is_empty() {
            return String::new();
        }

        let items: String = attributes
            .iter()
            .map(|attribute| {
                let name = attribute
                    .descendant(&["Properties", "Name"])
                    .and_then(XmlNode::text)
                    .unwrap_or("Unnamed");
                let type_name = attribute
                    .descendant(&["Properties", "Type"])
                    .map(|node| {
                        let types: Vec<&str> =
                            node.children.iter().filter_map(XmlNode::text).collect();
                        types.join(", ")
                    })
                    .filter(|types| !types.is_empty())
                    .unwrap_or_else(|| "Unknown".to_string());
                let synonym = self
                    .synonym_of(attribute)
                    .map(|s| format!(r#"<span class="attribute-synonym">{}</span>"#, html_escape(&s)))
                    .unwrap_or_default();

                format!(
                    r#"            <div class="attribute-item">
                <h3>{}</h3>
                <div class="attribute-details"><span class="attribute-type">{}</span>{}</div>
            </div>
"#,
                    html_escape(name),
                    html_escape(&type_name),
                    synonym
                )
            })
            .collect();

        section("Attributes", "attributes-list", &items)
    }

    fn generate_forms_section(&self, element: Option<&XmlNode>) -> String {
        self.generate_named_list(element, "Form", "Forms", "form", "Unnamed Form")
    }

    fn generate_commands_section(&self, element: Option<&XmlNode>) -> String {
        self.generate_named_list(element, "Command", "Commands", "command", "Unnamed Command")
    }

    fn generate_named_list(
        &self,
        element: Option<&XmlNode>,
        child_name: &str,
        title: &str,
        class: &str,
        unnamed: &str,
    ) -> String {
        let nodes = child_objects(element, child_name);
        if nodes.is_empty() {
            return String::new();
        }

        let items: String = nodes
            .iter()
            .map(|node| {
                // формы в выгрузке бывают перечислены просто именем
                let name = node
                    .descendant(&["Properties", "Name"])
                    .and_then(XmlNode::text)
                    .or_else(|| node.text())
                    .unwrap_or(unnamed);
                let synonym = self
                    .synonym_of(node)
                    .map(|s| format!(r#"<span class="{}-synonym">({})</span>"#, class, html_escape(&s)))
                    .unwrap_or_default();
                format!(
                    "            <div class=\"{0}-item\"><span class=\"{0}-name\">{1}</span>{2}</div>\n",
                    class,
                    html_escape(name),
                    synonym
                )
            })
            .collect();

        section(title, &format!("{}s-list", class), &items)
    }

    fn generate_raw_data_section(&self, details: Option<&XmlNode>) -> String {
        let json = details.map_or(serde_json::Value::Null, XmlNode::to_named_json);
        let pretty = serde_json::to_string_pretty(&json).unwrap_or_else(|_| "null".to_string());

        format!(
            r#"        <section class="info-section collapsible">
            <h2>Raw Data</h2>
            <div class="raw-data">
                <pre><code>{}</code></pre>
            </div>
        </section>
"#,
            html_escape(&pretty)
        )
    }

    /// Синоним вложенного объекта на предпочитаемом языке
    fn synonym_of(&self, node: &XmlNode) -> Option<String> {
        let synonym = node.descendant(&["Properties", "Synonym"])?;
        let items = localized_items(synonym);
        items
            .iter()
            .find(|item| item.lang == self.synonym_language)
            .or_else(|| items.first())
            .map(|item| item.content.clone())
            .filter(|content| !content.is_empty())
    }
}

impl Default for DetailsPage {
    fn default() -> Self {
        Self::new()
    }
}

fn child_objects<'a>(element: Option<&'a XmlNode>, name: &'a str) -> Vec<&'a XmlNode> {
    element
        .and_then(|node| node.child("ChildObjects"))
        .map(|children| children.children_named(name).collect())
        .unwrap_or_default()
}

fn info_item(label: &str, value: &str, class: Option<&str>) -> String {
    let class = class.map(|c| format!(" class=\"{}\"", c)).unwrap_or_default();
    format!(
        "            <div class=\"info-item\"><label>{}:</label><span{}>{}</span></div>\n",
        label, class, value
    )
}

fn section(title: &str, body_class: &str, body: &str) -> String {
    format!(
        r#"        <section class="info-section">
            <h2>{}</h2>
            <div class="{}">
{}            </div>
        </section>
"#,
        title, body_class, body
    )
}

/// Экранирует HTML спецсимволы
pub fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configuration::{NodeKind, ObjectKind, ObjectProperties};
    use std::path::PathBuf;

    const CATALOG_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<MetaDataObject xmlns:v8="http://v8.1c.ru/8.1/data/core">
    <Catalog uuid="0a1b">
        <Properties>
            <Name>Goods</Name>
            <Hierarchical>true</Hierarchical>
            <CodeLength>9</CodeLength>
        </Properties>
        <ChildObjects>
            <Attribute>
                <Properties>
                    <Name>Article</Name>
                    <Synonym>
                        <v8:item><v8:lang>ru</v8:lang><v8:content>Артикул</v8:content></v8:item>
                    </Synonym>
                    <Type><v8:Type>xs:string</v8:Type></Type>
                </Properties>
            </Attribute>
            <Form>ItemForm</Form>
            <Command>
                <Properties><Name>Print</Name></Properties>
            </Command>
        </ChildObjects>
    </Catalog>
</MetaDataObject>"#;

    fn goods() -> (ConfigObject, XmlNode) {
        let root = XmlNode::parse_document(CATALOG_XML).unwrap();
        let properties = root.descendant(&["Catalog", "Properties"]).unwrap();
        let object = ConfigObject {
            name: "Goods".to_string(),
            kind: NodeKind::Object(ObjectKind::Catalog),
            display_name: "Товары <опт>".to_string(),
            file_path: PathBuf::from("/cfg/Catalogs/Goods.xml"),
            uuid: Some("0a1b".to_string()),
            synonym: Some("Товары <опт>".to_string()),
            comment: None,
            properties: Some(ObjectProperties::from_element(ObjectKind::Catalog, properties)),
            children: None,
        };
        (object, root)
    }

    #[test]
    fn test_details_page_sections() {
        let (object, root) = goods();
        let html = DetailsPage::new().render(&object, Some(&root));

        assert!(html.contains("<title>1C: Товары &lt;опт&gt;</title>"));
        assert!(html.contains("icon-catalog"));
        assert!(html.contains(r#"<span class="object-name">(Goods)</span>"#));
        assert!(html.contains("<h2>Basic Information</h2>"));
        assert!(html.contains("<label>Hierarchical:</label><span>Yes</span>"));
        assert!(html.contains("<label>CodeLength:</label><span>9</span>"));
        assert!(html.contains("<h3>Article</h3>"));
        assert!(html.contains("xs:string"));
        assert!(html.contains("Артикул"));
        assert!(html.contains(r#"<span class="form-name">ItemForm</span>"#));
        assert!(html.contains(r#"<span class="command-name">Print</span>"#));
        assert!(html.contains("Raw Data"));
        assert!(html.contains("&quot;MetaDataObject&quot;"));
        assert!(!html.contains("<опт>"));
    }

    #[test]
    fn test_details_page_without_details() {
        let (object, _) = goods();
        let html = DetailsPage::new().render(&object, None);

        assert!(!html.contains("<h2>Attributes</h2>"));
        assert!(!html.contains("<h2>Forms</h2>"));
        assert!(html.contains("<code>null</code>"));
    }

    #[test]
    fn test_error_page() {
        let (object, _) = goods();
        let html = DetailsPage::new().render_error(&object, "file <missing>");

        assert!(html.contains("Error Loading Object Details"));
        assert!(html.contains("file &lt;missing&gt;"));
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("a & <b> \"c\" 'd'"), "a &amp; &lt;b&gt; &quot;c&quot; &#39;d&#39;");
        assert_eq!(html_escape("normal text"), "normal text");
    }
}
