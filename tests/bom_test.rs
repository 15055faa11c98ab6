/*!
Tests for encoding handling of metadata XML files
*/

use onec_config_viewer::{ObjectKind, ObjectParser};
use std::fs;
use tempfile::TempDir;

const CATALOG: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<MetaDataObject xmlns:v8="http://v8.1c.ru/8.1/data/core">
  <Catalog uuid="bom-1">
    <Properties>
      <Name>Номенклатура</Name>
      <Synonym>
        <v8:item><v8:lang>ru</v8:lang><v8:content>Номенклатура товаров</v8:content></v8:item>
      </Synonym>
    </Properties>
  </Catalog>
</MetaDataObject>"#;

#[test]
fn test_utf8_bom_file_is_parsed() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("Номенклатура.xml");

    let mut bytes = vec![0xEF, 0xBB, 0xBF];
    bytes.extend_from_slice(CATALOG.as_bytes());
    fs::write(&path, bytes).unwrap();

    let object = ObjectParser::default()
        .parse_object_file(&path, ObjectKind::Catalog)
        .unwrap();

    assert_eq!(object.name, "Номенклатура");
    assert_eq!(object.display_name, "Номенклатура товаров");
    assert_eq!(object.uuid.as_deref(), Some("bom-1"));
}

#[test]
fn test_utf16_file_is_parsed() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("Goods.xml");

    let mut bytes = vec![0xFF, 0xFE];
    for unit in CATALOG.encode_utf16() {
        bytes.extend_from_slice(&unit.to_le_bytes());
    }
    fs::write(&path, bytes).unwrap();

    let object = ObjectParser::default()
        .parse_object_file(&path, ObjectKind::Catalog)
        .unwrap();

    assert_eq!(object.name, "Номенклатура");
}
