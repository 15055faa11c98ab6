//! Substring filtering of the configuration forest.

use crate::configuration::ConfigObject;

/// Case-insensitive substring match against the searchable fields:
/// display name, name, type, synonym and comment.
///
/// `term` must already be lower-cased.
pub fn matches_search(object: &ConfigObject, term: &str) -> bool {
    let contains = |value: &str| value.to_lowercase().contains(term);

    contains(&object.display_name)
        || contains(&object.name)
        || contains(object.type_name())
        || object.synonym.as_deref().map_or(false, contains)
        || object.comment.as_deref().map_or(false, contains)
}

/// Builds the projection of `forest` for a lower-cased `term`.
///
/// Containers keep only their matching children; a container without
/// matching children survives whole if it matches itself. Leaves at the
/// top level survive only if they match. An empty term keeps everything.
pub fn filter_forest(forest: &[ConfigObject], term: &str) -> Vec<ConfigObject> {
    if term.is_empty() {
        return forest.to_vec();
    }

    forest
        .iter()
        .filter_map(|node| match &node.children {
            None => matches_search(node, term).then(|| node.clone()),
            Some(children) => {
                let matching: Vec<ConfigObject> = children
                    .iter()
                    .filter(|child| matches_search(child, term))
                    .cloned()
                    .collect();

                if !matching.is_empty() {
                    let mut kept = node.clone();
                    kept.children = Some(matching);
                    Some(kept)
                } else if matches_search(node, term) {
                    Some(node.clone())
                } else {
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configuration::{NodeKind, ObjectKind};
    use std::path::{Path, PathBuf};

    fn leaf(name: &str, display: &str, kind: ObjectKind) -> ConfigObject {
        ConfigObject {
            name: name.to_string(),
            kind: NodeKind::Object(kind),
            display_name: display.to_string(),
            file_path: PathBuf::from(format!("/cfg/{}.xml", name)),
            uuid: None,
            synonym: Some(display.to_string()),
            comment: None,
            properties: None,
            children: None,
        }
    }

    #[test]
    fn test_matches_each_field() {
        let mut object = leaf("Номенклатура", "Товары", ObjectKind::Catalog);
        object.comment = Some("Справочник склада".to_string());

        assert!(matches_search(&object, "номенк"));
        assert!(matches_search(&object, "товар"));
        assert!(matches_search(&object, "catalog"));
        assert!(matches_search(&object, "склад"));
        assert!(!matches_search(&object, "документ"));
    }

    #[test]
    fn test_folder_matching_itself_keeps_all_children() {
        let folder = ConfigObject::folder(
            "Catalogs",
            Path::new("/cfg/Catalogs"),
            vec![
                leaf("A", "Альфа", ObjectKind::Catalog),
                leaf("B", "Бета", ObjectKind::Catalog),
            ],
        );
        // "справочник" совпадает только с локализованным именем папки
        let projection = filter_forest(&[folder.clone()], "справочник");
        assert_eq!(projection, vec![folder]);
    }

    #[test]
    fn test_top_level_leaf_kept_only_if_matching() {
        let forest = vec![leaf("Константа1", "Ставка НДС", ObjectKind::Constant)];
        assert_eq!(filter_forest(&forest, "ндс").len(), 1);
        assert!(filter_forest(&forest, "курс").is_empty());
    }
}
