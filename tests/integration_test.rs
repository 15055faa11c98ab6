/*!
# Integration Tests for 1C Configuration Viewer

End-to-end scenarios over fixture workspaces built in temporary
directories: discovery, heuristic detection, search and the
configuration watcher.
*/

use onec_config_viewer::configuration::{ConfigurationWatcher, ManifestChange, NodeKind};
use onec_config_viewer::{
    discover_configurations, ConfigTreeModel, LocalWorkspace, ObjectKind, ViewerSettings,
    Workspace,
};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn manifest(name: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<MetaDataObject xmlns="http://v8.1c.ru/8.3/MDClasses" version="2.15">
  <Configuration uuid="00000000-0000-0000-0000-000000000001">
    <Properties>
      <Name>{}</Name>
    </Properties>
  </Configuration>
</MetaDataObject>"#,
        name
    )
}

fn object_xml(tag: &str, name: &str, synonym: Option<&str>) -> String {
    let synonym = synonym
        .map(|s| {
            format!(
                "<Synonym><v8:item><v8:lang>ru</v8:lang><v8:content>{}</v8:content></v8:item></Synonym>",
                s
            )
        })
        .unwrap_or_default();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<MetaDataObject xmlns="http://v8.1c.ru/8.3/MDClasses" xmlns:v8="http://v8.1c.ru/8.1/data/core">
  <{tag} uuid="uuid-{name}">
    <Properties>
      <Name>{name}</Name>
      {synonym}
    </Properties>
  </{tag}>
</MetaDataObject>"#,
        tag = tag,
        name = name,
        synonym = synonym
    )
}

/// Root/Configuration.xml, Catalogs/Foo.xml, Documents/Bar.xml ("Барр")
fn standard_workspace() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("Root");
    write(&root.join("Configuration.xml"), &manifest("Root"));
    write(&root.join("Catalogs/Foo.xml"), &object_xml("Catalog", "Foo", None));
    write(
        &root.join("Documents/Bar.xml"),
        &object_xml("Document", "Bar", Some("Барр")),
    );
    temp_dir
}

fn model_for(dir: &Path) -> ConfigTreeModel<LocalWorkspace> {
    ConfigTreeModel::new(
        LocalWorkspace::new(vec![dir.to_path_buf()]),
        &ViewerSettings::default(),
    )
}

#[test]
fn test_single_configuration_is_spliced_into_top_level() {
    let temp_dir = standard_workspace();
    let forest = discover_configurations(temp_dir.path()).unwrap();

    assert_eq!(forest.len(), 2);

    assert_eq!(forest[0].name, "Catalogs");
    assert_eq!(forest[0].kind, NodeKind::Folder);
    assert_eq!(forest[0].display_name, "Справочники");
    assert_eq!(forest[0].file_path, temp_dir.path().join("Root").join("Catalogs"));
    let foo = &forest[0].child_nodes()[0];
    assert_eq!(foo.name, "Foo");
    assert_eq!(foo.display_name, "Foo");
    assert_eq!(foo.kind, NodeKind::Object(ObjectKind::Catalog));
    assert_eq!(foo.uuid.as_deref(), Some("uuid-Foo"));

    assert_eq!(forest[1].name, "Documents");
    assert_eq!(forest[1].display_name, "Документы");
    let bar = &forest[1].child_nodes()[0];
    assert_eq!(bar.name, "Bar");
    assert_eq!(bar.display_name, "Барр");
    assert_eq!(bar.synonym.as_deref(), Some("Барр"));
}

#[test]
fn test_search_keeps_only_matching_folder() {
    let temp_dir = standard_workspace();
    let mut model = model_for(temp_dir.path());
    model.refresh();

    model.search("bar");

    let projection = model.projection();
    assert_eq!(projection.len(), 1);
    assert_eq!(projection[0].name, "Documents");
    assert_eq!(projection[0].child_count(), 1);
    assert_eq!(projection[0].child_nodes()[0].name, "Bar");
    assert_eq!(model.visible_item_count(), 1);
}

#[test]
fn test_search_by_synonym_and_folder_name() {
    let temp_dir = standard_workspace();
    let mut model = model_for(temp_dir.path());
    model.refresh();

    model.search("БАРР");
    assert_eq!(model.visible_item_count(), 1);

    // the folder itself matches, none of its children do
    model.search("справочники");
    assert_eq!(model.projection().len(), 1);
    assert_eq!(model.projection()[0].name, "Catalogs");
    assert_eq!(model.projection()[0].child_count(), 1);
}

#[test]
fn test_search_is_idempotent_and_clear_restores_forest() {
    let temp_dir = standard_workspace();
    let mut model = model_for(temp_dir.path());
    model.refresh();

    model.search("foo");
    let first = model.projection().to_vec();
    model.search("foo");
    assert_eq!(model.projection(), first.as_slice());

    model.clear_search();
    let cleared = model.projection().to_vec();
    model.search("");
    assert_eq!(model.projection(), cleared.as_slice());
    assert_eq!(cleared.as_slice(), model.forest());
}

#[test]
fn test_heuristic_detection_without_manifest() {
    let temp_dir = TempDir::new().unwrap();
    let cfg = temp_dir.path().join("dump").join("cfg");
    write(&cfg.join("Catalogs/Foo.xml"), &object_xml("Catalog", "Foo", None));
    write(&cfg.join("Documents/Bar.xml"), &object_xml("Document", "Bar", None));

    let forest = discover_configurations(temp_dir.path()).unwrap();

    assert_eq!(forest.len(), 1);
    assert_eq!(forest[0].kind, NodeKind::ConfigurationRoot);
    assert_eq!(forest[0].name, "cfg");
    assert_eq!(forest[0].display_name, "Configuration: cfg (detected)");
    assert_eq!(forest[0].file_path, cfg);
    assert_eq!(forest[0].child_count(), 2);
}

#[test]
fn test_single_folder_is_not_detected() {
    let temp_dir = TempDir::new().unwrap();
    let cfg = temp_dir.path().join("cfg");
    write(&cfg.join("Catalogs/Foo.xml"), &object_xml("Catalog", "Foo", None));

    let forest = discover_configurations(temp_dir.path()).unwrap();
    assert!(forest.is_empty());
}

#[test]
fn test_several_manifests_are_grouped() {
    let temp_dir = TempDir::new().unwrap();
    for name in ["First", "Second"] {
        let root = temp_dir.path().join(name);
        write(&root.join("Configuration.xml"), &manifest(name));
        write(&root.join("Catalogs/Foo.xml"), &object_xml("Catalog", "Foo", None));
    }

    let forest = discover_configurations(temp_dir.path()).unwrap();

    assert_eq!(forest.len(), 2);
    assert_eq!(forest[0].display_name, "Configuration: First");
    assert_eq!(forest[1].display_name, "Configuration: Second");
    assert!(forest.iter().all(|root| root.kind == NodeKind::ConfigurationRoot));
}

#[test]
fn test_empty_workspace_shows_help() {
    let temp_dir = TempDir::new().unwrap();
    let mut model = model_for(temp_dir.path());
    model.refresh();

    assert!(model.forest().is_empty());
    let roots = model.root_items();
    assert_eq!(roots.len(), 1);
    assert_eq!(roots[0].kind, NodeKind::Help);
}

#[test]
fn test_no_workspace_folders() {
    let mut model = ConfigTreeModel::new(LocalWorkspace::new(Vec::new()), &ViewerSettings::default());
    model.refresh();
    assert!(model.forest().is_empty());
}

#[test]
fn test_missing_workspace_root_is_skipped() {
    let temp_dir = standard_workspace();
    let mut model = ConfigTreeModel::new(
        LocalWorkspace::new(vec![
            temp_dir.path().to_path_buf(),
            temp_dir.path().join("gone"),
        ]),
        &ViewerSettings::default(),
    );
    model.refresh();

    let names: Vec<&str> = model.forest().iter().map(|n| n.name.as_str()).collect();
    assert_eq!(names, vec!["Catalogs", "Documents"]);
}

#[test]
fn test_switching_to_missing_root_clears_tree() {
    let temp_dir = standard_workspace();
    let mut model = model_for(temp_dir.path());
    model.refresh();
    assert_eq!(model.forest().len(), 2);

    model
        .workspace_mut()
        .set_folders(vec![temp_dir.path().join("gone")]);
    model.refresh();

    assert!(model.forest().is_empty());
    let roots = model.root_items();
    assert_eq!(roots.len(), 1);
    assert_eq!(roots[0].kind, NodeKind::Help);
}

#[test]
fn test_malformed_objects_are_skipped() {
    let temp_dir = standard_workspace();
    write(
        &temp_dir.path().join("Root/Catalogs/Broken.xml"),
        "<MetaDataObject><Catalog>",
    );
    write(
        &temp_dir.path().join("Root/Catalogs/Wrong.xml"),
        &object_xml("Document", "Wrong", None),
    );

    let forest = discover_configurations(temp_dir.path()).unwrap();
    let names: Vec<&str> = forest[0].child_nodes().iter().map(|o| o.name.as_str()).collect();
    assert_eq!(names, vec!["Foo"]);
}

#[test]
fn test_parent_lookup_and_find_object() {
    let temp_dir = standard_workspace();
    let mut model = model_for(temp_dir.path());
    model.refresh();

    let bar = model.find_object("Bar").cloned().unwrap();
    assert_eq!(model.parent_of(&bar).map(|p| p.name.as_str()), Some("Documents"));

    let by_path = model
        .find_object(&bar.file_path.display().to_string())
        .unwrap();
    assert_eq!(by_path.name, "Bar");
    assert!(model.find_object("Missing").is_none());

    let details = model.object_details(&bar).unwrap().unwrap();
    assert_eq!(details.name, "MetaDataObject");
}

#[test]
fn test_watcher_reports_changes() {
    let temp_dir = standard_workspace();
    let workspace = LocalWorkspace::new(vec![temp_dir.path().to_path_buf()]);
    let mut watcher = ConfigurationWatcher::new(&workspace, 10).unwrap();
    assert_eq!(watcher.tracked_files(), 1);
    assert_eq!(watcher.poll(&workspace).unwrap(), None);

    let other = temp_dir.path().join("Other");
    write(&other.join("Configuration.xml"), &manifest("Other"));
    assert_eq!(watcher.poll(&workspace).unwrap(), Some(ManifestChange::Created));

    fs::remove_file(other.join("Configuration.xml")).unwrap();
    assert_eq!(watcher.poll(&workspace).unwrap(), Some(ManifestChange::Deleted));
}
