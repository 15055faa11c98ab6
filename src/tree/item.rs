//! Presentation of forest nodes as tree items.

use serde::Serialize;
use std::path::PathBuf;

use crate::configuration::{ConfigObject, NodeKind};

/// Command id the help node triggers
pub const SHOW_HELP_COMMAND: &str = "1cConfigViewer.showHelp";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CollapsibleState {
    None,
    Collapsed,
    Expanded,
}

/// What activating an item does
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "target", rename_all = "camelCase")]
pub enum TreeAction {
    OpenFile(PathBuf),
    ShowHelp,
}

/// Renderable view of one [`ConfigObject`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeItem {
    pub label: String,
    pub tooltip: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub context_value: &'static str,
    pub icon: &'static str,
    pub collapsible_state: CollapsibleState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<TreeAction>,
}

impl TreeItem {
    pub fn new(object: &ConfigObject, collapsible_state: CollapsibleState) -> Self {
        Self {
            label: object.display_name.clone(),
            tooltip: tooltip(object),
            description: description(object),
            context_value: context_value(object.kind),
            icon: icon(object.kind),
            collapsible_state,
            action: action(object),
        }
    }

    /// Item for a top-level node: collapsed when it has children
    pub fn root(object: &ConfigObject) -> Self {
        let state = if object.child_count() > 0 {
            CollapsibleState::Collapsed
        } else {
            CollapsibleState::None
        };
        Self::new(object, state)
    }

    /// Item for a second-level node; the tree never goes deeper
    pub fn child(object: &ConfigObject) -> Self {
        Self::new(object, CollapsibleState::None)
    }
}

fn tooltip(object: &ConfigObject) -> String {
    let mut tooltip = format!("{} ({})", object.display_name, object.type_name());
    if let Some(comment) = object.comment.as_deref().filter(|c| !c.is_empty()) {
        tooltip.push('\n');
        tooltip.push_str(comment);
    }
    if let Some(uuid) = object.uuid.as_deref().filter(|u| !u.is_empty()) {
        tooltip.push_str("\nUUID: ");
        tooltip.push_str(uuid);
    }
    tooltip
}

fn description(object: &ConfigObject) -> Option<String> {
    match object.kind {
        NodeKind::Folder => {
            let count = object.child_count();
            (count > 0).then(|| format!("({})", count))
        }
        _ => (object.name != object.display_name).then(|| object.name.clone()),
    }
}

fn context_value(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::Folder | NodeKind::ConfigurationRoot => "folder",
        NodeKind::Help => "help",
        NodeKind::Object(_) => "object",
    }
}

fn icon(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::Folder => "folder",
        NodeKind::ConfigurationRoot => "folder-library",
        NodeKind::Help => "info",
        NodeKind::Object(kind) => kind.item_icon(),
    }
}

fn action(object: &ConfigObject) -> Option<TreeAction> {
    match object.kind {
        NodeKind::Help => Some(TreeAction::ShowHelp),
        NodeKind::Folder => None,
        _ if object.has_file() => Some(TreeAction::OpenFile(object.file_path.clone())),
        _ => None,
    }
}
