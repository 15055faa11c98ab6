/*!
# Configuration Tree Model

Owns the canonical forest produced by discovery and the projection
derived from it by the current search term. Both are replaced
wholesale on every rebuild, never patched in place.

Subscribers receive [`ModelEvent`]s over a broadcast channel whenever
the visible tree has to be re-rendered.
*/

use std::path::Path;
use tokio::sync::broadcast;

use crate::configuration::{
    ConfigObject, ConfigurationDiscoverer, ObjectParser, Workspace, XmlNode,
};
use crate::core::errors::Result;
use crate::core::settings::ViewerSettings;

use super::search::filter_forest;

const EVENT_CAPACITY: usize = 16;

/// Notification sent to the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelEvent {
    /// The projection changed, re-render
    Changed,
    /// Discovery failed as a whole; carries the user-facing message
    DiscoveryFailed(String),
}

/// Canonical forest plus its search projection
pub struct ConfigTreeModel<W: Workspace> {
    workspace: W,
    discoverer: ConfigurationDiscoverer,
    forest: Vec<ConfigObject>,
    projection: Vec<ConfigObject>,
    search_term: String,
    events: broadcast::Sender<ModelEvent>,
}

impl<W: Workspace> ConfigTreeModel<W> {
    /// Creates an empty model; nothing is scanned until [`refresh`](Self::refresh)
    pub fn new(workspace: W, settings: &ViewerSettings) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            workspace,
            discoverer: ConfigurationDiscoverer::new(
                settings.discovery.clone(),
                ObjectParser::new(settings.display.synonym_language.clone()),
            ),
            forest: Vec::new(),
            projection: Vec::new(),
            search_term: String::new(),
            events,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ModelEvent> {
        self.events.subscribe()
    }

    pub fn workspace(&self) -> &W {
        &self.workspace
    }

    pub fn workspace_mut(&mut self) -> &mut W {
        &mut self.workspace
    }

    pub fn discoverer(&self) -> &ConfigurationDiscoverer {
        &self.discoverer
    }

    /// Rebuilds the forest from disk and re-applies the search term
    pub fn refresh(&mut self) {
        tracing::debug!("Refreshing configuration tree...");

        match self.discoverer.discover(&self.workspace) {
            Ok(forest) => {
                tracing::info!("Loaded {} configuration nodes", forest.len());
                self.forest = forest;
            }
            Err(e) => {
                tracing::error!("Error parsing workspace: {}", e);
                self.forest.clear();
                self.notify(ModelEvent::DiscoveryFailed(format!(
                    "Error parsing 1C configurations: {}",
                    e
                )));
            }
        }

        self.apply_filter();
        self.notify(ModelEvent::Changed);
    }

    /// Applies a search term (matched case-insensitively)
    pub fn search(&mut self, term: &str) {
        tracing::debug!("Searching for: {}", term);
        self.search_term = term.to_lowercase();
        self.apply_filter();
        self.notify(ModelEvent::Changed);
    }

    /// Drops the search term and shows the whole forest
    pub fn clear_search(&mut self) {
        tracing::debug!("Clearing search filter");
        self.search_term.clear();
        self.projection = self.forest.clone();
        self.notify(ModelEvent::Changed);
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Canonical forest as last discovered
    pub fn forest(&self) -> &[ConfigObject] {
        &self.forest
    }

    /// Current filtered view
    pub fn projection(&self) -> &[ConfigObject] {
        &self.projection
    }

    /// Children of containers plus top-level leaves of the projection
    pub fn visible_item_count(&self) -> usize {
        self.projection
            .iter()
            .map(|node| match &node.children {
                Some(children) => children.len(),
                None => 1,
            })
            .sum()
    }

    /// Top-level items to display: the projection, or the help node
    pub fn root_items(&self) -> Vec<ConfigObject> {
        if self.projection.is_empty() {
            vec![ConfigObject::help()]
        } else {
            self.projection.clone()
        }
    }

    /// Children of a displayed node
    pub fn children<'a>(&self, node: &'a ConfigObject) -> &'a [ConfigObject] {
        node.child_nodes()
    }

    /// Container of the projection holding a child named like `node`
    pub fn parent_of(&self, node: &ConfigObject) -> Option<&ConfigObject> {
        self.projection
            .iter()
            .find(|container| container.child_nodes().iter().any(|child| child.name == node.name))
    }

    /// Finds an object of the canonical forest by file path, name or
    /// display name
    pub fn find_object(&self, query: &str) -> Option<&ConfigObject> {
        let query_path = Path::new(query);
        find_in(&self.forest, &|object: &ConfigObject| {
            !object.is_container()
                && (object.file_path == query_path
                    || object.name == query
                    || object.display_name == query)
        })
    }

    /// Re-parses the backing file of `node` for the details view
    pub fn object_details(&self, node: &ConfigObject) -> Result<Option<XmlNode>> {
        ObjectParser::object_details(node)
    }

    fn apply_filter(&mut self) {
        self.projection = filter_forest(&self.forest, &self.search_term);
        tracing::debug!(
            "Filter '{}' applied, showing {} top-level nodes",
            self.search_term,
            self.projection.len()
        );
    }

    fn notify(&self, event: ModelEvent) {
        // отсутствие подписчиков не ошибка
        let _ = self.events.send(event);
    }
}

fn find_in<'a>(
    nodes: &'a [ConfigObject],
    predicate: &dyn Fn(&ConfigObject) -> bool,
) -> Option<&'a ConfigObject> {
    for node in nodes {
        if predicate(node) {
            return Some(node);
        }
        if let Some(found) = find_in(node.child_nodes(), predicate) {
            return Some(found);
        }
    }
    None
}
