/*!
# Configuration Tree

The two-level tree shown to the user: the model holding the canonical
forest and its search projection, the substring filter, and the item
presentation of individual nodes.
*/

pub mod item;
pub mod model;
pub mod search;

pub use item::{CollapsibleState, TreeAction, TreeItem};
pub use model::{ConfigTreeModel, ModelEvent};
pub use search::{filter_forest, matches_search};
