/*!
# Application Context

Session-scoped state of the viewer: one tree model, the settings it
was built with and the command registry.

Startup is split in two phases. [`ViewerContext::activate`] registers
the commands and builds an empty model without touching the disk, so
the host can dispatch commands immediately. [`ViewerContext::initialize`]
then performs the first scan and refresh.

## Использование:

```rust,ignore
let mut context = ViewerContext::activate(workspace, settings);
let startup = context.initialize();
let outcome = context.execute(ViewerCommand::SearchObjects(Some("товары".into())));
```
*/

pub mod commands;
pub mod scan;

pub use commands::{
    CommandOutcome, HelpChoice, Notice, NoticeLevel, ViewerCommand, COMMAND_IDS, PROJECT_URL,
};
pub use scan::{check_for_configurations, ScanReport};

use std::path::PathBuf;
use tokio::sync::broadcast::{self, error::TryRecvError};

use crate::configuration::{ConfigObject, ManifestChange, Workspace};
use crate::core::settings::ViewerSettings;
use crate::reports::DetailsPage;
use crate::tree::{ConfigTreeModel, ModelEvent};

/// Viewer session: model, settings and registered commands
pub struct ViewerContext<W: Workspace> {
    model: ConfigTreeModel<W>,
    settings: ViewerSettings,
    registered: Vec<&'static str>,
    events: broadcast::Receiver<ModelEvent>,
    has_config: bool,
    initialized: bool,
}

impl<W: Workspace> ViewerContext<W> {
    /// Registers all commands and creates an empty model; no I/O
    pub fn activate(workspace: W, settings: ViewerSettings) -> Self {
        let model = ConfigTreeModel::new(workspace, &settings);
        let events = model.subscribe();
        let registered = COMMAND_IDS.to_vec();

        tracing::debug!("All {} commands registered", registered.len());

        Self {
            model,
            settings,
            registered,
            events,
            has_config: false,
            initialized: false,
        }
    }

    /// First scan and refresh
    pub fn initialize(&mut self) -> CommandOutcome {
        let mut outcome = self.scan();
        self.refresh_into(&mut outcome);
        self.initialized = true;
        tracing::info!("Viewer initialized, {} visible items", self.model.visible_item_count());
        outcome
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn model(&self) -> &ConfigTreeModel<W> {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut ConfigTreeModel<W> {
        &mut self.model
    }

    pub fn settings(&self) -> &ViewerSettings {
        &self.settings
    }

    /// Whether the last scan found a configuration
    pub fn has_config(&self) -> bool {
        self.has_config
    }

    pub fn registered_commands(&self) -> &[&'static str] {
        &self.registered
    }

    pub fn is_registered(&self, id: &str) -> bool {
        self.registered.contains(&id)
    }

    /// Runs one command
    pub fn execute(&mut self, command: ViewerCommand) -> CommandOutcome {
        tracing::debug!("Executing {} command", command.id());

        match command {
            ViewerCommand::ShowConfigTree => {
                let mut outcome = CommandOutcome::default();
                self.refresh_into(&mut outcome);
                outcome
            }
            ViewerCommand::RefreshTree => {
                let mut outcome = CommandOutcome::default();
                self.refresh_into(&mut outcome);
                outcome.push(Notice::info("Configuration tree refreshed!"));
                outcome
            }
            ViewerCommand::OpenObjectDetails(object) => self.open_object_details(&object),
            ViewerCommand::SearchObjects(term) => self.search_objects(term),
            ViewerCommand::ClearSearch => {
                self.model.clear_search();
                CommandOutcome::with_notice(Notice::info("Search filter cleared!"))
            }
            ViewerCommand::ScanConfigurations => {
                let mut outcome =
                    CommandOutcome::with_notice(Notice::info("Scanning workspace for 1C configurations..."));
                outcome.extend(self.scan().notices);
                self.refresh_into(&mut outcome);
                outcome.push(Notice::info("Scan completed!"));
                outcome
            }
            ViewerCommand::ShowHelp => self.show_help(),
        }
    }

    /// Performs an action picked from the help choices
    pub fn choose_help(&mut self, choice: HelpChoice) -> CommandOutcome {
        tracing::debug!("Help choice: {}", choice);

        match choice {
            HelpChoice::ScanForConfigurations => self.execute(ViewerCommand::ScanConfigurations),
            HelpChoice::OpenCommandPalette => CommandOutcome::with_notice(Notice::info(format!(
                "Available commands:\n{}",
                self.registered
                    .iter()
                    .map(|id| format!("• {}", id))
                    .collect::<Vec<_>>()
                    .join("\n")
            ))),
            HelpChoice::ShowDebugInfo => {
                tracing::debug!("Commands: {:?}", self.registered);
                CommandOutcome::with_notice(Notice::info(self.debug_status()))
            }
            HelpChoice::LearnMore => {
                CommandOutcome::with_notice(Notice::info(format!("Learn more: {}", PROJECT_URL)))
            }
        }
    }

    /// Registered commands and visible items
    pub fn debug_status(&self) -> String {
        format!(
            "Viewer Status:\n• Registered commands: {}\n• Tree provider: Active\n• Visible items: {}",
            self.registered.len(),
            self.model.visible_item_count()
        )
    }

    /// Replaces the workspace roots and rescans
    pub fn set_workspace_folders(&mut self, folders: Vec<PathBuf>) -> CommandOutcome {
        tracing::info!("Workspace folders changed: {:?}", folders);
        self.model.workspace_mut().set_folders(folders);
        let mut outcome = self.scan();
        self.refresh_into(&mut outcome);
        outcome
    }

    /// Reacts to a manifest change reported by the watcher
    pub fn handle_manifest_change(&mut self, change: ManifestChange) -> CommandOutcome {
        tracing::debug!("Configuration.xml {:?}", change);

        let mut outcome = match change {
            ManifestChange::Changed => CommandOutcome::default(),
            ManifestChange::Created | ManifestChange::Deleted => self.scan(),
        };
        self.refresh_into(&mut outcome);
        outcome
    }

    fn scan(&mut self) -> CommandOutcome {
        let report = check_for_configurations(
            self.model.workspace(),
            self.settings.discovery.max_configuration_files,
        );
        self.has_config = report.has_config();

        let mut outcome = CommandOutcome::default();
        if let Some(notice) = report.notice(self.model.workspace().folders()) {
            outcome.push(notice);
        }
        outcome
    }

    fn refresh_into(&mut self, outcome: &mut CommandOutcome) {
        self.model.refresh();
        outcome.extend(self.drain_events());
    }

    /// Converts pending model events into notices
    fn drain_events(&mut self) -> Vec<Notice> {
        let mut notices = Vec::new();
        loop {
            match self.events.try_recv() {
                Ok(ModelEvent::DiscoveryFailed(message)) => notices.push(Notice::error(message)),
                Ok(ModelEvent::Changed) => {}
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::warn!("Skipped {} tree events", skipped);
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
        notices
    }

    fn search_objects(&mut self, term: Option<String>) -> CommandOutcome {
        let Some(term) = term else {
            return CommandOutcome::default();
        };

        let trimmed = term.trim();
        if !trimmed.is_empty() {
            self.model.search(trimmed);
            let visible = self.model.visible_item_count();
            self.drain_events();

            let notice = if visible > 0 {
                Notice::info(format!("Found {} items matching '{}'", visible, trimmed))
            } else {
                Notice::warning(format!(
                    "No items found matching '{}'. Try a different search term.",
                    trimmed
                ))
            };
            CommandOutcome::with_notice(notice)
        } else if term.is_empty() {
            self.model.clear_search();
            self.drain_events();
            CommandOutcome::with_notice(Notice::info("Search cleared"))
        } else {
            CommandOutcome::default()
        }
    }

    fn open_object_details(&self, object: &ConfigObject) -> CommandOutcome {
        let page = DetailsPage::with_config(true, self.settings.display.synonym_language.clone());

        let html = match self.model.object_details(object) {
            Ok(details) => page.render(object, details.as_ref()),
            Err(e) => {
                tracing::error!("Error loading object details: {}", e);
                page.render_error(object, &e.to_string())
            }
        };

        CommandOutcome {
            details: Some(html),
            ..Default::default()
        }
    }

    fn show_help(&self) -> CommandOutcome {
        let message = if self.model.visible_item_count() > 0 {
            "1C Configuration Viewer is active. Choose an action:"
        } else {
            "No 1C Configuration found in the workspace. What would you like to do?"
        };

        CommandOutcome {
            notices: vec![Notice::info(message)],
            choices: HelpChoice::ALL.to_vec(),
            details: None,
        }
    }
}
