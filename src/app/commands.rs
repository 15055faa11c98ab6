//! Commands understood by the viewer context and their outcomes.

use serde::Serialize;
use std::fmt;

use crate::configuration::ConfigObject;

/// Prefix shared by all command identifiers
pub const COMMAND_PREFIX: &str = "1cConfigViewer.";

/// Identifiers of the commands, in registration order
pub const COMMAND_IDS: [&str; 7] = [
    "1cConfigViewer.showConfigTree",
    "1cConfigViewer.refreshTree",
    "1cConfigViewer.openObjectDetails",
    "1cConfigViewer.searchObjects",
    "1cConfigViewer.clearSearch",
    "1cConfigViewer.scanConfigurations",
    "1cConfigViewer.showHelp",
];

/// Project page offered by the help command
pub const PROJECT_URL: &str = "https://github.com/raschiren/1c-config-viewer";

#[derive(Debug, Clone, PartialEq)]
pub enum ViewerCommand {
    /// Reveal the tree and rebuild it
    ShowConfigTree,
    RefreshTree,
    /// Render the details page of an object
    OpenObjectDetails(ConfigObject),
    /// Search with the entered term; `None` when the prompt was cancelled
    SearchObjects(Option<String>),
    ClearSearch,
    ScanConfigurations,
    ShowHelp,
}

impl ViewerCommand {
    pub fn id(&self) -> &'static str {
        match self {
            ViewerCommand::ShowConfigTree => COMMAND_IDS[0],
            ViewerCommand::RefreshTree => COMMAND_IDS[1],
            ViewerCommand::OpenObjectDetails(_) => COMMAND_IDS[2],
            ViewerCommand::SearchObjects(_) => COMMAND_IDS[3],
            ViewerCommand::ClearSearch => COMMAND_IDS[4],
            ViewerCommand::ScanConfigurations => COMMAND_IDS[5],
            ViewerCommand::ShowHelp => COMMAND_IDS[6],
        }
    }
}

/// Actions offered by the help command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HelpChoice {
    ScanForConfigurations,
    OpenCommandPalette,
    ShowDebugInfo,
    LearnMore,
}

impl HelpChoice {
    pub const ALL: [HelpChoice; 4] = [
        HelpChoice::ScanForConfigurations,
        HelpChoice::OpenCommandPalette,
        HelpChoice::ShowDebugInfo,
        HelpChoice::LearnMore,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            HelpChoice::ScanForConfigurations => "Scan for Configurations",
            HelpChoice::OpenCommandPalette => "Open Command Palette",
            HelpChoice::ShowDebugInfo => "Show Debug Info",
            HelpChoice::LearnMore => "Learn More",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|choice| choice.label() == label)
    }
}

impl fmt::Display for HelpChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// Message shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Everything a command wants the host to show
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CommandOutcome {
    pub notices: Vec<Notice>,
    /// Choices to offer after the last notice (help command)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<HelpChoice>,
    /// Rendered details page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl CommandOutcome {
    pub fn with_notice(notice: Notice) -> Self {
        Self {
            notices: vec![notice],
            ..Default::default()
        }
    }

    pub fn push(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    pub fn extend(&mut self, notices: impl IntoIterator<Item = Notice>) {
        self.notices.extend(notices);
    }

    /// Messages in order, for assertions and plain output
    pub fn messages(&self) -> Vec<&str> {
        self.notices.iter().map(|n| n.message.as_str()).collect()
    }
}
