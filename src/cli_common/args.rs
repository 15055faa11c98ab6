//! Общие аргументы командной строки

use clap::Parser;
use std::path::PathBuf;

use crate::reports::ReportFormat;

/// Общие аргументы для всех команд
#[derive(Parser, Debug, Clone)]
pub struct CommonArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output format (text, json)
    #[arg(long, global = true, default_value = "text")]
    pub format: ReportFormat,

    /// Settings file (defaults to .onec-viewer.toml or the user settings)
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,
}

/// Корни рабочей области
#[derive(Parser, Debug, Clone)]
pub struct WorkspaceArgs {
    /// Workspace folders (current directory if omitted)
    pub paths: Vec<PathBuf>,
}

/// Аргументы для работы с выводом
#[derive(Parser, Debug, Clone)]
pub struct OutputArgs {
    /// Output file path (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl CommonArgs {
    /// Определяет уровень логирования на основе флагов
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        }
    }

    /// Проверяет, нужно ли выводить информацию
    pub fn should_print(&self) -> bool {
        !self.quiet
    }
}
