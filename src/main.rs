/*!
# 1C Configuration Viewer CLI

Command-line host for the configuration viewer: scans workspace
folders for 1C:Enterprise configuration dumps, prints the object
tree, searches it and renders object details.
*/

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::json;
use std::path::{Path, PathBuf};
use std::time::Duration;

use onec_config_viewer::app::{CommandOutcome, NoticeLevel, ViewerCommand, ViewerContext};
use onec_config_viewer::cli_common::{
    self, print_notice, print_success, resolve_workspace_folders, CommonArgs, OutputArgs,
    OutputWriter, WorkspaceArgs,
};
use onec_config_viewer::configuration::{ConfigurationWatcher, LocalWorkspace};
use onec_config_viewer::core::settings::WORKSPACE_SETTINGS_FILE;
use onec_config_viewer::core::{ViewerError, ViewerSettings};
use onec_config_viewer::reports::{ReportFormat, ReportManager};

#[derive(Parser)]
#[command(
    name = "onec-config-viewer",
    version = env!("CARGO_PKG_VERSION"),
    about = "Browse 1C:Enterprise configuration dumps as an object tree"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[clap(flatten)]
    common: CommonArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the configuration tree
    Tree {
        #[clap(flatten)]
        workspace: WorkspaceArgs,
    },

    /// Filter the tree by a search term
    Search {
        /// Substring matched against names, synonyms, types and comments
        term: String,

        #[clap(flatten)]
        workspace: WorkspaceArgs,
    },

    /// Render the details page of an object
    Show {
        /// Object name, display name or file path
        target: String,

        #[clap(flatten)]
        workspace: WorkspaceArgs,

        #[clap(flatten)]
        output: OutputArgs,
    },

    /// Scan the workspace for configurations
    Scan {
        #[clap(flatten)]
        workspace: WorkspaceArgs,
    },

    /// Re-render the tree whenever a Configuration.xml changes
    Watch {
        #[clap(flatten)]
        workspace: WorkspaceArgs,

        /// Poll interval in milliseconds (overrides settings)
        #[arg(long)]
        interval_ms: Option<u64>,
    },

    /// Write the default settings file
    InitSettings {
        #[clap(flatten)]
        output: OutputArgs,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    cli_common::init_logging(cli.common.log_level())?;

    match cli.command {
        Commands::Tree { workspace } => tree_command(&cli.common, &workspace.paths),
        Commands::Search { term, workspace } => search_command(&cli.common, &term, &workspace.paths),
        Commands::Show {
            target,
            workspace,
            output,
        } => show_command(&cli.common, &target, &workspace.paths, output.output.as_deref()),
        Commands::Scan { workspace } => scan_command(&cli.common, &workspace.paths),
        Commands::Watch {
            workspace,
            interval_ms,
        } => watch_command(&cli.common, &workspace.paths, interval_ms).await,
        Commands::InitSettings { output } => init_settings_command(output.output),
    }
}

fn build_context(common: &CommonArgs, paths: &[PathBuf]) -> Result<ViewerContext<LocalWorkspace>> {
    let folders = resolve_workspace_folders(paths)?;
    let settings = ViewerSettings::resolve(common.settings.as_deref(), &folders)
        .context("Failed to load settings")?;
    let workspace =
        LocalWorkspace::new(folders).with_exclude_dirs(settings.discovery.exclude_dirs.clone());

    Ok(ViewerContext::activate(workspace, settings))
}

/// Первичное сканирование со спиннером в текстовом режиме
fn initialize(common: &CommonArgs, context: &mut ViewerContext<LocalWorkspace>) -> Result<CommandOutcome> {
    let show_spinner = common.should_print() && common.format == ReportFormat::Text;
    let pb = if show_spinner {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .context("Failed to set progress style")?,
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message("Scanning workspace for 1C configurations...");
        Some(pb)
    } else {
        None
    };

    let outcome = context.initialize();

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }
    Ok(outcome)
}

fn print_outcome(common: &CommonArgs, outcome: &CommandOutcome) {
    for notice in &outcome.notices {
        if common.should_print() || notice.level == NoticeLevel::Error {
            print_notice(notice);
        }
    }
}

fn render_tree(common: &CommonArgs, context: &ViewerContext<LocalWorkspace>) -> Result<()> {
    let model = context.model();
    let manager = ReportManager::new();
    let mut writer = OutputWriter::stdout(common.format);

    match common.format {
        ReportFormat::Text => {
            writer.write_raw(&manager.render_tree(&model.root_items(), ReportFormat::Text)?)?;
            writer.write_line(
                &manager
                    .renderer()
                    .render_summary(model.visible_item_count(), model.search_term()),
            )?;
        }
        ReportFormat::Json => {
            writer.write_object(&json!({
                "searchTerm": model.search_term(),
                "visibleItems": model.visible_item_count(),
                "items": model.projection(),
            }))?;
        }
    }
    writer.flush()
}

fn tree_command(common: &CommonArgs, paths: &[PathBuf]) -> Result<()> {
    let mut context = build_context(common, paths)?;
    let outcome = initialize(common, &mut context)?;
    if common.format == ReportFormat::Text {
        print_outcome(common, &outcome);
    }
    render_tree(common, &context)
}

fn search_command(common: &CommonArgs, term: &str, paths: &[PathBuf]) -> Result<()> {
    let mut context = build_context(common, paths)?;
    initialize(common, &mut context)?;

    let outcome = context.execute(ViewerCommand::SearchObjects(Some(term.to_string())));
    render_tree(common, &context)?;
    if common.format == ReportFormat::Text {
        print_outcome(common, &outcome);
    }
    Ok(())
}

fn show_command(
    common: &CommonArgs,
    target: &str,
    paths: &[PathBuf],
    output: Option<&Path>,
) -> Result<()> {
    let mut context = build_context(common, paths)?;
    initialize(common, &mut context)?;

    let object = context
        .model()
        .find_object(target)
        .cloned()
        .ok_or_else(|| ViewerError::ObjectNotFound(target.to_string()))?;

    if common.format == ReportFormat::Json {
        let mut writer = OutputWriter::stdout(ReportFormat::Json);
        writer.write_object(&object)?;
        return writer.flush();
    }

    let outcome = context.execute(ViewerCommand::OpenObjectDetails(object));
    let html = outcome.details.unwrap_or_default();

    match output {
        Some(path) => {
            ReportManager::new().save_report(&html, path)?;
            if common.should_print() {
                print_success(&format!("Details written to {}", path.display()));
            }
        }
        None => {
            let mut writer = OutputWriter::stdout(ReportFormat::Text);
            writer.write_raw(&html)?;
            writer.flush()?;
        }
    }
    Ok(())
}

fn scan_command(common: &CommonArgs, paths: &[PathBuf]) -> Result<()> {
    let mut context = build_context(common, paths)?;
    let outcome = context.execute(ViewerCommand::ScanConfigurations);

    match common.format {
        ReportFormat::Text => print_outcome(common, &outcome),
        ReportFormat::Json => {
            let mut writer = OutputWriter::stdout(ReportFormat::Json);
            writer.write_object(&json!({
                "hasConfig": context.has_config(),
                "visibleItems": context.model().visible_item_count(),
                "notices": outcome.notices,
            }))?;
            writer.flush()?;
        }
    }
    Ok(())
}

async fn watch_command(common: &CommonArgs, paths: &[PathBuf], interval_ms: Option<u64>) -> Result<()> {
    let term = Term::stdout();
    let mut context = build_context(common, paths)?;
    let outcome = initialize(common, &mut context)?;
    print_outcome(common, &outcome);
    render_tree(common, &context)?;

    let interval_ms = interval_ms.unwrap_or(context.settings().watch.poll_interval_ms);
    let mut watcher = ConfigurationWatcher::new(
        context.model().workspace(),
        context.settings().discovery.max_configuration_files,
    )?;
    tracing::info!(
        "Watching {} configuration files every {}ms",
        watcher.tracked_files(),
        interval_ms
    );

    if common.should_print() && common.format == ReportFormat::Text {
        term.write_line(&format!(
            "{} {}",
            style("👀").cyan(),
            style("Watching for Configuration.xml changes (Ctrl+C to stop)").dim()
        ))?;
    }

    let mut ticker = tokio::time::interval(Duration::from_millis(interval_ms.max(1)));
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let change = match watcher.poll(context.model().workspace()) {
                    Ok(change) => change,
                    Err(e) => {
                        tracing::warn!("Watch poll failed: {}", e);
                        continue;
                    }
                };
                if let Some(change) = change {
                    let outcome = context.handle_manifest_change(change);
                    if common.format == ReportFormat::Text && common.should_print() {
                        let _ = term.clear_screen();
                    }
                    print_outcome(common, &outcome);
                    render_tree(common, &context)?;
                }
            }
            _ = &mut ctrl_c => {
                tracing::info!("Watch stopped");
                break;
            }
        }
    }
    Ok(())
}

fn init_settings_command(output: Option<PathBuf>) -> Result<()> {
    let path = output.unwrap_or_else(|| PathBuf::from(WORKSPACE_SETTINGS_FILE));
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        cli_common::ensure_dir_exists(parent)?;
    }

    let content = ViewerSettings::default().to_toml_string()?;
    std::fs::write(&path, content)
        .with_context(|| format!("Failed to write settings: {}", path.display()))?;

    print_success(&format!(
        "Settings created: {}",
        style(path.display()).green()
    ));
    Ok(())
}
