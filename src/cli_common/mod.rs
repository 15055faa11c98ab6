//! Общий модуль для CLI
//!
//! Содержит функциональность, используемую командами бинарника:
//! - Инициализация логирования
//! - Вывод уведомлений
//! - Разбор путей рабочей области

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use crate::app::{Notice, NoticeLevel};

pub mod args;
pub mod output;

pub use args::{CommonArgs, OutputArgs, WorkspaceArgs};
pub use output::OutputWriter;

/// Инициализирует систему логирования; `RUST_LOG` имеет приоритет
pub fn init_logging(level: tracing::Level) -> Result<()> {
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Выводит успешное завершение операции
pub fn print_success(message: &str) {
    println!("{} {}", "✅".green(), message.green());
}

/// Выводит предупреждение
pub fn print_warning(message: &str) {
    println!("{} {}", "⚠️".yellow(), message.yellow());
}

/// Выводит ошибку
pub fn print_error(message: &str) {
    eprintln!("{} {}", "❌".red(), message.red());
}

/// Выводит информационное сообщение
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ️".blue(), message);
}

/// Выводит уведомление с учетом уровня
pub fn print_notice(notice: &Notice) {
    match notice.level {
        NoticeLevel::Info => print_info(&notice.message),
        NoticeLevel::Warning => print_warning(&notice.message),
        NoticeLevel::Error => print_error(&notice.message),
    }
}

/// Проверяет существование файла или директории
pub fn validate_path(path: &Path, description: &str) -> Result<()> {
    if !path.exists() {
        return Err(anyhow::anyhow!(
            "{} does not exist: {}",
            description,
            path.display()
        ));
    }
    Ok(())
}

/// Создает директорию если она не существует
pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory: {}", path.display()))?;
    }
    Ok(())
}

/// Корни рабочей области: переданные пути или текущая директория
pub fn resolve_workspace_folders(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    if paths.is_empty() {
        let current = std::env::current_dir().context("Failed to determine current directory")?;
        return Ok(vec![current]);
    }

    paths
        .iter()
        .map(|path| {
            validate_path(path, "Workspace folder")?;
            path.canonicalize()
                .with_context(|| format!("Failed to resolve path: {}", path.display()))
        })
        .collect()
}
