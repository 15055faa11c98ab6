/*!
# Reports Module

Представление дерева конфигурации и подробностей объектов для вывода.

## Поддерживаемые форматы:
- **Text** - цветное дерево для консоли
- **JSON** - сериализованный лес объектов для интеграции
- **HTML** - страница подробностей объекта

## Использование:

```rust,ignore
use onec_config_viewer::reports::{ReportFormat, ReportManager};

let manager = ReportManager::new();
let output = manager.render_tree(&model.root_items(), ReportFormat::Text)?;
println!("{}", output);
```
*/

pub mod html;
pub mod text;

pub use html::{html_escape, DetailsPage};
pub use text::TreeRenderer;

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::configuration::ConfigObject;
use crate::core::errors::{Result, ViewerError};

/// Формат вывода дерева
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Текстовое дерево для консоли
    #[default]
    Text,
    /// JSON для интеграции
    Json,
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            _ => Err(format!("Unknown report format: {}", s)),
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Text => write!(f, "text"),
            ReportFormat::Json => write!(f, "json"),
        }
    }
}

/// Менеджер отчетов: выбирает рендерер по формату
pub struct ReportManager {
    renderer: TreeRenderer,
}

impl ReportManager {
    pub fn new() -> Self {
        Self {
            renderer: TreeRenderer::new(),
        }
    }

    pub fn with_renderer(renderer: TreeRenderer) -> Self {
        Self { renderer }
    }

    /// Рендерит верхний уровень дерева в указанном формате
    pub fn render_tree(&self, roots: &[ConfigObject], format: ReportFormat) -> Result<String> {
        match format {
            ReportFormat::Text => Ok(self.renderer.render(roots)),
            ReportFormat::Json => Ok(serde_json::to_string_pretty(roots)?),
        }
    }

    pub fn renderer(&self) -> &TreeRenderer {
        &self.renderer
    }

    /// Сохраняет отчет в файл, создавая недостающие директории
    pub fn save_report<P: AsRef<Path>>(&self, content: &str, output_path: P) -> Result<()> {
        let output_path = output_path.as_ref();
        if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| ViewerError::io(parent, e))?;
        }
        std::fs::write(output_path, content).map_err(|e| ViewerError::io(output_path, e))?;
        tracing::info!("Report saved: {}", output_path.display());
        Ok(())
    }
}

impl Default for ReportManager {
    fn default() -> Self {
        Self::new()
    }
}
