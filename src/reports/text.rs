/*!
# Text Tree Renderer

Консольное представление дерева конфигурации для CLI.

## Возможности:
- Цветной вывод (отключается для перенаправленного вывода и CI)
- Два уровня: папки и корни конфигураций, затем объекты
- Описание элемента как в дереве: `(n)` у папок, внутреннее имя у объектов
- Итоговая строка с количеством видимых объектов
*/

use colored::{ColoredString, Colorize};

use crate::configuration::{ConfigObject, NodeKind};
use crate::tree::TreeItem;

/// Текстовый рендерер дерева конфигурации
pub struct TreeRenderer {
    /// Использовать цветной вывод
    use_colors: bool,
    /// Показывать тип объекта рядом с именем
    show_types: bool,
}

impl TreeRenderer {
    pub fn new() -> Self {
        Self {
            use_colors: Self::supports_colors(),
            show_types: true,
        }
    }

    pub fn with_config(use_colors: bool, show_types: bool) -> Self {
        Self {
            use_colors,
            show_types,
        }
    }

    /// Рендерер без цветов для тестов и перенаправленного вывода
    pub fn plain() -> Self {
        Self::with_config(false, true)
    }

    /// Рендерит верхний уровень дерева вместе с дочерними элементами
    pub fn render(&self, roots: &[ConfigObject]) -> String {
        let mut output = String::new();

        for root in roots {
            output.push_str(&self.render_root(root));
            output.push('\n');

            let children = root.child_nodes();
            for (index, child) in children.iter().enumerate() {
                let branch = if index + 1 == children.len() { "└─" } else { "├─" };
                output.push_str(&format!("   {} {}\n", branch, self.render_child(child)));
            }
        }

        output
    }

    /// Итоговая строка для количества видимых объектов
    pub fn render_summary(&self, visible: usize, search_term: &str) -> String {
        let text = if search_term.is_empty() {
            format!("{} items", visible)
        } else {
            format!("{} items matching '{}'", visible, search_term)
        };
        self.paint(&text, |s| s.dimmed())
    }

    fn render_root(&self, node: &ConfigObject) -> String {
        let item = TreeItem::root(node);
        let marker = match node.kind {
            NodeKind::ConfigurationRoot => "▣",
            NodeKind::Help => "ℹ",
            NodeKind::Folder => "▸",
            NodeKind::Object(_) => "•",
        };

        let mut line = format!(
            "{} {}",
            self.paint(marker, |s| s.blue()),
            self.paint(&item.label, |s| s.bold())
        );
        match (node.kind, &item.description) {
            (NodeKind::Help, _) => {
                if let Some(comment) = &node.comment {
                    line.push_str(&format!(" - {}", comment));
                }
            }
            // у папок описание уже в скобках
            (NodeKind::Folder, Some(description)) => {
                line.push(' ');
                line.push_str(&self.paint(description, |s| s.dimmed()));
            }
            (_, Some(description)) => {
                line.push(' ');
                line.push_str(&self.paint(&format!("({})", description), |s| s.dimmed()));
            }
            (_, None) => {}
        }
        line
    }

    fn render_child(&self, node: &ConfigObject) -> String {
        let item = TreeItem::child(node);
        let mut line = item.label.clone();

        if self.show_types {
            line.push(' ');
            line.push_str(&self.paint(&format!("[{}]", node.type_name()), |s| s.cyan()));
        }
        if let Some(description) = &item.description {
            line.push(' ');
            line.push_str(&self.paint(&format!("({})", description), |s| s.dimmed()));
        }
        line
    }

    fn paint(&self, text: &str, style: fn(&str) -> ColoredString) -> String {
        if self.use_colors {
            style(text).to_string()
        } else {
            text.to_string()
        }
    }

    /// Проверяет поддержку цветов терминалом
    fn supports_colors() -> bool {
        std::env::var("NO_COLOR").is_err() && std::env::var("CI").is_err()
    }
}

impl Default for TreeRenderer {
    fn default() -> Self {
        Self::new()
    }
}
