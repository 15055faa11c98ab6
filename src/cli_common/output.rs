//! Модуль для вывода результатов команд

use anyhow::Result;
use serde::Serialize;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::reports::ReportFormat;

/// Writer для вывода результатов
pub struct OutputWriter {
    writer: Box<dyn Write>,
    format: ReportFormat,
}

impl OutputWriter {
    /// Создает writer для stdout
    pub fn stdout(format: ReportFormat) -> Self {
        Self {
            writer: Box::new(io::stdout()),
            format,
        }
    }

    /// Создает writer для файла
    pub fn file(path: &Path, format: ReportFormat) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            writer: Box::new(file),
            format,
        })
    }

    pub fn format(&self) -> ReportFormat {
        self.format
    }

    /// Записывает сериализуемый объект как JSON
    pub fn write_object<T: Serialize>(&mut self, obj: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(obj)?;
        writeln!(self.writer, "{}", json)?;
        Ok(())
    }

    /// Записывает строку
    pub fn write_line(&mut self, line: &str) -> Result<()> {
        writeln!(self.writer, "{}", line)?;
        Ok(())
    }

    /// Записывает готовый текст без перевода строки
    pub fn write_raw(&mut self, text: &str) -> Result<()> {
        write!(self.writer, "{}", text)?;
        Ok(())
    }

    /// Завершает запись и сбрасывает буфер
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_writer() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.json");

        let mut writer = OutputWriter::file(&path, ReportFormat::Json).unwrap();
        writer.write_object(&vec!["a", "b"]).unwrap();
        writer.flush().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "[\n  \"a\",\n  \"b\"\n]\n");
    }
}
