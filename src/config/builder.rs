//! Default configuration file creation.
//!
//! The template is assembled with a small builder so that section headers,
//! settings and their trailing comments line up.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::utils::private_path;

/// Create the default, fully commented config file at `path`.
pub fn create_default_config(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    let content = ConfigBuilder::new()
        .add_section("Storage")
        .add_commented_setting(
            "storage_dir",
            "\"~/.local/state/lockcheck/default\"",
            "Directory holding the lock record (default: XDG state dir)",
        )
        .add_section("Interface")
        .add_setting(
            "mouse",
            &super::DEFAULT_MOUSE.to_string(),
            "Click outside the edit dialog to dismiss it",
        )
        .build();

    fs::write(path, content)
        .with_context(|| format!("Failed to write default config to {}", private_path(path)))?;

    log_block_start!("Created default configuration");
    log_indented!("{}", private_path(path));

    Ok(())
}

/// Builder for config text with aligned trailing comments.
struct ConfigBuilder {
    lines: Vec<Line>,
}

enum Line {
    Section(String),
    Setting {
        key: String,
        value: String,
        comment: String,
        commented_out: bool,
    },
}

const COMMENT_COLUMN: usize = 44;

impl ConfigBuilder {
    fn new() -> Self {
        Self { lines: Vec::new() }
    }

    fn add_section(mut self, name: &str) -> Self {
        self.lines.push(Line::Section(name.to_string()));
        self
    }

    fn add_setting(mut self, key: &str, value: &str, comment: &str) -> Self {
        self.lines.push(Line::Setting {
            key: key.to_string(),
            value: value.to_string(),
            comment: comment.to_string(),
            commented_out: false,
        });
        self
    }

    fn add_commented_setting(mut self, key: &str, value: &str, comment: &str) -> Self {
        self.lines.push(Line::Setting {
            key: key.to_string(),
            value: value.to_string(),
            comment: comment.to_string(),
            commented_out: true,
        });
        self
    }

    fn build(self) -> String {
        let mut out = String::new();
        for (idx, line) in self.lines.iter().enumerate() {
            match line {
                Line::Section(name) => {
                    if idx > 0 {
                        out.push('\n');
                    }
                    out.push_str(&format!("#[{name}]\n"));
                }
                Line::Setting {
                    key,
                    value,
                    comment,
                    commented_out,
                } => {
                    let prefix = if *commented_out { "# " } else { "" };
                    let assignment = format!("{prefix}{key} = {value}");
                    out.push_str(&format!(
                        "{assignment:<width$} # {comment}\n",
                        width = COMMENT_COLUMN
                    ));
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_aligns_comments() {
        let text = ConfigBuilder::new()
            .add_section("Interface")
            .add_setting("mouse", "true", "Click outside")
            .build();
        let setting = text.lines().nth(1).unwrap();
        assert!(setting.starts_with("mouse = true"));
        assert_eq!(setting.find('#'), Some(COMMENT_COLUMN + 1));
    }

    #[test]
    fn test_default_template_parses() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("lockcheck.toml");
        create_default_config(&path).unwrap();

        let config = super::super::load_from_path(&path).unwrap();
        assert_eq!(config.storage_dir, None);
        assert_eq!(config.mouse, Some(true));
    }
}
