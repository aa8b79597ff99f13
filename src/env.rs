use std::collections::HashMap;
use std::path::Path;
use std::process::Command;

use tracing::trace;

use crate::constants::PATH_LIST_SEPARATOR;

/// Environment variables applied to every spawned subprocess. Overlays the
/// inherited process environment instead of mutating it.
#[derive(Debug, Clone, Default)]
pub struct EnvOverlay {
    vars: HashMap<String, String>,
}

impl EnvOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Put `dir` in front of the PATH the next subprocess will see.
    pub fn prepend_path(&mut self, dir: &Path) {
        let current = self
            .vars
            .get("PATH")
            .cloned()
            .or_else(|| std::env::var("PATH").ok())
            .unwrap_or_default();

        let path = if current.is_empty() {
            dir.display().to_string()
        } else {
            format!("{}{}{}", dir.display(), PATH_LIST_SEPARATOR, current)
        };
        self.vars.insert("PATH".to_string(), path);
    }

    /// Import `KEY=VALUE` lines, e.g. from the output of `env`. Lines without
    /// an `=` separator are not assignments and are skipped. Returns the
    /// number of variables imported.
    pub fn import_env_lines(&mut self, output: &str) -> usize {
        let mut imported = 0;

        for line in output.lines() {
            let Some((key, value)) = line.split_once('=') else {
                trace!("Skipping environment line without separator: {line}");
                continue;
            };
            if key.is_empty() {
                continue;
            }

            self.vars.insert(key.to_string(), value.trim_end().to_string());
            imported += 1;
        }

        imported
    }

    pub fn apply(&self, command: &mut Command) {
        for (key, value) in &self.vars {
            command.env(key, value);
        }
    }
}
