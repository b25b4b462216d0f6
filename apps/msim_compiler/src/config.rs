//! Ini file fallback for CLI settings.
//!
//! No ini crate is in the dependency stack, so sections are read by hand:
//! `[section]` headers and `key=value` lines, `;`/`#` comments, blank lines
//! ignored. Flat `key=value` lines before any header are filed under the
//! empty-string section.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

#[derive(Debug)]
pub enum ConfigError {
    Io(std::path::PathBuf, String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(path, e) => write!(f, "failed to read {}: {e}", path.display()),
        }
    }
}

impl std::error::Error for ConfigError {}

/// A parsed ini file: section name → key → value.
#[derive(Debug, Clone, Default)]
pub struct IniConfig {
    sections: HashMap<String, HashMap<String, String>>,
}

impl IniConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text =
            fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e.to_string()))?;
        Ok(Self::parse(&text))
    }

    pub fn parse(text: &str) -> Self {
        let mut sections: HashMap<String, HashMap<String, String>> = HashMap::new();
        let mut current = String::new();
        for raw_line in text.lines() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
                continue;
            }
            if line.starts_with('[') && line.ends_with(']') {
                current = line[1..line.len() - 1].trim().to_string();
                sections.entry(current.clone()).or_default();
                continue;
            }
            if let Some((key, value)) = line.split_once('=') {
                sections
                    .entry(current.clone())
                    .or_default()
                    .insert(key.trim().to_string(), value.trim().to_string());
            }
        }
        Self { sections }
    }

    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections.get(section)?.get(key).map(String::as_str)
    }
}

/// Fills in any `Option`-typed CLI setting the user left unset from the
/// `[General]` section of an ini file. Settings given on the command line
/// are already `Some(..)` by the time this runs and are never touched,
/// which is what gives flags priority over the ini file.
pub fn apply_ini_defaults(cli: &mut crate::cli::Cli, ini: &IniConfig) {
    if cli.model_name.is_none() {
        cli.model_name = ini.get("General", "ModelName").map(str::to_string);
    }
    if cli.input_dir.is_none() {
        cli.input_dir = ini.get("General", "InputDir").map(std::path::PathBuf::from);
    }
    if cli.param_dir.is_none() {
        cli.param_dir = ini.get("General", "ParamDir").map(std::path::PathBuf::from);
    }
    if cli.fixed_dir.is_none() {
        cli.fixed_dir = ini.get("General", "FixedDir").map(std::path::PathBuf::from);
    }
    if cli.doc_dir.is_none() {
        cli.doc_dir = ini.get("General", "DocDir").map(std::path::PathBuf::from);
    }
    if cli.sql_dir.is_none() {
        cli.sql_dir = ini.get("General", "SqlDir").map(std::path::PathBuf::from);
    }
}

#[cfg(test)]
mod apply_ini_tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;

    #[test]
    fn ini_fills_unset_fields_only() {
        let mut cli = Cli::parse_from(["msimc", "--model", "FromFlag"]);
        let ini = IniConfig::parse(
            "[General]\nModelName=FromIni\nInputDir=src\nParamDir=params\n",
        );
        apply_ini_defaults(&mut cli, &ini);
        assert_eq!(cli.model_name.as_deref(), Some("FromFlag"));
        assert_eq!(cli.input_dir, Some(std::path::PathBuf::from("src")));
        assert_eq!(cli.param_dir, Some(std::path::PathBuf::from("params")));
    }

    #[test]
    fn missing_ini_section_leaves_fields_unset() {
        let mut cli = Cli::parse_from(["msimc"]);
        let ini = IniConfig::parse("");
        apply_ini_defaults(&mut cli, &ini);
        assert!(cli.model_name.is_none());
    }
}
