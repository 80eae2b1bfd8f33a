use crate::output::OutputFormat;
use crate::projects;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_VIZ_DIR: &str = "./profile_charts";

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root holding one directory per project; defaults to ~/.claude/projects
    pub projects_dir: Option<PathBuf>,
    pub anonymize: bool,
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub viz_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            projects_dir: None,
            anonymize: true,
            output: OutputConfig::default(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            format: OutputFormat::Text,
            viz_dir: PathBuf::from(DEFAULT_VIZ_DIR),
        }
    }
}

impl Config {
    /// Load config from ~/.devprofile/config.toml, or defaults if there is none
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Ok(path) => Self::load_from(&path),
            Err(_) => Ok(Config::default()),
        }
    }

    /// Load config from an explicit path. A missing file means defaults.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        Self::parse(&content)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    fn config_path() -> Result<PathBuf> {
        Ok(projects::home_dir()?.join(".devprofile").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.anonymize);
        assert_eq!(config.projects_dir, None);
        assert_eq!(config.output.format, OutputFormat::Text);
        assert_eq!(config.output.viz_dir, PathBuf::from("./profile_charts"));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = Config::parse("anonymize = false\n").unwrap();
        assert!(!config.anonymize);
        assert_eq!(config.output.format, OutputFormat::Text);
    }

    #[test]
    fn test_full_file() {
        let config = Config::parse(
            r#"
projects_dir = "/data/projects"
anonymize = true

[output]
format = "json"
viz_dir = "/tmp/charts"
"#,
        )
        .unwrap();
        assert_eq!(config.projects_dir, Some(PathBuf::from("/data/projects")));
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(config.output.viz_dir, PathBuf::from("/tmp/charts"));
    }

    #[test]
    fn test_invalid_file_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "[output]\nformat = \"yaml\"\n").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_missing_file_is_default() {
        let tmp = TempDir::new().unwrap();
        let config = Config::load_from(&tmp.path().join("nope.toml")).unwrap();
        assert!(config.anonymize);
    }
}
