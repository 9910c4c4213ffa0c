use anyhow::Result;
use directories::ProjectDirs;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use tracing::info;

const DEFAULT_CONFIG: &str = r#"# refdoc configuration

[output]
# Title shown in the navigation bar of every page
title = "API Reference"

# Optional overrides for the shared assets copied to the output root.
# Use "none" to suppress a file entirely.
# css = "custom/doc.css"
# js = "custom/doc.js"

# Stamp every page with the generation date. Leaving this off keeps
# regenerated output byte-identical.
date = false

[generate]
# Number of parallel page rendering workers
parallelism = 4
"#;

/// Defaults for `generate`; command-line flags always win.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub output: OutputConfig,
    pub generate: GenerateConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub title: Option<String>,
    pub css: Option<String>,
    pub js: Option<String>,
    pub date: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GenerateConfig {
    pub parallelism: Option<usize>,
}

fn config_path() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("dev", "refdoc", "refdoc")
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
    Ok(dirs.config_dir().join("config.toml"))
}

/// Load the config file if one exists; built-in defaults otherwise.
pub fn load() -> Result<Config> {
    let path = config_path()?;
    if path.exists() {
        let content = fs::read_to_string(&path)?;
        Ok(toml::from_str(&content)?)
    } else {
        Ok(Config::default())
    }
}

pub fn run(init: bool) -> Result<()> {
    let config_path = config_path()?;

    if init {
        if let Some(dir) = config_path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(&config_path, DEFAULT_CONFIG)?;
        info!("Created config file at: {}", config_path.display());
    } else if config_path.exists() {
        let content = fs::read_to_string(&config_path)?;
        println!("Config file: {}\n", config_path.display());
        println!("{}", content);
    } else {
        println!("No config file found.");
        println!("Run `refdoc config --init` to create one at:");
        println!("  {}", config_path.display());
        println!("\nOr use environment variables:");
        println!("  REFDOC_TITLE=\"My Project API\"");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.output.title.as_deref(), Some("API Reference"));
        assert_eq!(config.generate.parallelism, Some(4));
        assert!(!config.output.date);
    }

    #[test]
    fn test_partial_config() {
        let config: Config = toml::from_str("[output]\ntitle = \"X\"\n").unwrap();
        assert_eq!(config.output.title.as_deref(), Some("X"));
        assert_eq!(config.generate.parallelism, None);
    }
}
