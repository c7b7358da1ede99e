//! Configuration for kitzur paths.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (KITZUR_HOME, KITZUR_CONTENT)
//! 2. Config file (.kitzur/config.yaml)
//! 3. Defaults (~/.kitzur)
//!
//! Config file discovery:
//! - Searches current directory and parents for .kitzur/config.yaml
//! - Paths in config file are relative to the project root (parent of .kitzur/)

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::progress::DEFAULT_CHAPTER_ID_PREFIX;

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub reading: Option<ReadingConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathsConfig {
    /// Reading state directory
    pub home: Option<String>,
    /// Chapter bundle directory
    pub content: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReadingConfig {
    /// Prefix for generated chapter ids (e.g. "kitzur_orach_chaim")
    pub chapter_id_prefix: Option<String>,
}

/// Resolved configuration with absolute paths
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Directory holding reading state
    pub home: PathBuf,
    /// Directory holding chapter JSON files
    pub content: PathBuf,
    /// Prefix for generated chapter ids
    pub chapter_id_prefix: String,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

impl ResolvedConfig {
    /// Path to the progress store file
    pub fn progress_path(&self) -> PathBuf {
        self.home.join("progress.json")
    }
}

/// Find config file by searching current directory and parents
fn find_config_file() -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok()?;

    loop {
        let config_path = current.join(".kitzur").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to the project root
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
            .canonicalize()
            .unwrap_or_else(|_| base.join(path_str))
    }
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    let default_home = dirs::home_dir()
        .context("Failed to determine home directory")?
        .join(".kitzur");

    let config_file = find_config_file();

    let (file_home, file_content, prefix) = if let Some(ref config_path) = config_file {
        let config = load_config_file(config_path)?;

        // Project root is the parent of .kitzur/
        let base_dir = config_path
            .parent()
            .and_then(|p| p.parent())
            .unwrap_or(Path::new("."));

        let home = config.paths.home.as_deref().map(|p| resolve_path(base_dir, p));
        let content = config
            .paths
            .content
            .as_deref()
            .map(|p| resolve_path(base_dir, p));
        let prefix = config.reading.and_then(|r| r.chapter_id_prefix);

        (home, content, prefix)
    } else {
        (None, None, None)
    };

    let home = std::env::var("KITZUR_HOME")
        .map(PathBuf::from)
        .ok()
        .or(file_home)
        .unwrap_or(default_home);

    let content = std::env::var("KITZUR_CONTENT")
        .map(PathBuf::from)
        .ok()
        .or(file_content)
        .unwrap_or_else(|| home.join("content").join("chapters"));

    Ok(ResolvedConfig {
        home,
        content,
        chapter_id_prefix: prefix.unwrap_or_else(|| DEFAULT_CHAPTER_ID_PREFIX.to_string()),
        config_file,
    })
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| e.to_string()));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}

/// Get the chapter bundle directory
pub fn content_dir() -> Result<PathBuf> {
    Ok(config()?.content.clone())
}

/// Get the progress store path ($KITZUR_HOME/progress.json)
pub fn progress_path() -> Result<PathBuf> {
    Ok(config()?.progress_path())
}
