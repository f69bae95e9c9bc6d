use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::auth::Account;
use crate::resolver::TermPolicy;

pub const DEFAULT_THEME: &str = "dark";
pub const DEFAULT_LOG_FILE: &str = "./sbfoods.log";
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub no_tui: bool,
    pub theme: String,
    /// `None` means the catalog bundled with the binary.
    pub catalog_path: Option<PathBuf>,
    pub log_file: PathBuf,
    pub log_level: String,
    pub search: SearchConfig,
    pub accounts: Vec<Account>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Ignore surrounding whitespace in the search box, so a blank term shows
    /// the default page instead of an empty result list.
    pub trim_whitespace: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            trim_whitespace: true,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            no_tui: false,
            theme: DEFAULT_THEME.to_string(),
            catalog_path: None,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            search: SearchConfig::default(),
            accounts: vec![Account::demo()],
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct FileConfig {
    pub theme: Option<String>,
    pub catalog_path: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
    pub log_level: Option<String>,
    pub search: Option<PartialSearchConfig>,
    pub accounts: Option<Vec<Account>>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct PartialSearchConfig {
    pub trim_whitespace: Option<bool>,
}

impl AppConfig {
    pub fn term_policy(&self) -> TermPolicy {
        if self.search.trim_whitespace {
            TermPolicy::Trimmed
        } else {
            TermPolicy::Literal
        }
    }

    pub fn from_cli(cli: crate::Cli) -> Result<Self> {
        let project_root = std::env::current_dir().context("resolve current dir")?;

        let project_cfg = load_project_config(&project_root).unwrap_or_default();
        let file_cfg = load_file_config().unwrap_or_default();

        Ok(Self::merge(cli, project_cfg, file_cfg, |key| {
            std::env::var(key).ok()
        }))
    }

    /// Priority: CLI flag, env var, project config, global config, default.
    pub fn merge(
        cli: crate::Cli,
        project_cfg: FileConfig,
        file_cfg: FileConfig,
        env: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let defaults = Self::default();

        let theme = cli
            .theme
            .or_else(|| env("SBFOODS_THEME"))
            .or(project_cfg.theme)
            .or(file_cfg.theme)
            .unwrap_or(defaults.theme);

        let catalog_path = cli
            .catalog
            .or_else(|| env("SBFOODS_CATALOG").map(PathBuf::from))
            .or(project_cfg.catalog_path)
            .or(file_cfg.catalog_path);

        let log_level = cli
            .log_level
            .or_else(|| env("SBFOODS_LOG"))
            .or(project_cfg.log_level)
            .or(file_cfg.log_level)
            .unwrap_or(defaults.log_level);

        let log_file = project_cfg
            .log_file
            .or(file_cfg.log_file)
            .unwrap_or(defaults.log_file);

        let trim_whitespace = if cli.literal_search {
            false
        } else {
            project_cfg
                .search
                .and_then(|s| s.trim_whitespace)
                .or(file_cfg.search.and_then(|s| s.trim_whitespace))
                .unwrap_or(defaults.search.trim_whitespace)
        };

        // Account lists are not merged; the most specific list wins.
        let accounts = project_cfg
            .accounts
            .or(file_cfg.accounts)
            .unwrap_or(defaults.accounts);

        Self {
            no_tui: cli.no_tui,
            theme,
            catalog_path,
            log_file,
            log_level,
            search: SearchConfig { trim_whitespace },
            accounts,
        }
    }
}

pub fn load_file_config() -> Result<FileConfig> {
    use std::env;

    fn candidate_paths() -> Vec<PathBuf> {
        let mut v = Vec::new();
        if let Ok(p) = env::var("SBFOODS_CONFIG") {
            v.push(PathBuf::from(p));
        }
        if let Ok(xdg_home) = env::var("XDG_CONFIG_HOME") {
            v.push(Path::new(&xdg_home).join("sb-foods/config.toml"));
        } else if let Ok(home) = env::var("HOME") {
            v.push(Path::new(&home).join(".config/sb-foods/config.toml"));
        }
        if let Ok(dirs) = env::var("XDG_CONFIG_DIRS") {
            for d in dirs.split(':') {
                if !d.is_empty() {
                    v.push(Path::new(d).join("sb-foods/config.toml"));
                }
            }
        }
        v
    }

    for p in candidate_paths() {
        if p.exists() {
            match parse_config_file(&p)? {
                Some(cfg) => {
                    info!(path=%p.display(), "loaded config file");
                    return Ok(cfg);
                }
                None => continue,
            }
        }
    }
    Ok(FileConfig::default())
}

/// Load project-specific configuration from .sbfoods/config.toml
pub fn load_project_config(project_root: &Path) -> Result<FileConfig> {
    let project_config_path = project_root.join(".sbfoods").join("config.toml");

    if !project_config_path.exists() {
        return Ok(FileConfig::default());
    }
    match parse_config_file(&project_config_path)? {
        Some(cfg) => {
            info!(path=%project_config_path.display(), "loaded project config file");
            Ok(cfg)
        }
        None => Ok(FileConfig::default()),
    }
}

/// `Ok(None)` when the file exists but is not valid config; the caller moves on.
fn parse_config_file(path: &Path) -> Result<Option<FileConfig>> {
    let s = fs::read_to_string(path)
        .with_context(|| format!("read config file: {}", path.display()))?;
    match toml::from_str::<FileConfig>(&s) {
        Ok(cfg) => Ok(Some(cfg)),
        Err(e) => {
            warn!(path=%path.display(), error=%e.to_string(), "parse config failed");
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests;
