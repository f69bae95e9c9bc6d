use crate::Cli;
use crate::config::{AppConfig, FileConfig, PartialSearchConfig, load_project_config};
use crate::resolver::TermPolicy;
use crate::logging;
use clap::Parser;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn no_env(_: &str) -> Option<String> {
    None
}

#[test]
fn test_load_project_config() {
    let temp_dir = TempDir::new().unwrap();
    let project_root = temp_dir.path();

    let sb_dir = project_root.join(".sbfoods");
    fs::create_dir_all(&sb_dir).unwrap();

    let config_content = r#"
theme = "light"
catalog_path = "menu.json"

[search]
trim_whitespace = false

[[accounts]]
email = "ana@example.com"
password = "secret99"
name = "Ana"
"#;

    fs::write(sb_dir.join("config.toml"), config_content).unwrap();

    let project_cfg = load_project_config(project_root).unwrap();

    assert_eq!(project_cfg.theme, Some("light".to_string()));
    assert_eq!(project_cfg.catalog_path, Some(PathBuf::from("menu.json")));
    assert_eq!(
        project_cfg.search,
        Some(PartialSearchConfig {
            trim_whitespace: Some(false)
        })
    );
    let accounts = project_cfg.accounts.unwrap();
    assert_eq!(accounts.len(), 1);
    assert_eq!(accounts[0].name.as_deref(), Some("Ana"));
}

#[test]
fn test_load_project_config_not_exists() {
    let temp_dir = TempDir::new().unwrap();
    let project_cfg = load_project_config(temp_dir.path()).unwrap();
    assert_eq!(project_cfg, FileConfig::default());
}

#[test]
fn test_load_project_config_invalid_falls_back() {
    let temp_dir = TempDir::new().unwrap();
    let sb_dir = temp_dir.path().join(".sbfoods");
    fs::create_dir_all(&sb_dir).unwrap();
    fs::write(sb_dir.join("config.toml"), "theme = [not toml").unwrap();

    let project_cfg = load_project_config(temp_dir.path()).unwrap();
    assert_eq!(project_cfg, FileConfig::default());
}

#[test]
fn test_invalid_project_config_is_logged() {
    let temp_dir = TempDir::new().unwrap();
    let sb_dir = temp_dir.path().join(".sbfoods");
    fs::create_dir_all(&sb_dir).unwrap();
    fs::write(sb_dir.join("config.toml"), "theme = [not toml").unwrap();

    let logs = LogBuffer::default();
    let writer = logs.clone();
    let project_cfg = logging::scoped("info", move || writer.clone(), || {
        load_project_config(temp_dir.path())
    })
    .unwrap();

    assert_eq!(project_cfg, FileConfig::default());
    let out = logs.contents();
    assert!(out.contains("WARN"));
    assert!(out.contains("parse config failed"));
    assert!(out.contains("config.toml"));
    assert!(!out.contains("loaded project config file"));
}

#[test]
fn test_merge_defaults() {
    let cli = Cli::parse_from(["sbfoods"]);
    let cfg = AppConfig::merge(cli, FileConfig::default(), FileConfig::default(), no_env);

    assert_eq!(cfg.theme, "dark");
    assert_eq!(cfg.catalog_path, None);
    assert_eq!(cfg.term_policy(), TermPolicy::Trimmed);
    assert_eq!(cfg.accounts.len(), 1);
    assert!(!cfg.no_tui);
}

#[test]
fn test_merge_precedence() {
    let project = FileConfig {
        theme: Some("light".to_string()),
        log_level: Some("debug".to_string()),
        ..FileConfig::default()
    };
    let global = FileConfig {
        theme: Some("dark".to_string()),
        catalog_path: Some(PathBuf::from("/etc/menu.json")),
        search: Some(PartialSearchConfig {
            trim_whitespace: Some(false),
        }),
        ..FileConfig::default()
    };

    let cli = Cli::parse_from(["sbfoods"]);
    let cfg = AppConfig::merge(cli, project.clone(), global.clone(), no_env);
    assert_eq!(cfg.theme, "light");
    assert_eq!(cfg.log_level, "debug");
    assert_eq!(cfg.catalog_path, Some(PathBuf::from("/etc/menu.json")));
    assert_eq!(cfg.term_policy(), TermPolicy::Literal);

    let env = |key: &str| (key == "SBFOODS_THEME").then(|| "solarized".to_string());
    let cli = Cli::parse_from(["sbfoods"]);
    let cfg = AppConfig::merge(cli, project.clone(), global.clone(), env);
    assert_eq!(cfg.theme, "solarized");

    let cli = Cli::parse_from(["sbfoods", "--theme", "dark", "--catalog", "local.json"]);
    let cfg = AppConfig::merge(cli, project, global, env);
    assert_eq!(cfg.theme, "dark");
    assert_eq!(cfg.catalog_path, Some(PathBuf::from("local.json")));
}

#[test]
fn test_literal_search_flag_overrides_files() {
    let project = FileConfig {
        search: Some(PartialSearchConfig {
            trim_whitespace: Some(true),
        }),
        ..FileConfig::default()
    };
    let cli = Cli::parse_from(["sbfoods", "--literal-search", "--no-tui"]);
    let cfg = AppConfig::merge(cli, project, FileConfig::default(), no_env);
    assert_eq!(cfg.term_policy(), TermPolicy::Literal);
    assert!(cfg.no_tui);
}
