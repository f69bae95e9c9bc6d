mod auth;
mod cart;
mod catalog;
mod cli;
mod config;
mod logging;
mod resolver;
mod storefront;
mod tui;

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use dotenvy::dotenv;
use tracing::info;

use crate::auth::InMemoryAuth;
use crate::cart::InMemoryCart;
use crate::catalog::Catalog;
use crate::config::AppConfig;
use crate::storefront::Storefront;
use crate::tui::{Theme, TuiApp};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "sbfoods",
    version,
    about = "SB Foods storefront (TUI/CLI)"
)]
pub struct Cli {
    /// Use plain CLI mode (disable TUI)
    #[arg(long, action = ArgAction::SetTrue)]
    no_tui: bool,

    /// Catalog JSON file (defaults to the bundled catalog)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Color theme (dark, light)
    #[arg(long)]
    theme: Option<String>,

    /// Log filter (error,warn,info,debug,trace)
    #[arg(long)]
    log_level: Option<String>,

    /// Match the search box exactly as typed, whitespace included
    #[arg(long, action = ArgAction::SetTrue)]
    literal_search: bool,
}

fn load_catalog(cfg: &AppConfig) -> Result<Catalog> {
    match &cfg.catalog_path {
        Some(path) => {
            Catalog::load(path).with_context(|| format!("load catalog: {}", path.display()))
        }
        None => Catalog::builtin().context("load bundled catalog"),
    }
}

fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();
    let startup_level = cli
        .log_level
        .clone()
        .or_else(|| std::env::var("SBFOODS_LOG").ok())
        .unwrap_or_else(|| "info".to_string());
    let cfg = logging::scoped(&startup_level, io::stderr, || AppConfig::from_cli(cli))?;

    if cfg.no_tui {
        logging::init_stderr_logging(&cfg.log_level)?;
    } else {
        logging::init_file_logging(&cfg.log_level, &cfg.log_file)?;
    }
    info!(
        theme = %cfg.theme,
        catalog = ?cfg.catalog_path,
        no_tui = cfg.no_tui,
        trim_search = cfg.search.trim_whitespace,
        accounts = cfg.accounts.len(),
        "app config"
    );

    let catalog = Arc::new(load_catalog(&cfg)?);
    info!(
        dishes = catalog.len(),
        categories = catalog.categories().len(),
        "catalog ready"
    );

    let mut storefront = Storefront::new(
        catalog,
        cfg.term_policy(),
        Box::new(InMemoryAuth::new(cfg.accounts.clone())),
        Box::new(InMemoryCart::new()),
    );

    if cfg.no_tui {
        let stdin = io::stdin();
        cli::run(&mut storefront, stdin.lock(), io::stdout())
    } else {
        let mut app = TuiApp::new(storefront, Theme::from_name(&cfg.theme));
        app.run()
    }
}
