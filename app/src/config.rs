use std::time::Duration;

use clap::{Parser, ValueEnum};
use feed_core::DEFAULT_SCROLL_BOUNDARY;

pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";
pub const BASE_URL_ENV: &str = "FEED_BASE_URL";

/// How the posts panel loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PanelMode {
    /// One fetch per mount or refetch.
    Plain,
    /// Infinite scroll: another page whenever the view nears the bottom.
    Paged,
}

#[derive(Debug, Parser)]
#[command(name = "feed-panels", about = "Shuffled posts and todos, side by side")]
pub struct Cli {
    /// API root; falls back to $FEED_BASE_URL, then the public placeholder API.
    #[arg(long)]
    pub base_url: Option<String>,

    #[arg(long, value_enum, default_value_t = PanelMode::Plain)]
    pub mode: PanelMode,

    /// Visible lines per panel.
    #[arg(long, default_value_t = 20)]
    pub viewport: usize,

    /// Distance from the bottom, in lines, that loads the next page.
    #[arg(long, default_value_t = DEFAULT_SCROLL_BOUNDARY)]
    pub boundary: f64,

    #[arg(long, default_value_t = 10)]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub base_url: String,
    pub mode: PanelMode,
    pub viewport_lines: usize,
    pub boundary: f64,
    pub timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            mode: PanelMode::Plain,
            viewport_lines: 20,
            boundary: DEFAULT_SCROLL_BOUNDARY,
            timeout: Duration::from_secs(10),
        }
    }
}

impl Settings {
    /// Defaults, then the environment, then explicit flags.
    pub fn resolve(cli: &Cli, env_base_url: Option<String>) -> Self {
        let mut settings = Settings::default();

        if let Some(v) = env_base_url.filter(|v| !v.trim().is_empty()) {
            settings.base_url = v;
        }
        if let Some(v) = &cli.base_url {
            settings.base_url = v.clone();
        }

        settings.mode = cli.mode;
        settings.viewport_lines = cli.viewport.max(1);
        settings.boundary = cli.boundary.max(0.0);
        settings.timeout = Duration::from_secs(cli.timeout_secs.max(1));
        settings
    }
}

pub fn load_settings(cli: &Cli) -> Settings {
    Settings::resolve(cli, std::env::var(BASE_URL_ENV).ok())
}
