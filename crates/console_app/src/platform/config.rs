//! Console configuration: an optional RON file overridden by command-line flags.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use console_engine::{ApiSettings, EngineConfig};
use console_logging::{console_info, console_warn};
use serde::{Deserialize, Serialize};

const DEFAULT_CONFIG_FILENAME: &str = "verify-console.ron";

#[derive(Debug, Parser)]
#[command(
    name = "verify-console",
    version,
    about = "Terminal console for the email verification service"
)]
pub struct Cli {
    /// RON config file (default: ./verify-console.ron when present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Backend base URL, e.g. http://127.0.0.1:5000
    #[arg(long)]
    pub base_url: Option<String>,

    /// Directory exported files are saved to
    #[arg(long)]
    pub download_dir: Option<PathBuf>,

    /// Seconds between usage refreshes
    #[arg(long)]
    pub poll_interval: Option<u64>,

    /// Hide the usage panel
    #[arg(long)]
    pub no_usage: bool,

    /// Log file path
    #[arg(long, default_value = "verify-console.log")]
    pub log_file: PathBuf,

    /// Log level: off|error|warn|info|debug|trace
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    pub base_url: String,
    pub download_dir: PathBuf,
    pub poll_interval_secs: u64,
    pub connect_timeout_secs: Option<u64>,
    pub request_timeout_secs: Option<u64>,
    pub show_usage: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            base_url: ApiSettings::default().base_url,
            download_dir: dirs::download_dir().unwrap_or_else(|| PathBuf::from(".")),
            poll_interval_secs: 30,
            connect_timeout_secs: None,
            request_timeout_secs: None,
            show_usage: true,
        }
    }
}

impl ConsoleConfig {
    /// Reads the config file named on the command line (or the default one)
    /// and applies the remaining flags on top.
    pub fn load(cli: &Cli) -> Self {
        let (path, explicit) = match &cli.config {
            Some(path) => (path.clone(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILENAME), false),
        };
        let mut config = read_config_file(&path, explicit).unwrap_or_default();
        config.apply_cli(cli);
        config
    }

    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(base_url) = &cli.base_url {
            self.base_url = base_url.clone();
        }
        if let Some(dir) = &cli.download_dir {
            self.download_dir = dir.clone();
        }
        if let Some(secs) = cli.poll_interval {
            self.poll_interval_secs = secs;
        }
        if cli.no_usage {
            self.show_usage = false;
        }
    }

    pub fn engine_config(&self) -> EngineConfig {
        let api = ApiSettings {
            base_url: self.base_url.clone(),
            connect_timeout: self.connect_timeout_secs.map(Duration::from_secs),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
        };
        let mut config = EngineConfig::new(api, self.download_dir.clone());
        config.poll_interval = Duration::from_secs(self.poll_interval_secs);
        config
    }
}

fn read_config_file(path: &Path, explicit: bool) -> Option<ConsoleConfig> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound && !explicit => {
            return None;
        }
        Err(err) => {
            console_warn!("Failed to read config from {:?}: {}", path, err);
            return None;
        }
    };

    match ron::from_str::<ConsoleConfig>(&content) {
        Ok(config) => {
            console_info!("Loaded config from {:?}", path);
            Some(config)
        }
        Err(err) => {
            console_warn!("Failed to parse config from {:?}: {}", path, err);
            None
        }
    }
}
