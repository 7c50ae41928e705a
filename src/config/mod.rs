use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::core::pagination::{DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS};
use crate::infrastructure::{AlchemyEndpoints, Network};

pub const API_KEY_ENV: &str = "ALCHEMY_API_KEY";
pub const CONFIG_ENV: &str = "ETHSCOPE_CONFIG";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing API key: set ALCHEMY_API_KEY or pass --api-key")]
    MissingApiKey,

    #[error("unknown network `{0}`")]
    UnknownNetwork(String),

    #[error("invalid page size {0} (expected one of 5, 10, 20, 50)")]
    InvalidPageSize(usize),

    #[error("failed to read {path}: {message}")]
    Read { path: String, message: String },

    #[error("failed to parse {path}: {message}")]
    Parse { path: String, message: String },
}

/// Optional config file (`config.toml`)
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub network: Option<String>,

    #[serde(default)]
    pub page_size: Option<usize>,

    /// Block explorer for transaction links, e.g. `https://etherscan.io`
    #[serde(default)]
    pub explorer_url: Option<String>,

    #[serde(default)]
    pub log_file: Option<String>,
}

/// Values given on the command line (or through their env fallbacks)
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api_key: Option<String>,
    pub network: Option<String>,
    /// Replaces `https://<network>.g.alchemy.com`
    pub base_url: Option<String>,
    pub page_size: Option<usize>,
    pub log_file: Option<PathBuf>,
}

/// Fully resolved startup settings
#[derive(Debug, Clone)]
pub struct Settings {
    pub network: Network,
    pub endpoints: AlchemyEndpoints,
    pub page_size: usize,
    pub explorer_url: String,
    pub log_file: PathBuf,
}

impl Settings {
    /// Merge CLI over file over defaults. CLI wins.
    pub fn resolve(cli: Overrides, file: Config) -> Result<Self, ConfigError> {
        let api_key = cli
            .api_key
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let network = match cli.network.or(file.network) {
            Some(name) => name
                .parse::<Network>()
                .map_err(|_| ConfigError::UnknownNetwork(name))?,
            None => Network::default(),
        };

        let page_size = cli.page_size.or(file.page_size).unwrap_or(DEFAULT_PAGE_SIZE);
        if !PAGE_SIZE_OPTIONS.contains(&page_size) {
            return Err(ConfigError::InvalidPageSize(page_size));
        }

        let endpoints = match cli.base_url {
            Some(base) => AlchemyEndpoints::new(&base, &api_key),
            None => AlchemyEndpoints::for_network(network, &api_key),
        };

        let explorer_url = file
            .explorer_url
            .unwrap_or_else(|| network.explorer_url().to_string());

        let log_file = cli
            .log_file
            .or_else(|| file.log_file.as_deref().and_then(expand_path))
            .unwrap_or_else(default_log_file);

        Ok(Self {
            network,
            endpoints,
            page_size,
            explorer_url,
            log_file,
        })
    }
}

/// Read the config file. A missing file yields the defaults.
pub fn load() -> Result<Config, ConfigError> {
    match config_path() {
        Some(path) => load_from(&path),
        None => Ok(Config::default()),
    }
}

pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Config::default()),
        Err(e) => {
            return Err(ConfigError::Read {
                path: path.display().to_string(),
                message: e.to_string(),
            })
        }
    };
    toml::from_str::<Config>(&content).map_err(|e| ConfigError::Parse {
        path: path.display().to_string(),
        message: e.message().to_string(),
    })
}

/// `$ETHSCOPE_CONFIG` when set, else the first existing candidate.
pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV).map(PathBuf::from) {
        return Some(path);
    }
    first_existing(config_candidates())
}

/// Default config locations, most specific first
fn config_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from) {
        candidates.push(xdg.join("ethscope").join("config.toml"));
    }
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        candidates.push(home.join(".config").join("ethscope").join("config.toml"));
    }
    if let Some(dirs) = directories::ProjectDirs::from("io", "ethscope", "ethscope") {
        candidates.push(dirs.config_dir().join("config.toml"));
    }
    candidates
}

fn first_existing(candidates: impl IntoIterator<Item = PathBuf>) -> Option<PathBuf> {
    candidates.into_iter().find(|path| path.is_file())
}

pub fn data_dir() -> Option<PathBuf> {
    if let Some(xdg) = std::env::var_os("XDG_DATA_HOME").map(PathBuf::from) {
        return Some(xdg.join("ethscope"));
    }
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        return Some(home.join(".local").join("share").join("ethscope"));
    }
    directories::ProjectDirs::from("io", "ethscope", "ethscope")
        .map(|dirs| dirs.data_dir().to_path_buf())
}

pub fn default_log_file() -> PathBuf {
    data_dir()
        .map(|dir| dir.join("ethscope.log"))
        .unwrap_or_else(|| PathBuf::from("ethscope.log"))
}

fn expand_path(path: &str) -> Option<PathBuf> {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Some(rest) = trimmed.strip_prefix("~/") {
        let home = directories::BaseDirs::new()?.home_dir().to_path_buf();
        return Some(home.join(rest));
    }
    Some(PathBuf::from(trimmed))
}
