use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::Result;
use crate::estimate::PowerModel;

pub const PASSWORD_ENV: &str = "CF_PASSWORD";

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    pub cf_bin: PathBuf,
    pub model: PowerModel,
    pub login: Option<LoginConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cf_bin: PathBuf::from("cf"),
            model: PowerModel::default(),
            login: None,
        }
    }
}

/// Credentials for a non-interactive `cf login`. The password is read from
/// `CF_PASSWORD` at login time and never stored in the file.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginConfig {
    pub api: String,
    pub user: String,
    pub org: String,
    pub space: Option<String>,
}

pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("cf-footprint").join("config.toml"))
}

/// Loads `path`, or the default location when `path` is `None`. A missing
/// file yields the defaults.
pub fn load(path: Option<&Path>) -> Result<Config> {
    let path = match path.map(Path::to_path_buf).or_else(default_path) {
        Some(path) => path,
        None => return Ok(Config::default()),
    };

    let contents = match fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }
        Err(err) => return Err(err.into()),
    };

    let config: Config = toml::from_str(&contents)?;
    config.model.validate()?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}
