//! Configuration loading for digirain.
//!
//! Settings come from an optional TOML file in the platform config
//! directory. A missing file means the built-in defaults; anything else that
//! goes wrong is fatal and reported with the offending path.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use color_eyre::{Result, eyre::WrapErr};
use digirain_core::RainSettings;
use directories::ProjectDirs;

/// File name looked up inside the config directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Default location of the config file, if the platform has a config directory.
pub fn config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "digirain").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

/// Load settings from the default location.
pub fn load() -> Result<RainSettings> {
    match config_path() {
        Some(path) => load_from(&path),
        None => Ok(RainSettings::default()),
    }
}

/// Load settings from `path`, falling back to defaults when it does not exist.
pub fn load_from(path: &Path) -> Result<RainSettings> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(RainSettings::default()),
        Err(err) => {
            return Err(err).wrap_err_with(|| format!("failed to read {}", path.display()));
        }
    };

    parse(&contents).wrap_err_with(|| format!("invalid config file {}", path.display()))
}

/// Parse and validate settings from TOML text.
pub fn parse(contents: &str) -> Result<RainSettings> {
    let settings: RainSettings = toml::from_str(contents).wrap_err("malformed TOML")?;
    settings.validate()?;
    Ok(settings)
}
