//! Runtime configuration: an optional TOML file layered under `PERFIT_*`
//! environment variables.
//!
//! ```toml
//! store_path      = "~/.local/share/perfit/perfit.db"
//! default_weather = "Rainy"
//!
//! [sampling]
//! preferred_probability = 0.7
//! preferred_fraction    = 0.5
//! ```
//!
//! Nested keys use a double underscore in the environment, e.g.
//! `PERFIT_SAMPLING__PREFERRED_PROBABILITY=0.9`.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use perfit_core::{assembly::SamplingConfig, weather::WeatherBucket};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
  pub store_path:      PathBuf,
  pub sampling:        SamplingConfig,
  /// Used by `suggest` when no weather flag is given.
  pub default_weather: WeatherBucket,
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      store_path:      PathBuf::from("~/.local/share/perfit/perfit.db"),
      sampling:        SamplingConfig::default(),
      default_weather: WeatherBucket::default(),
    }
  }
}

impl AppConfig {
  /// Load from `path` (if it exists) and the environment, then expand `~` in
  /// the store path.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(
        config::Environment::with_prefix("PERFIT")
          .prefix_separator("_")
          .separator("__")
          .try_parsing(true),
      )
      .build()
      .with_context(|| format!("failed to read config file {}", path.display()))?;

    let mut cfg: AppConfig = settings
      .try_deserialize()
      .context("failed to deserialise AppConfig")?;
    cfg.store_path = expand_tilde(&cfg.store_path);
    Ok(cfg)
  }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
