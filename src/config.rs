//! Configuration loader describing where the host serves files and how the component behaves.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::component::LegacyImageOptions;
use crate::models::RootContext;

const DEFAULT_CONFIG_FILE: &str = "legacyimage.config.json";

/// Discoverable configuration for the component and the host it talks to.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ComponentConfig {
  /// Base URL of the serving host.
  pub root: String,
  /// Proxy base URL, when requests are routed through a proxy.
  pub root_url: Option<String>,
  /// Directory receiving cached images and examples.
  pub cache_dir: PathBuf,
  /// Constructor options for the component.
  pub component: LegacyImageOptions,
}

impl Default for ComponentConfig {
  fn default() -> Self {
    Self {
      root: "http://localhost:7860".into(),
      root_url: None,
      cache_dir: std::env::temp_dir().join("gradio_legacyimage"),
      component: LegacyImageOptions::default(),
    }
  }
}

impl ComponentConfig {
  /// Attempt to load configuration from the provided directory.
  ///
  /// A missing or unparsable file yields the defaults so callers can keep going.
  pub fn discover(dir: &Path) -> Self {
    let candidate = dir.join(DEFAULT_CONFIG_FILE);
    if !candidate.exists() {
      log::debug!("no {} in {}, using defaults", DEFAULT_CONFIG_FILE, dir.display());
      return Self::default();
    }
    Self::from_path(&candidate).unwrap_or_default()
  }

  /// Read configuration from a specific JSON file.
  pub fn from_path(path: &Path) -> Option<Self> {
    let content = match fs::read_to_string(path) {
      Ok(content) => content,
      Err(err) => {
        log::warn!("failed to read {}: {}", path.display(), err);
        return None;
      }
    };
    match serde_json::from_str(&content) {
      Ok(config) => Some(config),
      Err(err) => {
        log::warn!("failed to parse {}: {}", path.display(), err);
        None
      }
    }
  }

  /// Base addresses for URL construction.
  pub fn root_context(&self) -> RootContext {
    RootContext {
      root: self.root.clone(),
      root_url: self.root_url.clone(),
    }
  }
}
