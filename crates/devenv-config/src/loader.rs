//! Configuration source discovery and parsing
//!
//! A `SourceList` is an ordered list of candidate file locations. Sources
//! earlier in the list are lower precedence; the resolver folds fragments
//! left-to-right so later sources override earlier ones at conflicting
//! leaves. A missing source is skipped silently, an empty document
//! contributes nothing, and a document that fails to parse is an error.
//!
//! Format is detected from the file extension:
//! - `.yaml`, `.yml` -> YAML
//! - `.json` -> JSON
//! - `.toml` -> TOML

use crate::{Error, Result};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Shared defaults layer, shipped with the provisioning tree.
pub const DEFAULT_SETTINGS_FILE: &str = "provisioning/default.settings.yml";

/// Project-local override layer.
pub const PROJECT_SETTINGS_FILE: &str = "settings.yml";

const USER_LAYER_FILE: &str = "settings.yml";

/// Ordered candidate configuration sources.
#[derive(Debug, Clone)]
pub struct SourceList {
    locations: Vec<PathBuf>,
}

impl SourceList {
    /// Create a source list from explicit locations, lowest precedence
    /// first.
    pub fn new(locations: Vec<PathBuf>) -> Self {
        Self { locations }
    }

    /// The default two-layer list for a project root: the shipped defaults
    /// under `provisioning/`, then the project-local `settings.yml`.
    pub fn for_project_root(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            locations: vec![
                root.join(DEFAULT_SETTINGS_FILE),
                root.join(PROJECT_SETTINGS_FILE),
            ],
        }
    }

    /// Prepend the user-global layer (`<config_dir>/devenv/settings.yml`).
    ///
    /// The user layer sits below every project layer, so project settings
    /// always win. When no platform config directory exists the list is
    /// returned unchanged.
    pub fn with_user_layer(self) -> Self {
        match dirs::config_dir() {
            Some(config_dir) => self.with_user_layer_at(config_dir.join("devenv")),
            None => self,
        }
    }

    /// Prepend a user-global layer rooted at a specific directory.
    ///
    /// This is primarily useful for testing, where the global layer must
    /// not depend on the real user configuration.
    pub fn with_user_layer_at(mut self, dir: impl Into<PathBuf>) -> Self {
        self.locations.insert(0, dir.into().join(USER_LAYER_FILE));
        self
    }

    /// The candidate locations, lowest precedence first.
    pub fn locations(&self) -> &[PathBuf] {
        &self.locations
    }
}

/// Load one source into a tree fragment.
///
/// Returns `Ok(None)` when the source is absent or parses to an empty
/// document; both contribute nothing to the fold.
pub(crate) fn load_fragment(path: &Path) -> Result<Option<Value>> {
    if !path.is_file() {
        tracing::debug!(?path, "Source not found — skipping");
        return Ok(None);
    }

    let content = fs::read_to_string(path)?;
    let fragment = parse_source(path, &content)?;
    if fragment.is_null() {
        tracing::debug!(?path, "Source is empty — skipping");
        return Ok(None);
    }

    Ok(Some(fragment))
}

/// Parse source content into a generic tree, dispatching on extension.
fn parse_source(path: &Path, content: &str) -> Result<Value> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("");

    match extension.to_lowercase().as_str() {
        "yaml" | "yml" => serde_yaml::from_str(content).map_err(|e| Error::SourceParse {
            path: path.to_path_buf(),
            format: "YAML".into(),
            message: e.to_string(),
        }),
        "json" => serde_json::from_str(content).map_err(|e| Error::SourceParse {
            path: path.to_path_buf(),
            format: "JSON".into(),
            message: e.to_string(),
        }),
        "toml" => toml::from_str(content).map_err(|e| Error::SourceParse {
            path: path.to_path_buf(),
            format: "TOML".into(),
            message: e.to_string(),
        }),
        _ => Err(Error::UnsupportedFormat {
            extension: extension.to_string(),
        }),
    }
}
