//! The resolved settings tree
//!
//! `Settings` owns the merged configuration exclusively. The loader
//! populates it, the derivation engine fills computed defaults into it, and
//! afterwards collaborators only ever read from it through `get`/`get_all`.

use crate::merge::deep_merge_into;
use crate::path::{PathSegment, get_at_path, parse_path};
use crate::Result;
use serde_json::{Map, Value};

/// Nested key-value settings addressed by dot-separated paths.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    root: Value,
}

impl Settings {
    /// Create an empty settings tree.
    pub fn new() -> Self {
        Self {
            root: Value::Object(Map::new()),
        }
    }

    /// Read the value at a dot-separated path.
    ///
    /// Returns `None` for missing keys, out-of-range indices, and
    /// traversal through values of the wrong shape. The returned value may
    /// itself be a scalar, a list, or a subtree.
    ///
    /// # Examples
    ///
    /// ```
    /// use devenv_config::Settings;
    /// use serde_json::json;
    ///
    /// let mut settings = Settings::new();
    /// settings.set("project.name", json!("demo"));
    ///
    /// assert_eq!(settings.get("project.name"), Some(&json!("demo")));
    /// assert_eq!(settings.get("project.owner"), None);
    /// ```
    pub fn get(&self, path: &str) -> Option<&Value> {
        get_at_path(&self.root, &parse_path(path))
    }

    /// Read the value at a path as a string slice.
    pub fn get_str(&self, path: &str) -> Option<&str> {
        self.get(path).and_then(Value::as_str)
    }

    /// Write a value at a dot-separated path.
    ///
    /// Builds a singleton tree holding only `value` at the full path and
    /// deep-merges it in, so every intermediate mapping level is created
    /// and sibling keys at every level survive. Never fails; an empty path
    /// leaves the tree unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use devenv_config::Settings;
    /// use serde_json::json;
    ///
    /// let mut settings = Settings::new();
    /// settings.set("network.host.name", json!("devbox"));
    /// settings.set("network.host.prefix", json!("www"));
    ///
    /// assert_eq!(settings.get("network.host.name"), Some(&json!("devbox")));
    /// assert_eq!(settings.get("network.host.prefix"), Some(&json!("www")));
    /// ```
    pub fn set(&mut self, path: &str, value: Value) {
        let segments = parse_path(path);
        if segments.is_empty() {
            return;
        }

        let singleton = singleton_tree(&segments, value);
        deep_merge_into(&mut self.root, &singleton);
    }

    /// Merge a source fragment over the current tree.
    ///
    /// Later fragments override earlier state at conflicting leaves.
    pub(crate) fn merge_fragment(&mut self, fragment: &Value) {
        deep_merge_into(&mut self.root, fragment);
    }

    /// The full resolved tree.
    pub fn get_all(&self) -> &Value {
        &self.root
    }

    /// The full resolved tree, serialized as pretty-printed JSON text.
    pub fn to_json_text(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.root)?)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the nested mapping containing only `value` at the segment chain.
///
/// Segments become mapping keys regardless of classification; `set` does
/// not splice into existing arrays.
fn singleton_tree(segments: &[PathSegment], value: Value) -> Value {
    let mut current = value;
    for segment in segments.iter().rev() {
        let mut level = Map::new();
        level.insert(segment.as_key(), current);
        current = Value::Object(level);
    }
    current
}
