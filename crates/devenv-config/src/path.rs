//! Dot-path parsing and traversal over configuration trees
//!
//! Settings are addressed with dot-separated paths. Each segment is
//! classified once, at parse time: a segment that reads as a non-negative
//! integer indexes into an array, anything else looks up a mapping key.
//!
//! # Path Syntax
//!
//! - Dot-separated keys: `network.host.name`
//! - Numeric segments index arrays: `php.extensions.0`
//!
//! # Examples
//!
//! ```
//! use devenv_config::path::{parse_path, PathSegment, get_at_path};
//! use serde_json::json;
//!
//! let path = parse_path("webserver.vhosts.0.host");
//! assert_eq!(path, vec![
//!     PathSegment::Key("webserver".to_string()),
//!     PathSegment::Key("vhosts".to_string()),
//!     PathSegment::Index(0),
//!     PathSegment::Key("host".to_string()),
//! ]);
//!
//! let value = json!({"webserver": {"vhosts": [{"host": "dev.local"}]}});
//! assert_eq!(get_at_path(&value, &path), Some(&json!("dev.local")));
//! ```

use serde_json::Value;

/// A segment of a path - either a mapping key or an array index
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// A key in a mapping (e.g., "host" in "network.host")
    Key(String),
    /// An index into an array (e.g., 0 in "extensions.0")
    Index(usize),
}

impl PathSegment {
    /// The segment as a mapping key, regardless of classification.
    ///
    /// Used when writing: `set` only ever creates mapping levels, so an
    /// index segment falls back to its decimal string form.
    pub fn as_key(&self) -> String {
        match self {
            PathSegment::Key(key) => key.clone(),
            PathSegment::Index(idx) => idx.to_string(),
        }
    }
}

/// Parse a dot-separated path string into segments.
///
/// Empty segments (from leading, trailing, or doubled dots) are dropped.
///
/// # Examples
///
/// ```
/// use devenv_config::path::{parse_path, PathSegment};
///
/// let path = parse_path("network.ip");
/// assert_eq!(path, vec![
///     PathSegment::Key("network".to_string()),
///     PathSegment::Key("ip".to_string()),
/// ]);
///
/// let path = parse_path("extensions.2");
/// assert_eq!(path, vec![
///     PathSegment::Key("extensions".to_string()),
///     PathSegment::Index(2),
/// ]);
/// ```
pub fn parse_path(path: &str) -> Vec<PathSegment> {
    path.split('.')
        .filter(|segment| !segment.is_empty())
        .map(|segment| match segment.parse::<usize>() {
            Ok(index) => PathSegment::Index(index),
            Err(_) => PathSegment::Key(segment.to_string()),
        })
        .collect()
}

/// Get a reference to the value at the given path.
///
/// Returns `None` as soon as a segment cannot be resolved: a missing key,
/// an out-of-range index, or a segment applied to a value of the wrong
/// shape. Traversal never fails loudly.
///
/// # Examples
///
/// ```
/// use devenv_config::path::{parse_path, get_at_path};
/// use serde_json::json;
///
/// let value = json!({"project": {"name": "demo"}});
/// assert_eq!(get_at_path(&value, &parse_path("project.name")), Some(&json!("demo")));
/// assert_eq!(get_at_path(&value, &parse_path("project.missing")), None);
/// ```
pub fn get_at_path<'a>(value: &'a Value, segments: &[PathSegment]) -> Option<&'a Value> {
    let mut current = value;
    for segment in segments {
        current = match segment {
            PathSegment::Key(key) => current.get(key)?,
            PathSegment::Index(idx) => current.get(*idx)?,
        };
    }
    Some(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_path_simple() {
        let path = parse_path("name");
        assert_eq!(path, vec![PathSegment::Key("name".to_string())]);
    }

    #[test]
    fn test_parse_path_dotted() {
        let path = parse_path("network.host.name");
        assert_eq!(
            path,
            vec![
                PathSegment::Key("network".to_string()),
                PathSegment::Key("host".to_string()),
                PathSegment::Key("name".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_path_numeric_segment_is_index() {
        let path = parse_path("extensions.0");
        assert_eq!(
            path,
            vec![
                PathSegment::Key("extensions".to_string()),
                PathSegment::Index(0),
            ]
        );
    }

    #[test]
    fn test_parse_path_skips_empty_segments() {
        let path = parse_path(".network..ip.");
        assert_eq!(
            path,
            vec![
                PathSegment::Key("network".to_string()),
                PathSegment::Key("ip".to_string()),
            ]
        );
    }

    #[test]
    fn test_as_key_for_index_segment() {
        assert_eq!(PathSegment::Index(12).as_key(), "12");
        assert_eq!(PathSegment::Key("vm".to_string()).as_key(), "vm");
    }

    #[test]
    fn test_get_at_path_nested() {
        let value = json!({"network": {"host": {"name": "devbox"}}});
        let path = parse_path("network.host.name");
        assert_eq!(get_at_path(&value, &path), Some(&json!("devbox")));
    }

    #[test]
    fn test_get_at_path_array_index() {
        let value = json!({"php": {"extensions": ["php-pear", "php5-curl"]}});
        let path = parse_path("php.extensions.1");
        assert_eq!(get_at_path(&value, &path), Some(&json!("php5-curl")));
    }

    #[test]
    fn test_get_at_path_missing_key() {
        let value = json!({"project": {"name": "demo"}});
        assert_eq!(get_at_path(&value, &parse_path("vm.name")), None);
    }

    #[test]
    fn test_get_at_path_index_out_of_range() {
        let value = json!({"list": [1, 2]});
        assert_eq!(get_at_path(&value, &parse_path("list.5")), None);
    }

    #[test]
    fn test_get_at_path_type_mismatch_degrades_to_absent() {
        // Traversing through a scalar is absence, not an error.
        let value = json!({"project": {"name": "demo"}});
        assert_eq!(get_at_path(&value, &parse_path("project.name.inner")), None);
    }

    #[test]
    fn test_get_at_path_empty_path_is_root() {
        let value = json!({"a": 1});
        assert_eq!(get_at_path(&value, &[]), Some(&value));
    }
}
