//! Deep-merge of configuration trees
//!
//! The merger is the single combining operation in the crate: the loader
//! folds source fragments through it and `Settings::set` reuses it to graft
//! singleton paths into the tree. It recurses only when both sides of a
//! conflicting key are mappings; any other conflict is won outright by the
//! overlay, so lists and scalars are replaced whole, never spliced.

use serde_json::Value;

/// Deep merge two trees, producing a new tree.
///
/// Every key of `base` and `overlay` appears in the result. For a key
/// present in both, mappings merge recursively and anything else resolves
/// to the overlay's value. Inputs are not mutated, so the function is safe
/// to call repeatedly during loading and on every `set`.
///
/// # Examples
///
/// ```
/// use devenv_config::merge::deep_merge;
/// use serde_json::json;
///
/// let base = json!({"a": {"x": 1}, "kept": true});
/// let overlay = json!({"a": {"y": 2}});
/// assert_eq!(
///     deep_merge(&base, &overlay),
///     json!({"a": {"x": 1, "y": 2}, "kept": true})
/// );
/// ```
pub fn deep_merge(base: &Value, overlay: &Value) -> Value {
    let mut merged = base.clone();
    deep_merge_into(&mut merged, overlay);
    merged
}

/// In-place worker behind [`deep_merge`].
///
/// If both values are mappings, merge them recursively with `overlay`
/// taking precedence. Otherwise `overlay` replaces `base`.
pub(crate) fn deep_merge_into(base: &mut Value, overlay: &Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, overlay_val) in overlay_map {
                if let Some(base_val) = base_map.get_mut(key) {
                    deep_merge_into(base_val, overlay_val);
                } else {
                    base_map.insert(key.clone(), overlay_val.clone());
                }
            }
        }
        (base, overlay) => {
            *base = overlay.clone();
        }
    }
}
