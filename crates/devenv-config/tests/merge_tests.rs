//! Merge algebra tests: identity, right-bias, sibling preservation

use devenv_config::deep_merge;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::{Value, json};

/// Random settings-shaped trees: scalars, lists, and nested mappings.
fn arb_tree() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-1000i64..1000).prop_map(|n| json!(n)),
        "[a-z]{0,8}".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-z]{1,6}", inner, 0..4)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

proptest! {
    #[test]
    fn merging_a_tree_with_itself_is_identity(tree in arb_tree()) {
        prop_assert_eq!(deep_merge(&tree, &tree), tree);
    }

    #[test]
    fn merge_never_mutates_its_inputs(base in arb_tree(), overlay in arb_tree()) {
        let base_before = base.clone();
        let overlay_before = overlay.clone();
        let _ = deep_merge(&base, &overlay);
        prop_assert_eq!(base, base_before);
        prop_assert_eq!(overlay, overlay_before);
    }

    #[test]
    fn overlay_scalar_always_wins(base in arb_tree(), n in -1000i64..1000) {
        let base = json!({"k": base});
        let overlay = json!({"k": n});
        prop_assert_eq!(deep_merge(&base, &overlay), overlay);
    }
}

#[test]
fn right_bias_at_conflicting_scalar_leaf() {
    let a = json!({"x": 1});
    let b = json!({"x": 2});
    assert_eq!(deep_merge(&a, &b)["x"], json!(2));
}

#[test]
fn deep_merge_preserves_siblings() {
    let a = json!({"a": {"x": 1}});
    let b = json!({"a": {"y": 2}});
    assert_eq!(deep_merge(&a, &b), json!({"a": {"x": 1, "y": 2}}));
}

#[test]
fn non_mapping_conflict_never_partially_merges() {
    // A list never splices into a mapping or another list
    let a = json!({"k": {"keep": 1}});
    let b = json!({"k": ["replacement"]});
    assert_eq!(deep_merge(&a, &b), json!({"k": ["replacement"]}));
}

#[test]
fn left_to_right_fold_matches_sequential_overrides() {
    let layers = [
        json!({"x": 1, "a": true}),
        json!({"x": 2, "b": true}),
        json!({"x": 3}),
    ];

    let folded = layers
        .iter()
        .fold(json!({}), |acc, layer| deep_merge(&acc, layer));

    assert_eq!(folded, json!({"x": 3, "a": true, "b": true}));
}
