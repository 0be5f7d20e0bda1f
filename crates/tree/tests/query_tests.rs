use pretty_assertions::assert_eq;
use record_tree::{FieldMap, NodeId, Tree, TreeQuery};
use serde_json::{json, Value};

fn rec(value: Value) -> FieldMap {
    value.as_object().cloned().unwrap()
}

/// lv1 -> lv2 -> lv3 -> node, with group 1/2/1 along the chain
fn chain() -> (Tree<FieldMap>, NodeId) {
    let mut tree = Tree::new();
    let lv1 = tree.push(rec(json!({"level": 1, "group": 1})));
    let lv2 = tree.push_child(lv1, rec(json!({"level": 2, "group": 2})));
    let lv3 = tree.push_child(lv2, rec(json!({"level": 3, "group": 1})));
    let node = tree.push_child(lv3, rec(json!({"one": 1, "two": 2})));
    tree.set_root(lv1);
    (tree, node)
}

#[test]
fn test_ancestors_and_root_of() {
    let (tree, node) = chain();
    let root = tree.root().unwrap();

    let chain = tree.ancestors(node);
    assert_eq!(chain.len(), 3);
    assert_eq!(tree.field(chain[0], "level"), Some(&json!(3)));
    assert_eq!(tree.field(chain[1], "level"), Some(&json!(2)));
    assert_eq!(chain[2], root);

    assert_eq!(tree.root_of(node), Some(root));
    // a node with no parent has no root of its own
    assert_eq!(tree.root_of(root), None);
    assert_eq!(tree.ancestors(root), Vec::<NodeId>::new());
}

#[test]
fn test_find_ancestor_with_predicate() {
    let (tree, node) = chain();
    let found = tree.find_ancestor(node, |record| record.get("level") == Some(&json!(2)));
    assert_eq!(tree.field(found.unwrap(), "group"), Some(&json!(2)));

    let missing = tree.find_ancestor(node, |record| record.get("level") == Some(&json!(9)));
    assert_eq!(missing, None);
}

#[test]
fn test_find_ancestor_by_value() {
    let (tree, node) = chain();

    let nearest = tree.find_ancestor_by_value(node, "group", &[json!(1)]).unwrap();
    assert_eq!(tree.field(nearest, "level"), Some(&json!(3)));

    let mid = tree.find_ancestor_by_value(node, "group", &[json!(2)]).unwrap();
    assert_eq!(tree.field(mid, "level"), Some(&json!(2)));

    assert_eq!(tree.find_ancestor_by_value(node, "group", &[json!(9)]), None);
}

#[test]
fn test_filter_ancestors_by_value_nearest_first() {
    let (tree, node) = chain();

    let matches = tree.filter_ancestors_by_value(node, "group", &[json!(1)]);
    assert_eq!(matches.len(), 2);
    assert_eq!(tree.field(matches[0], "level"), Some(&json!(3)));
    assert_eq!(tree.field(matches[1], "level"), Some(&json!(1)));

    let single = tree.filter_ancestors_by_value(node, "level", &[json!(2)]);
    assert_eq!(single.len(), 1);
    assert_eq!(tree.field(single[0], "group"), Some(&json!(2)));
}

#[test]
fn test_empty_value_set_short_circuits() {
    let (tree, node) = chain();
    let root = tree.root().unwrap();

    assert_eq!(tree.find_ancestor_by_value(node, "group", &[]), None);
    assert_eq!(tree.filter_ancestors_by_value(node, "group", &[]).len(), 0);
    assert_eq!(tree.find_descendant_by_value(root, "group", &[]), None);
    assert_eq!(tree.filter_descendants_by_value(root, "group", &[]).len(), 0);
}

#[test]
fn test_null_fields_never_match() {
    let mut tree = Tree::new();
    let root = tree.push(rec(json!({"group": null})));
    let node = tree.push_child(root, rec(json!({"one": 1})));

    assert_eq!(tree.find_ancestor_by_value(node, "group", &[json!(null)]), None);
    assert_eq!(tree.find_ancestor_by_value(node, "group", &[json!(1)]), None);
    assert_eq!(tree.find_descendant_by_value(root, "group", &[json!(null)]), None);
}

#[test]
fn test_find_descendant_by_value() {
    let (tree, _node) = chain();
    let root = tree.root().unwrap();

    let lv3 = tree.find_descendant_by_value(root, "level", &[json!(3)]).unwrap();
    assert_eq!(tree.field(lv3, "group"), Some(&json!(1)));

    let lv2 = tree.find_descendant_by_value(root, "level", &[json!(2)]).unwrap();
    assert_eq!(tree.field(lv2, "group"), Some(&json!(2)));

    let leaf = tree.find_descendant_by_value(root, "one", &[json!(1)]).unwrap();
    assert_eq!(tree.field(leaf, "two"), Some(&json!(2)));

    assert_eq!(tree.find_descendant_by_value(root, "one", &[json!(12)]), None);
}

#[test]
fn test_filter_descendants_by_value() {
    let mut tree = Tree::new();
    let lv1 = tree.push(rec(json!({"level": 1, "group": 1})));
    let lv2 = tree.push_child(lv1, rec(json!({"level": 2, "group": 2})));
    let lv3 = tree.push_child(lv2, rec(json!({"level": 3, "group": 2})));
    let leaf = tree.push_child(lv3, rec(json!({"one": 1, "two": 2})));

    let matches = tree.filter_descendants_by_value(lv1, "group", &[json!(2)]);
    assert_eq!(matches, vec![lv2, lv3]);

    let matches = tree.filter_descendants_by_value(lv1, "one", &[json!(1)]);
    assert_eq!(matches, vec![leaf]);

    assert_eq!(tree.filter_descendants_by_value(lv1, "one", &[json!(12)]).len(), 0);
}

#[test]
fn test_descendant_traversal_is_preorder() {
    // first child's whole subtree is visited before the second child
    let mut tree = Tree::new();
    let root = tree.push(rec(json!({"id": "root"})));
    let a = tree.push_child(root, rec(json!({"id": "a", "flag": 1})));
    let a1 = tree.push_child(a, rec(json!({"id": "a1", "flag": 1})));
    let b = tree.push_child(root, rec(json!({"id": "b", "flag": 1})));

    let matches = tree.filter_descendants_by_value(root, "flag", &[json!(1)]);
    assert_eq!(matches, vec![a, a1, b]);

    let first = tree.find_descendant_by_value(root, "flag", &[json!(1)]);
    assert_eq!(first, Some(a));
}

#[test]
fn test_membership_over_several_values() {
    let (tree, node) = chain();
    let matches = tree.filter_ancestors_by_value(node, "level", &[json!(1), json!(3)]);
    assert_eq!(matches.len(), 2);
    assert_eq!(tree.field(matches[0], "level"), Some(&json!(3)));
    assert_eq!(tree.field(matches[1], "level"), Some(&json!(1)));
}

#[test]
fn test_column_projection() {
    let mut tree = Tree::new();
    let root = tree.push(rec(json!({"id": "root"})));
    tree.push_child(root, rec(json!({"name": "alpha", "code": "a"})));
    tree.push_child(root, rec(json!({"name": "beta", "code": "b"})));
    tree.push_child(root, rec(json!({"name": "gamma"})));

    let all = tree.filter_descendants(root, |_| true);
    let names = tree.column(&all, "name");
    assert_eq!(names, vec![json!("alpha"), json!("beta"), json!("gamma")]);

    // absent fields project as null
    let codes = tree.column(&all, "code");
    assert_eq!(codes, vec![json!("a"), json!("b"), json!(null)]);
}

#[test]
fn test_keyed_column_projection() {
    let mut tree = Tree::new();
    let root = tree.push(rec(json!({"id": "root"})));
    tree.push_child(root, rec(json!({"name": "alpha", "code": "a"})));
    tree.push_child(root, rec(json!({"name": "beta", "code": "b"})));

    let all = tree.filter_descendants(root, |_| true);
    let by_code = tree.keyed_column(&all, "name", "code");
    assert_eq!(
        Value::Object(by_code),
        json!({"a": "alpha", "b": "beta"})
    );
}

#[test]
fn test_keyed_column_positional_fallback_and_overwrite() {
    let mut tree = Tree::new();
    let root = tree.push(rec(json!({"id": "root"})));
    tree.push_child(root, rec(json!({"name": "alpha", "code": "a"})));
    tree.push_child(root, rec(json!({"name": "beta"})));
    tree.push_child(root, rec(json!({"name": "gamma", "code": ""})));
    tree.push_child(root, rec(json!({"name": "delta", "code": "a"})));

    let all = tree.filter_descendants(root, |_| true);
    let projection = tree.keyed_column(&all, "name", "code");

    // keyless entries append positionally; the duplicate key overwrites
    // in place
    assert_eq!(
        Value::Object(projection),
        json!({"a": "delta", "0": "beta", "1": "gamma"})
    );
}
