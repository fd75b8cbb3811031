//! End-to-end traversal and rewrite scenarios.

use graphwalk_core::{
    Action, AssignError, Index, WalkConfig, Walker, assign, try_assign, walk,
    walk_with_cycle_detection,
};
use graphwalk_value::{Key, Kind, Record, Shared, Value, shared};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;

fn collect_strings(root: &Value) -> Vec<String> {
    let mut strings = Vec::new();
    walk_with_cycle_detection(root, |node| {
        if let Some(s) = node.value().as_str() {
            strings.push(s.to_string());
        }
        Ok::<_, ()>(Action::Continue)
    })
    .unwrap();
    strings.sort();
    strings
}

fn map_entry(map: &Value, key: &str) -> Option<Value> {
    let Value::Map(entries) = map else {
        return None;
    };
    entries.borrow().get(&Key::from(key)).cloned()
}

fn record_field(cell: &Shared<Value>, name: &str) -> Option<Value> {
    cell.borrow().as_record().and_then(|r| r.field(name)).cloned()
}

fn list_strings(value: &Value) -> Vec<String> {
    let Value::List(items) = value else {
        return Vec::new();
    };
    items
        .borrow()
        .iter()
        .filter_map(|v| v.as_str().map(String::from))
        .collect()
}

fn undynamic(value: Value) -> Option<Value> {
    match value {
        Value::Dynamic(Some(inner)) => Some(Value::clone(&inner)),
        _ => None,
    }
}

#[test]
fn test_self_referencing_record_terminates() {
    let cell = shared(Value::Unit);
    *cell.borrow_mut() = Value::from(
        Record::new("Example")
            .with_field("String", "hello")
            .with_field(
                "Map",
                Value::map([("world", Record::new("Inner").with_field("String", "!"))]),
            )
            .with_field("Self", Value::ptr_to(&cell)),
    );

    let strings = collect_strings(&Value::ptr_to(&cell));
    assert_eq!(strings, vec!["!", "hello", "world"]);

    // break the reference cycle
    *cell.borrow_mut() = Value::Unit;
}

#[test]
fn test_suffix_rewrite_reaches_every_container() {
    let cell = shared(Value::from(
        Record::new("Example")
            .with_field("String", "a")
            .with_field("List", Value::list(["b", "c"]))
            .with_field(
                "Map",
                Value::map([
                    ("boxed", Value::dynamic("f")),
                    ("list", Value::dynamic(Value::list(["d"]))),
                    ("plain", Value::from("e")),
                ]),
            ),
    ));
    let root = Value::ptr_to(&cell);

    let mut assigned = 0;
    let mut rejected = Vec::new();
    walk_with_cycle_detection(&root, |node| {
        if let Some(s) = node.value().as_str() {
            if try_assign(node, Value::from(format!("{} (edited)", s))) {
                assigned += 1;
            } else {
                rejected.push(s.to_string());
            }
        }
        Ok::<_, ()>(Action::Continue)
    })
    .unwrap();

    assert_eq!(assigned, 6);
    rejected.sort();
    // map keys are never settable
    assert_eq!(rejected, vec!["boxed", "list", "plain"]);

    assert_eq!(
        record_field(&cell, "String").and_then(|v| v.as_str().map(String::from)),
        Some("a (edited)".to_string())
    );
    assert_eq!(
        list_strings(&record_field(&cell, "List").unwrap()),
        vec!["b (edited)", "c (edited)"]
    );

    let map = record_field(&cell, "Map").unwrap();
    let plain = map_entry(&map, "plain").unwrap();
    assert_eq!(plain.as_str(), Some("e (edited)"));

    let boxed = map_entry(&map, "boxed").unwrap();
    assert_eq!(boxed.kind(), Kind::Dynamic);
    assert_eq!(undynamic(boxed).unwrap().as_str(), Some("f (edited)"));

    let list = undynamic(map_entry(&map, "list").unwrap()).unwrap();
    assert_eq!(list_strings(&list), vec!["d (edited)"]);

    assert_eq!(
        collect_strings(&root),
        vec![
            "a (edited)",
            "b (edited)",
            "boxed",
            "c (edited)",
            "d (edited)",
            "e (edited)",
            "f (edited)",
            "list",
            "plain",
        ]
    );
}

#[test]
fn test_root_without_storage_rejects_assignment() {
    let root = Value::from("root");
    let mut outcomes = Vec::new();
    walk(&root, |node| {
        let tried = try_assign(node, Value::from("x"));
        let strict = assign(node, Value::from("x"));
        outcomes.push((tried, strict));
        Ok::<_, ()>(Action::Continue)
    })
    .unwrap();

    assert_eq!(outcomes.len(), 1);
    let (tried, strict) = outcomes.pop().unwrap();
    assert!(!tried);
    assert!(matches!(strict, Err(AssignError::NotSettable { kind: Kind::Str })));
    assert_eq!(root.as_str(), Some("root"));
}

#[rstest]
#[case::first(1)]
#[case::middle(4)]
#[case::last(7)]
fn test_stop_after_n_visits(#[case] n: usize) {
    // list + 3 inner lists + 3 leaves
    let root = Value::list([Value::list([1]), Value::list([2]), Value::list([3])]);
    let mut visits = 0;
    walk(&root, |_| {
        visits += 1;
        Ok::<_, ()>(if visits == n { Action::Stop } else { Action::Continue })
    })
    .unwrap();
    assert_eq!(visits, n);
}

#[test]
fn test_skip_children_keeps_siblings() {
    let root = Value::ptr(
        Record::new("Tree")
            .with_field("left", Value::list(["l1", "l2"]))
            .with_field("right", Value::list(["r1", "r2"])),
    );

    let mut strings = Vec::new();
    walk(&root, |node| {
        if let Some(s) = node.value().as_str() {
            strings.push(s.to_string());
        }
        let is_left = node.kind() == Kind::List && node.index() == Some(&Index::Position(0));
        Ok::<_, ()>(if is_left { Action::SkipChildren } else { Action::Continue })
    })
    .unwrap();

    strings.sort();
    assert_eq!(strings, vec!["r1", "r2"]);
}

#[derive(Debug, PartialEq)]
struct Rejected(i64);

#[test]
fn test_visitor_error_is_returned_verbatim() {
    let cell = shared(Value::from(0));
    let root = Value::list([Value::from(1), Value::ptr_to(&cell), Value::from(-5)]);

    let result = walk(&root, |node| {
        if let Some(n) = node.value().as_int()
            && n < 0
        {
            return Err(Rejected(n));
        }
        if node.kind() == Kind::Int {
            try_assign(node, Value::from(42));
        }
        Ok(Action::Continue)
    });

    assert_eq!(result, Err(Rejected(-5)));
    // no rollback of edits made before the error
    let Value::List(items) = &root else {
        unreachable!()
    };
    assert_eq!(items.borrow()[0].as_int(), Some(42));
}

#[test]
fn test_read_only_walk_is_idempotent() {
    let root = Value::from(json!({
        "name": "graph",
        "tags": ["a", "b", {"nested": ["c"]}],
        "count": 3
    }));

    let first = collect_strings(&root);
    let second = collect_strings(&root);
    assert_eq!(first, second);
    assert_eq!(first, vec!["a", "b", "c", "count", "graph", "name", "nested", "tags"]);
}

#[test]
fn test_max_depth_visits_but_does_not_expand() {
    let root = Value::from(json!({"a": {"b": {"c": "deep"}}}));
    let walker = Walker::new(WalkConfig::new().max_depth(2));

    let mut strings = Vec::new();
    walker
        .walk(&root, |node| {
            if let Some(s) = node.value().as_str() {
                strings.push(s.to_string());
            }
            Ok::<_, ()>(Action::Continue)
        })
        .unwrap();

    // depth 1 holds "a" and its map; depth 2 holds "b" and the inner map
    strings.sort();
    assert_eq!(strings, vec!["a", "b"]);
}

#[test]
fn test_walk_shared_replaces_root() {
    let cell = shared(Value::from(json!(["x", "y"])));
    let walker = Walker::new(WalkConfig::new().detect_cycles(true));

    walker
        .walk_shared(&cell, |node| {
            if node.depth() == 0 {
                assign(node, Value::list(["replaced"]))?;
            }
            Ok::<_, AssignError>(Action::Continue)
        })
        .unwrap();

    assert_eq!(list_strings(&cell.borrow()), vec!["replaced"]);
}

#[test]
fn test_uppercase_json_document() {
    let root = Value::from(json!({
        "title": "hello",
        "tags": ["rust", "graph"],
        "meta": {"lang": "en", "draft": false}
    }));

    walk_with_cycle_detection(&root, |node| {
        let is_key = node.index().is_none() && node.parent().is_some_and(|p| p.kind() == Kind::Map);
        if let Some(s) = node.value().as_str()
            && !is_key
        {
            assign(node, Value::from(s.to_uppercase()))?;
        }
        Ok::<_, AssignError>(Action::Continue)
    })
    .unwrap();

    assert_eq!(map_entry(&root, "title").unwrap().as_str(), Some("HELLO"));
    assert_eq!(list_strings(&map_entry(&root, "tags").unwrap()), vec!["RUST", "GRAPH"]);
    let meta = map_entry(&root, "meta").unwrap();
    assert_eq!(map_entry(&meta, "lang").unwrap().as_str(), Some("EN"));
    assert_eq!(map_entry(&meta, "draft").unwrap().as_bool(), Some(false));
}
