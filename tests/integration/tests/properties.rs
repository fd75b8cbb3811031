//! Property tests over randomly generated acyclic graphs.

use graphwalk_core::{Action, WalkConfig, Walker, walk, walk_with_cycle_detection};
use graphwalk_value::{Kind, Record, Value};
use proptest::prelude::*;

fn leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Unit),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        "[a-z]{0,4}".prop_map(Value::from),
        Just(Value::null_ptr()),
    ]
}

fn graph() -> impl Strategy<Value = Value> {
    leaf().prop_recursive(4, 48, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::list),
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::array),
            prop::collection::btree_map("[a-z]{1,3}", inner.clone(), 0..4).prop_map(Value::map),
            inner.clone().prop_map(Value::ptr),
            inner.clone().prop_map(Value::dynamic),
            prop::collection::vec(inner, 0..4).prop_map(|values| {
                let mut record = Record::new("Generated");
                for (i, value) in values.into_iter().enumerate() {
                    record.push(format!("f{}", i), value);
                }
                Value::from(record)
            }),
        ]
    })
}

/// Number of nodes a walk over an acyclic `value` must visit.
fn reachable(value: &Value) -> usize {
    1 + match value {
        Value::List(items) => items.borrow().iter().map(reachable).sum(),
        Value::Array(items) => items.iter().map(reachable).sum(),
        Value::Map(entries) => entries.borrow().values().map(|v| 1 + reachable(v)).sum(),
        Value::Ptr(Some(cell)) => reachable(&cell.borrow()),
        Value::Dynamic(Some(inner)) => reachable(inner),
        Value::Record(record) => record.fields().iter().map(|f| reachable(&f.value)).sum(),
        _ => 0,
    }
}

fn trace(root: &Value) -> Vec<(usize, Kind)> {
    let mut seen = Vec::new();
    walk(root, |node| {
        seen.push((node.depth(), node.kind()));
        Ok::<_, ()>(Action::Continue)
    })
    .unwrap();
    seen
}

proptest! {
    #[test]
    fn test_walk_visits_every_node_once(root in graph()) {
        let visits = trace(&root).len();
        prop_assert_eq!(visits, reachable(&root));
    }

    #[test]
    fn test_cycle_detection_changes_nothing_without_sharing(root in graph()) {
        let mut visits = 0;
        walk_with_cycle_detection(&root, |_| {
            visits += 1;
            Ok::<_, ()>(Action::Continue)
        })
        .unwrap();
        prop_assert_eq!(visits, reachable(&root));
    }

    #[test]
    fn test_stop_on_nth_visit(root in graph(), pick in any::<prop::sample::Index>()) {
        let n = pick.index(reachable(&root)) + 1;
        let mut visits = 0;
        walk(&root, |_| {
            visits += 1;
            Ok::<_, ()>(if visits == n { Action::Stop } else { Action::Continue })
        })
        .unwrap();
        prop_assert_eq!(visits, n);
    }

    #[test]
    fn test_read_only_walk_is_repeatable(root in graph()) {
        prop_assert_eq!(trace(&root), trace(&root));
    }

    #[test]
    fn test_max_depth_bounds_visited_depth(root in graph(), limit in 0usize..4) {
        let mut deepest = 0;
        Walker::new(WalkConfig::new().max_depth(limit))
            .walk(&root, |node| {
                deepest = deepest.max(node.depth());
                Ok::<_, ()>(Action::Continue)
            })
            .unwrap();
        prop_assert!(deepest <= limit);
    }
}
