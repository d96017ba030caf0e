use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::Result;
use vuex_common::errors::{PreconditionError, ValueError};
use vuex_common::types::{Function, PropertyKey, Value};
use vuex_common::utils::{assert, find, for_each_value, is_object, is_promise, partial};
use vuex_common::{list, object, vuex_assert};

#[test]
fn test_find_first_match_in_order() {
    let modules = vec!["root", "cart", "checkout", "cart"];
    assert_eq!(find(&modules, |m| m.starts_with('c')), Some(&"cart"));
    assert_eq!(find(&modules, |m| m.len() > 20), None);
    assert_eq!(modules, vec!["root", "cart", "checkout", "cart"]);

    let empty: Vec<i32> = Vec::new();
    assert_eq!(find(&empty, |_| true), None);
}

#[test]
fn test_find_on_value_list() {
    let items = list![
        object! { "id" => 1 },
        object! { "id" => 2, "tag" => "first" },
        object! { "id" => 2, "tag" => "second" }
    ];
    let list = items.as_list().unwrap();

    let hit = list
        .find(|item| item.get("id").and_then(|v| v.as_f64()) == Some(2.0))
        .unwrap();
    assert_eq!(hit.get("tag").and_then(|v| v.as_str().map(str::to_string)), Some("first".to_string()));
    assert!(hit.ptr_eq(&list.get(1).unwrap()));
    assert!(list.find(|item| item.is_null()).is_none());
    assert_eq!(list.len(), 3);
}

#[test]
fn test_is_object() -> Result<()> {
    assert!(!is_object(&Value::Null));
    assert!(is_object(&list![]));
    assert!(is_object(&object! {}));
    assert!(!is_object(&Value::from(42)));
    assert!(!is_object(&Value::from("text")));
    assert!(!is_object(&Value::from(true)));
    assert!(!is_object(&Value::function(|_| Value::Null)));
    assert!(is_object(&Value::date_from_millis(0)?));
    assert!(is_object(&Value::pattern("a", "")?));
    Ok(())
}

#[test]
fn test_is_promise() {
    let thenable = object! { "then" => Function::new(|_| Value::Null) };
    assert!(is_promise(&thenable));
    assert!(!is_promise(&object! {}));
    assert!(!is_promise(&object! { "then" => 1 }));
    assert!(!is_promise(&Value::Null));
    assert!(!is_promise(&list![Function::new(|_| Value::Null)]));

    // A hidden `then` still counts
    let hidden = object! {};
    hidden
        .as_map()
        .unwrap()
        .define("then", Function::new(|_| Value::Null), false);
    assert!(is_promise(&hidden));
}

#[test]
fn test_assert() {
    assert_eq!(assert(true, "x"), Ok(()));

    let err = assert(false, "x").unwrap_err();
    assert!(err.to_string().contains('x'));
    assert_eq!(err.message(), "x");
    assert_eq!(err, PreconditionError::new("x"));
}

#[test]
fn test_assert_macro_propagates() {
    fn register(name: &str) -> Result<usize, ValueError> {
        vuex_assert!(!name.is_empty(), "module name must not be empty");
        vuex_assert!(name != "root", "cannot register '{}' twice", name);
        Ok(name.len())
    }

    assert_eq!(register("cart").unwrap(), 4);
    match register("root") {
        Err(ValueError::Precondition(err)) => {
            assert_eq!(err.to_string(), "[vuex] cannot register 'root' twice")
        }
        other => panic!("unexpected result: {:?}", other),
    }
    assert!(register("").is_err());
}

#[test]
fn test_partial() {
    let square = |n: i64| n * n;
    let bound = partial(square, 5);
    assert_eq!(bound(), square(5));

    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let tracked = partial(
        move |s: String| {
            counter.fetch_add(1, Ordering::SeqCst);
            s.len()
        },
        "state".to_string(),
    );
    assert_eq!(tracked(), 5);
    assert_eq!(tracked(), 5);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_partial_shares_composites() {
    let state = object! { "count" => 1 };
    let read_count = partial(
        |s: Value| s.get("count").and_then(|v| v.as_f64()),
        state.clone(),
    );
    state.as_map().unwrap().set("count", 2);
    assert_eq!(read_count(), Some(2.0));
}

#[test]
fn test_function_partial() {
    let add_one = Function::new(|args| {
        let n = args.first().and_then(Value::as_f64).unwrap_or_default();
        Value::from(n + 1.0)
    });
    let bound = add_one.partial(Value::from(41));
    let result = bound.call(&[Value::from("ignored")]);
    assert_eq!(result.as_f64(), Some(42.0));
}

#[test]
fn test_for_each_value() {
    let counts = object! { "a" => 1, "b" => 2 };
    let mut seen = Vec::new();
    for_each_value(counts.as_map().unwrap(), |value, key| {
        seen.push((key.clone(), value.as_f64()));
    });
    assert_eq!(
        seen,
        vec![
            (PropertyKey::from("a"), Some(1.0)),
            (PropertyKey::from("b"), Some(2.0)),
        ]
    );
}

#[test]
fn test_for_each_value_skips_hidden_and_survives_mutation() {
    let state = object! { "a" => 1, "b" => 2 };
    let map = state.as_map().unwrap();
    map.define("hidden", 3, false);

    let mut keys = Vec::new();
    for_each_value(map, |_, key| {
        keys.push(key.to_string());
        map.set(format!("{}_seen", key), true);
    });
    assert_eq!(keys, vec!["a", "b"]);
    assert!(map.contains_key("a_seen"));
    assert!(map.contains_key("b_seen"));
}

#[test]
fn test_for_each_value_reads_values_at_dispatch() {
    let state = object! { "a" => 1, "b" => 2, "c" => 3 };
    let map = state.as_map().unwrap();

    let mut seen = Vec::new();
    for_each_value(map, |value, key| {
        if key.as_str() == Some("a") {
            map.set("b", 20);
            map.remove("c");
        }
        seen.push((key.to_string(), value.as_f64()));
    });
    assert_eq!(
        seen,
        vec![
            ("a".to_string(), Some(1.0)),
            ("b".to_string(), Some(20.0)),
            ("c".to_string(), None),
        ]
    );
}
