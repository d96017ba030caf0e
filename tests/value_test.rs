use anyhow::Result;
use serde_json::json;
use vuex_common::errors::ValueError;
use vuex_common::types::{ListRef, MapRef, PropertyKey, Symbol, Value, ValueCategory};
use vuex_common::utils::{bool_value, null_value, number_value, string_value};
use vuex_common::{list, object};

#[test]
fn test_categories() -> Result<()> {
    assert_eq!(Value::Null.category(), ValueCategory::Null);
    assert_eq!(Value::from(1).category(), ValueCategory::Primitive);
    assert_eq!(Value::from("s").category(), ValueCategory::Primitive);
    assert_eq!(Value::function(|_| Value::Null).category(), ValueCategory::Function);
    assert_eq!(list![].category(), ValueCategory::List);
    assert_eq!(object! {}.category(), ValueCategory::Map);
    assert_eq!(Value::date_from_millis(5)?.category(), ValueCategory::Date);
    assert_eq!(Value::pattern("x", "g")?.category(), ValueCategory::Pattern);
    Ok(())
}

#[test]
fn test_converters() {
    assert!(null_value().is_null());
    assert_eq!(string_value("a").as_str(), Some("a"));
    assert_eq!(number_value(2.5).as_f64(), Some(2.5));
    assert_eq!(bool_value(true).as_bool(), Some(true));
    assert!(Value::from(None::<i32>).is_null());
    assert_eq!(Value::from(Some(3)).as_f64(), Some(3.0));
}

#[test]
fn test_map_keeps_insertion_order() {
    let map = MapRef::new();
    map.set("zeta", 1);
    map.set("alpha", 2);
    map.set("mid", 3);
    map.set("alpha", 20);
    assert_eq!(map.keys(), vec!["zeta", "alpha", "mid"]);
    assert_eq!(map.get("alpha").and_then(|v| v.as_f64()), Some(20.0));

    assert_eq!(map.remove("zeta").and_then(|v| v.as_f64()), Some(1.0));
    assert_eq!(map.keys(), vec!["alpha", "mid"]);
    assert!(map.remove("zeta").is_none());
}

#[test]
fn test_set_keeps_enumerability_define_replaces_it() {
    let map = MapRef::new();
    map.define("hidden", 1, false);
    map.set("hidden", 2);
    let property = map.get_property("hidden").unwrap();
    assert!(!property.enumerable);
    assert_eq!(property.value.as_f64(), Some(2.0));

    map.define("hidden", 3, true);
    assert_eq!(map.keys(), vec!["hidden"]);
}

#[test]
fn test_own_keys_put_symbols_last() {
    let first = Symbol::new(Some("first"));
    let map = MapRef::new();
    map.define(&first, 1, true);
    map.set("b", 2);
    map.define("c", 3, false);

    assert_eq!(
        map.own_keys(),
        vec![
            PropertyKey::from("b"),
            PropertyKey::from("c"),
            PropertyKey::from(&first),
        ]
    );
    assert_eq!(map.keys(), vec!["b"]);
    assert_eq!(map.len(), 3);
}

#[test]
fn test_symbols_compare_by_identity() {
    let a = Symbol::new(Some("tag"));
    let b = Symbol::new(Some("tag"));
    assert_ne!(a, b);
    assert_eq!(a, a.clone());
    assert_eq!(a.description(), Some("tag"));

    let map = MapRef::new();
    map.set(&a, "from a");
    assert!(map.get(&b).is_none());
    assert_eq!(map.get(&a).and_then(|v| v.as_str().map(str::to_string)), Some("from a".to_string()));
}

#[test]
fn test_list_set_pads_with_null() {
    let list = ListRef::new();
    list.set(2, "third");
    assert_eq!(list.len(), 3);
    assert!(list.get(0).unwrap().is_null());
    assert_eq!(list.get(2).and_then(|v| v.as_str().map(str::to_string)), Some("third".to_string()));
}

#[test]
fn test_handles_share_identity() {
    let state = object! { "count" => 1 };
    let alias = state.clone();
    alias.as_map().unwrap().set("count", 2);

    assert!(state.ptr_eq(&alias));
    assert_eq!(state.get("count").and_then(|v| v.as_f64()), Some(2.0));
    assert!(!state.ptr_eq(&object! { "count" => 2 }));
    assert!(state.structural_eq(&object! { "count" => 2 }));
}

#[test]
fn test_structural_eq() -> Result<()> {
    assert!(list![1, "a"].structural_eq(&list![1, "a"]));
    assert!(!list![1, "a"].structural_eq(&list!["a", 1]));
    assert!(!object! { "a" => 1 }.structural_eq(&object! { "a" => 1, "b" => 2 }));
    assert!(!object! { "a" => 1 }.structural_eq(&list![1]));
    assert!(Value::date_from_millis(7)?.structural_eq(&Value::date_from_millis(7)?));
    assert!(!Value::pattern("a", "i")?.structural_eq(&Value::pattern("a", "")?));

    // Cyclic graphs compare without looping
    let a = Value::new_map();
    a.as_map().unwrap().set("self", a.clone());
    let b = Value::new_map();
    b.as_map().unwrap().set("self", b.clone());
    assert!(a.structural_eq(&b));
    a.as_map().unwrap().clear();
    b.as_map().unwrap().clear();
    Ok(())
}

#[test]
fn test_json_round_trip() -> Result<()> {
    let source = json!({
        "count": 2,
        "items": [{"id": 1}, {"id": 2, "done": true}],
        "owner": null,
        "title": "todos"
    });
    let value = Value::from_json(source.clone());
    assert_eq!(value.get("title").and_then(|v| v.as_str().map(str::to_string)), Some("todos".to_string()));
    assert_eq!(value.to_json()?, source);
    Ok(())
}

#[test]
fn test_json_export_rules() -> Result<()> {
    let date = Value::date_from_millis(1000)?;
    let value = object! {
        "at" => date,
        "filter" => Value::pattern("^a", "gi")?,
        "ratio" => f64::NAN
    };
    value.as_map().unwrap().define("hidden", 1, false);
    value.as_map().unwrap().define(Symbol::new(None), 1, true);

    assert_eq!(
        value.to_json()?,
        json!({
            "at": "1970-01-01T00:00:01.000Z",
            "filter": "/^a/gi",
            "ratio": null
        })
    );

    let with_fn = object! { "f" => Value::function(|_| Value::Null) };
    assert!(matches!(with_fn.to_json(), Err(ValueError::Unsupported(_, _))));

    // Shared subtrees are fine, cycles are not
    let shared = object! { "x" => 1 };
    let tree = list![shared.clone(), shared];
    assert_eq!(tree.to_json()?, json!([{"x": 1}, {"x": 1}]));

    let cyclic = Value::new_map();
    cyclic.as_map().unwrap().set("self", cyclic.clone());
    assert!(matches!(cyclic.to_json(), Err(ValueError::CircularStructure(_))));
    cyclic.as_map().unwrap().clear();
    Ok(())
}

#[test]
fn test_invalid_patterns_and_dates() {
    assert!(matches!(Value::pattern("(", ""), Err(ValueError::InvalidPattern(_, _))));
    assert!(matches!(Value::pattern("a", "x"), Err(ValueError::InvalidPattern(_, _))));
    assert!(matches!(Value::pattern("a", "ii"), Err(ValueError::InvalidPattern(_, _))));
    assert!(matches!(Value::date_from_millis(i64::MAX), Err(ValueError::InvalidDate(_))));
}

#[test]
fn test_pattern_flags() -> Result<()> {
    let multi = Value::pattern("^b$", "m")?;
    assert!(multi.as_pattern().unwrap().is_match("a\nb\nc"));
    let single = Value::pattern("^b$", "")?;
    assert!(!single.as_pattern().unwrap().is_match("a\nb\nc"));

    let dotall = Value::pattern("a.b", "s")?;
    assert_eq!(dotall.as_pattern().unwrap().find("xa\nb"), Some((1, 4)));
    Ok(())
}

#[test]
fn test_json_number_export() -> Result<()> {
    assert_eq!(Value::from(3).to_json()?, json!(3));
    assert_eq!(Value::from(0).to_json()?, json!(0));
    assert_eq!(Value::from(2.5).to_json()?, json!(2.5));

    let negative_zero = Value::from(-0.0).to_json()?;
    assert!(negative_zero.is_f64());
    let back = Value::from_json(negative_zero).as_f64().unwrap();
    assert_eq!(back, 0.0);
    assert!(back.is_sign_negative());
    Ok(())
}
