// vuex_common/src/bin/deep_copy_example.rs
//
// Example walking through the value utilities: building state, copying it
// with and without extended fidelity, and guarding preconditions.

use anyhow::Result;
use vuex_common::types::{Function, Symbol, Value};
use vuex_common::utils::{
    assert, deep_clone, deep_copy, for_each_value, is_object, is_promise, partial, CopyOptions,
    DeepCopier,
};
use vuex_common::{list, object, Component, Logger};

fn main() -> Result<()> {
    env_logger::init();
    let logger = Logger::new_root(Component::Custom("Example"), "demo");

    println!("Vuex value utilities example");
    println!("----------------------------");

    // Example 1: Shared and circular state
    example_circular(&logger)?;

    // Example 2: Dates, patterns and hidden members
    example_extended()?;

    // Example 3: Iteration, predicates and partial application
    example_helpers();

    // Example 4: Depth-limited copying
    example_depth_limit()?;

    Ok(())
}

fn example_circular(logger: &Logger) -> Result<()> {
    println!("\n### Example 1: Shared and circular state ###");

    let shared = object! { "x" => 1 };
    let state = object! { "p" => shared.clone(), "q" => shared };
    if let Some(map) = state.as_map() {
        map.set("self", state.clone());
    }

    let copy = deep_copy(&state);
    let p = copy.get("p");
    let q = copy.get("q");
    let same_child = matches!((&p, &q), (Some(p), Some(q)) if p.ptr_eq(q));
    let cyclic = copy.get("self").map_or(false, |me| me.ptr_eq(&copy));
    println!("p and q still alias one object: {}", same_child);
    println!("self still points at the copy: {}", cyclic);
    logger.info("circular copy done");

    // Break the cycles so both graphs can be freed
    for value in [&state, &copy] {
        if let Some(map) = value.as_map() {
            map.clear();
        }
    }
    Ok(())
}

fn example_extended() -> Result<()> {
    println!("\n### Example 2: Dates, patterns and hidden members ###");

    let tag = Symbol::new(Some("meta"));
    let record = object! {
        "created" => Value::date_from_millis(1_000)?,
        "filter" => Value::pattern("^todo", "i")?,
    };
    if let Some(map) = record.as_map() {
        map.define(&tag, "internal", true);
        map.define("version", 3, false);
    }

    let basic = deep_copy(&record);
    let full = deep_clone(&record);

    println!("basic copy keys: {:?}", basic.as_map().map(|m| m.own_keys()));
    println!("full clone keys: {:?}", full.as_map().map(|m| m.own_keys()));
    println!(
        "cloned date: {:?}",
        full.get("created").and_then(|d| d.as_date().map(|d| d.to_rfc3339()))
    );
    println!(
        "cloned pattern matches 'TODO: x': {}",
        full.get("filter")
            .and_then(|p| p.as_pattern().map(|p| p.is_match("TODO: x")))
            .unwrap_or(false)
    );
    Ok(())
}

fn example_helpers() {
    println!("\n### Example 3: Iteration, predicates and partial application ###");

    let counts = object! { "a" => 1, "b" => 2 };
    if let Some(map) = counts.as_map() {
        for_each_value(map, |value, key| println!("{} = {:?}", key, value));
    }

    let thenable = object! { "then" => Function::new(|_| Value::Null) };
    println!("is_object(list) = {}", is_object(&list![1, 2]));
    println!("is_promise(thenable) = {}", is_promise(&thenable));

    let greet = partial(|name: &str| format!("hello, {}", name), "store");
    println!("{}", greet());

    if let Err(err) = assert(false, "store not installed") {
        println!("assertion failed as expected: {}", err);
    }
}

fn example_depth_limit() -> Result<()> {
    println!("\n### Example 4: Depth-limited copying ###");

    let deep = object! { "a" => object! { "b" => object! { "c" => 1 } } };
    let copier = DeepCopier::new(CopyOptions::basic().with_max_depth(2))?;
    match copier.copy(&deep) {
        Ok(_) => println!("copied within limit"),
        Err(err) => println!("copy rejected: {}", err),
    }
    Ok(())
}
