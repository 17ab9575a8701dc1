//! Navigating and building Value trees at runtime.
//!
//! Run with: cargo run --example dynamic_values

use kson::{kson, parse, to_string_pretty, to_value, Kind, Value};
use serde::Serialize;
use std::error::Error;

#[derive(Serialize)]
struct User {
    id: u32,
    name: String,
    roles: Vec<String>,
}

fn describe(value: &Value, depth: usize) {
    let pad = "  ".repeat(depth);
    match value {
        Value::Object(obj) => {
            for (key, child) in obj {
                println!("{}{}: {}", pad, key, child.kind());
                describe(child, depth + 1);
            }
        }
        Value::Array(arr) => {
            for (i, child) in arr.iter().enumerate() {
                println!("{}[{}]: {}", pad, i, child.kind());
                describe(child, depth + 1);
            }
        }
        _ => {}
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    // Build a document with the kson! macro
    let mut config = kson!({
        host: "localhost",
        port: 8080,
        features: ["auth", "logging"],
        debug: true
    });

    // Edit it in place
    if let Some(features) = config
        .as_object_mut()
        .and_then(|obj| obj.get_mut("features"))
        .and_then(Value::as_array_mut)
    {
        features.push(Value::from("metrics"));
    }

    println!("Config:\n{}\n", to_string_pretty(&config)?);

    // Checked access never converts between kinds
    let port = config.get("port");
    println!("port as integer: {:?}", port.and_then(Value::as_i64));
    println!("port as string:  {:?}", port.and_then(Value::as_str));
    let wrong: Result<String, _> = String::try_from(Value::from(8080));
    println!("String::try_from(8080): {}\n", wrong.unwrap_err());

    // Walk a parsed document
    let doc = parse("{a: [1, 2.5, {b: NULL}], c: \"text\"}")?;
    describe(&Value::Object(doc), 0);

    // Convert an existing struct
    let user = User {
        id: 123,
        name: "Alice".to_string(),
        roles: vec!["admin".to_string()],
    };
    let user_value = to_value(&user)?;
    println!("\nUser as Value: {}", user_value);
    println!("  kind is object: {}", user_value.kind() == Kind::Object);

    Ok(())
}
