//! Reading a hand-written, commented configuration file.
//!
//! Run with: cargo run --example parse_config

use kson::{from_str, parse, Parser, Value};
use serde::Deserialize;
use std::error::Error;

const CONFIG: &str = r#"
// edge proxy configuration
{
    name: "edge-01",
    listen: { host: "0.0.0.0", port: 0x1f90 },

    /* upstream pool; weights are relative */
    upstreams: [
        { host: "10.0.0.1", weight: 3, healthy: TRUE },
        { host: "10.0.0.2", weight: 1, healthy: FALSE },
    ],

    timeouts: { connect: 1.5, read: 3e1 },
    fallback: NULL,
}
"#;

#[derive(Debug, Deserialize)]
struct Listen {
    host: String,
    port: u16,
}

#[derive(Debug, Deserialize)]
struct Upstream {
    host: String,
    weight: u32,
    healthy: bool,
}

#[derive(Debug, Deserialize)]
struct Config {
    name: String,
    listen: Listen,
    upstreams: Vec<Upstream>,
    fallback: Option<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    // Typed access through serde; unknown keys such as `timeouts` are ignored
    let config: Config = from_str(CONFIG)?;
    println!("{} listens on {}:{}", config.name, config.listen.host, config.listen.port);
    for upstream in &config.upstreams {
        println!(
            "  upstream {} weight={} healthy={}",
            upstream.host, upstream.weight, upstream.healthy
        );
    }
    println!("  fallback: {:?}\n", config.fallback);

    // Untyped access to the same document
    let doc = parse(CONFIG)?;
    if let Some(timeouts) = doc.get_object("timeouts") {
        let read = timeouts.get("read").and_then(Value::as_number);
        println!("read timeout: {:?} (an integer, because it has no '.')\n", read);
    }

    // Diagnostics for a broken file
    let broken = "{\n  name: \"edge-02\",\n  listen: { port: 80 }\n  upstreams: []\n}";
    let mut parser = Parser::new(broken);
    if parser.parse().is_err() {
        print!("rejected:\n{}", parser.error_info());
    }

    Ok(())
}
