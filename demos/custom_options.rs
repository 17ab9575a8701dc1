//! Customizing how KSON is written.
//!
//! Run with: cargo run --example custom_options

use kson::{to_string, to_string_with_options, KsonOptions, LiteralCase};
use serde::Serialize;
use std::error::Error;

#[derive(Serialize)]
struct Service {
    name: String,
    replicas: u32,
    ratio: f64,
    enabled: bool,
    owner: Option<String>,
    ports: Vec<u16>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let service = Service {
        name: "api".to_string(),
        replicas: 3,
        ratio: 1.0,
        enabled: true,
        owner: None,
        ports: vec![80, 443],
    };

    println!("Compact:\n{}\n", to_string(&service)?);

    println!(
        "Pretty:\n{}\n",
        to_string_with_options(&service, KsonOptions::pretty())?
    );

    println!(
        "Pretty, 4-space indent, sorted keys:\n{}\n",
        to_string_with_options(
            &service,
            KsonOptions::pretty().with_indent(4).with_sort_keys(true)
        )?
    );

    println!(
        "Upper-case literals:\n{}",
        to_string_with_options(
            &service,
            KsonOptions::new().with_literal_case(LiteralCase::Upper)
        )?
    );

    Ok(())
}
