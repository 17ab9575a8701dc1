use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use kson::{
    from_reader, from_str, from_value, to_string, to_string_pretty, to_value, to_writer, Error,
    KsonOptions, LiteralCase, Number, Value,
};

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct User {
    id: u32,
    name: String,
    active: bool,
    tags: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Product {
    sku: String,
    price: f64,
    quantity: u32,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Order {
    order_id: u32,
    customer: User,
    items: Vec<Product>,
    total: f64,
    note: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Wrapper<T> {
    value: T,
}

fn alice() -> User {
    User {
        id: 123,
        name: "Alice".to_string(),
        active: true,
        tags: vec!["admin".to_string(), "developer".to_string()],
    }
}

fn order() -> Order {
    Order {
        order_id: 12345,
        customer: alice(),
        items: vec![
            Product {
                sku: "WIDGET-001".to_string(),
                price: 29.99,
                quantity: 2,
            },
            Product {
                sku: "GADGET-002".to_string(),
                price: 49.99,
                quantity: 1,
            },
        ],
        total: 109.97,
        note: None,
    }
}

fn assert_roundtrip<T>(original: T)
where
    T: Serialize + for<'de> Deserialize<'de> + PartialEq + std::fmt::Debug,
{
    let wrapped = Wrapper { value: original };
    let kson = to_string(&wrapped).unwrap();
    let deserialized: Wrapper<T> = from_str(&kson).unwrap();
    assert_eq!(wrapped, deserialized, "round trip through {}", kson);
}

#[test]
fn test_simple_struct() {
    let kson = to_string(&alice()).unwrap();
    assert_eq!(
        kson,
        r#"{id:123,name:"Alice",active:true,tags:["admin","developer"]}"#
    );

    let user_back: User = from_str(&kson).unwrap();
    assert_eq!(alice(), user_back);
}

#[test]
fn test_nested_struct() {
    let kson = to_string_pretty(&order()).unwrap();
    println!("Order KSON:\n{}", kson);

    assert!(kson.contains("\n  customer: {\n    id: 123,"));
    assert!(kson.contains("\n  note: null\n}"));

    let order_back: Order = from_str(&kson).unwrap();
    assert_eq!(order(), order_back);
}

#[test]
fn test_hand_written_document() {
    let kson = r#"
        // order exported by hand
        {
            order_id: 0x3039,
            customer: {
                id: 123, name: "Alice", active: TRUE,
                tags: ["admin", "developer",],
            },
            /* two line items */
            items: [
                {sku: "WIDGET-001", price: 29.99, quantity: 2},
                {sku: "GADGET-002", price: 49.99, quantity: +1},
            ],
            total: 109.97,
            note: NULL,
        }
    "#;

    let parsed: Order = from_str(kson).unwrap();
    assert_eq!(parsed, order());
}

#[test]
fn test_primitives() {
    assert_roundtrip(42i32);
    assert_roundtrip(3.5f64);
    assert_roundtrip(true);
    assert_roundtrip(false);
    assert_roundtrip("hello world".to_string());
    assert_roundtrip('c');
    assert_roundtrip(vec![1, 2, 3, 4, 5]);
    assert_roundtrip(());
}

#[test]
fn test_numbers() {
    assert_roundtrip(0i8);
    assert_roundtrip(127i8);
    assert_roundtrip(-128i8);
    assert_roundtrip(32767i16);
    assert_roundtrip(-32768i16);
    assert_roundtrip(2147483647i32);
    assert_roundtrip(-2147483648i32);
    assert_roundtrip(0i64);
    assert_roundtrip(i64::MAX);
    assert_roundtrip(i64::MIN);

    assert_roundtrip(255u8);
    assert_roundtrip(65535u16);
    assert_roundtrip(4294967295u32);

    assert_roundtrip(0.0f32);
    assert_roundtrip(-2.5f32);
    assert_roundtrip(0.0f64);
    assert_roundtrip(4.25f64);
    assert_roundtrip(-5.75f64);
    assert_roundtrip(1e100f64);
    assert_roundtrip(0.1f64 + 0.2f64);
}

#[test]
fn test_whole_floats_stay_floats() {
    let kson = to_string(&Wrapper { value: 2.0f64 }).unwrap();
    assert_eq!(kson, "{value:2.0}");

    let value: Value = from_str(&kson).unwrap();
    assert_eq!(value.get("value"), Some(&Value::Number(Number::Float(2.0))));
}

#[test]
fn test_special_strings() {
    let special_strings = [
        "",
        "hello, world",
        "line1\nline2",
        "tab\there",
        "carriage\rreturn",
        "back\\slash",
        "\"quoted\"",
        "it's",
        "// not a comment",
        "/* not a comment */",
        "{ not: an object }",
        "true",
        "0xff",
        "héllo wörld ✓",
        "\\u0041",
    ];

    for s in special_strings {
        assert_roundtrip(s.to_string());
    }
}

#[test]
fn test_enums() {
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    enum Status {
        Active,
        Suspended { days: u32 },
        Renamed(String),
        Moved(i32, i32),
    }

    assert_roundtrip(Status::Active);
    assert_roundtrip(Status::Suspended { days: 3 });
    assert_roundtrip(Status::Renamed("bob".to_string()));
    assert_roundtrip(Status::Moved(-1, 2));

    let kson = to_string(&Wrapper {
        value: Status::Suspended { days: 3 },
    })
    .unwrap();
    assert_eq!(kson, "{value:{Suspended:{days:3}}}");
}

#[test]
fn test_maps() {
    let mut map = BTreeMap::new();
    map.insert("first".to_string(), vec![1.5, 2.5]);
    map.insert("second".to_string(), vec![]);

    let kson = to_string(&map).unwrap();
    assert_eq!(kson, "{first:[1.5,2.5],second:[]}");

    let back: BTreeMap<String, Vec<f64>> = from_str(&kson).unwrap();
    assert_eq!(map, back);
}

#[test]
fn test_invalid_keys() {
    let mut map = BTreeMap::new();
    map.insert("has space", 1);
    assert_eq!(
        to_string(&map).unwrap_err(),
        Error::InvalidKey("has space".to_string())
    );

    let mut map = BTreeMap::new();
    map.insert("9lives", 1);
    assert!(matches!(to_string(&map), Err(Error::InvalidKey(_))));
}

#[test]
fn test_non_finite_float_rejected() {
    let result = to_string(&Wrapper { value: f64::NAN });
    assert!(matches!(result, Err(Error::UnsupportedType(_))));
}

#[test]
fn test_top_level_must_be_object() {
    assert!(matches!(to_string(&42), Err(Error::UnsupportedType(_))));
    assert!(matches!(to_string(&vec![1]), Err(Error::UnsupportedType(_))));
    assert!(matches!(to_string(&None::<i32>), Err(Error::UnsupportedType(_))));
    assert!(to_string(&Some(alice())).is_ok());
}

#[test]
fn test_options() {
    let options = KsonOptions::pretty()
        .with_indent(4)
        .with_sort_keys(true)
        .with_literal_case(LiteralCase::Upper);

    let kson = kson::to_string_with_options(&order(), options).unwrap();
    println!("Sorted KSON:\n{}", kson);

    assert!(kson.starts_with("{\n    customer: {\n        active: TRUE,"));
    assert!(kson.contains("note: NULL"));

    let order_back: Order = from_str(&kson).unwrap();
    assert_eq!(order(), order_back);
}

#[test]
fn test_to_value() {
    let value = to_value(&alice()).unwrap();

    match value {
        Value::Object(obj) => {
            assert_eq!(obj.get("id"), Some(&Value::Number(Number::Integer(123))));
            assert_eq!(obj.get("name"), Some(&Value::String("Alice".to_string())));
            assert_eq!(obj.get("active"), Some(&Value::Bool(true)));

            if let Some(Value::Array(tags)) = obj.get("tags") {
                assert_eq!(tags.len(), 2);
                assert_eq!(tags[0], Value::String("admin".to_string()));
            } else {
                panic!("Expected tags to be an array");
            }
        }
        _ => panic!("Expected object"),
    }
}

#[test]
fn test_from_value() {
    let value = to_value(&order()).unwrap();
    let order_back: Order = from_value(value).unwrap();
    assert_eq!(order(), order_back);

    let wrong: Result<User, _> = from_value(Value::from("not a user"));
    assert!(wrong.is_err());
}

#[test]
fn test_value_roundtrip() {
    let value: Value = from_str("{a: [1, 2.5, \"x\", NULL, {b: FALSE}]}").unwrap();
    let kson = to_string(&value).unwrap();
    assert_eq!(kson, "{a:[1,2.5,\"x\",null,{b:false}]}");
    let back: Value = from_str(&kson).unwrap();
    assert_eq!(value, back);
}

#[test]
fn test_writer_and_reader() {
    let mut buffer = Vec::new();
    to_writer(&mut buffer, &alice()).unwrap();

    let user_back: User = from_reader(buffer.as_slice()).unwrap();
    assert_eq!(alice(), user_back);
}

#[test]
fn test_syntax_errors_surface_through_serde() {
    let err = from_str::<User>("{id: 1, name: \"x\" active: true, tags: []}").unwrap_err();
    assert!(err.is_syntax());
    assert_eq!(err.line(), Some(1));

    let err = from_str::<User>("{id: 1, name: \"x\", active: true}").unwrap_err();
    assert!(!err.is_syntax());
    assert!(err.to_string().contains("tags"));
}

#[test]
fn test_matches_json_model() {
    let kson = "{name: \"kson\", n: [1, 2.5, -3], flag: TRUE, none: NULL, nested: {k: \"v\"}}";
    let json = r#"{"name": "kson", "n": [1, 2.5, -3], "flag": true, "none": null, "nested": {"k": "v"}}"#;

    let from_kson: serde_json::Value = from_str(kson).unwrap();
    let from_json: serde_json::Value = serde_json::from_str(json).unwrap();
    assert_eq!(from_kson, from_json);
}
