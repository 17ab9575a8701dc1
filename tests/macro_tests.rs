use kson::{kson, parse, to_string, KsonMap, Number, Value};

#[test]
fn test_kson_macro_null() {
    assert_eq!(kson!(null), Value::Null);
    assert_eq!(kson!(NULL), Value::Null);
}

#[test]
fn test_kson_macro_booleans() {
    assert_eq!(kson!(true), Value::Bool(true));
    assert_eq!(kson!(FALSE), Value::Bool(false));
}

#[test]
fn test_kson_macro_numbers() {
    assert_eq!(kson!(42), Value::Number(Number::Integer(42)));
    assert_eq!(kson!(3.5), Value::Number(Number::Float(3.5)));
    assert_eq!(kson!(-123), Value::Number(Number::Integer(-123)));
    assert_eq!(kson!(0x1f), Value::Number(Number::Integer(31)));
}

#[test]
fn test_kson_macro_strings() {
    assert_eq!(kson!("hello world"), Value::String("hello world".to_string()));
    assert_eq!(kson!(""), Value::String(String::new()));
}

#[test]
fn test_kson_macro_arrays() {
    assert_eq!(kson!([]), Value::Array(vec![]));

    assert_eq!(
        kson!([1, "hello", true, null, (-2)]),
        Value::Array(vec![
            Value::Number(Number::Integer(1)),
            Value::String("hello".to_string()),
            Value::Bool(true),
            Value::Null,
            Value::Number(Number::Integer(-2)),
        ])
    );

    assert_eq!(
        kson!([[1, 2], [], [[3]]]),
        Value::Array(vec![
            Value::Array(vec![Value::from(1), Value::from(2)]),
            Value::Array(vec![]),
            Value::Array(vec![Value::Array(vec![Value::from(3)])]),
        ])
    );
}

#[test]
fn test_kson_macro_objects() {
    assert_eq!(kson!({}), Value::Object(KsonMap::new()));

    let obj = kson!({
        name: "Alice",
        age: 30,
        address: {
            city: "Paris",
            zip: "75001"
        },
        tags: ["a", "b"],
    });

    let map = obj.as_object().unwrap();
    assert_eq!(map.len(), 4);
    assert_eq!(map.get("age"), Some(&Value::from(30)));
    assert_eq!(
        map.get_object("address").and_then(|a| a.get("city")),
        Some(&Value::from("Paris"))
    );
    assert_eq!(map.get_array("tags").map(Vec::len), Some(2));
}

#[test]
fn test_kson_macro_expressions() {
    let port: u16 = 8080;
    let hosts = vec!["a".to_string(), "b".to_string()];

    let obj = kson!({ port: port, hosts: hosts, ratio: (1.0 / 4.0) });
    assert_eq!(obj.get("port"), Some(&Value::from(8080)));
    assert_eq!(obj.get("hosts").and_then(|h| h.get_index(1)), Some(&Value::from("b")));
    assert_eq!(obj.get("ratio"), Some(&Value::from(0.25)));
}

#[test]
fn test_kson_macro_output_parses_back() {
    let value = kson!({
        id: 7,
        items: [{ sku: "x", qty: 2 }, { sku: "y", qty: 0 }],
        meta: { draft: FALSE, owner: null }
    });

    let text = to_string(&value).unwrap();
    assert_eq!(
        text,
        r#"{id:7,items:[{sku:"x",qty:2},{sku:"y",qty:0}],meta:{draft:false,owner:null}}"#
    );
    assert_eq!(Value::Object(parse(&text).unwrap()), value);
}
