use lambda_eval::{evaluate, ErrorKind, Value};

fn ints(ns: &[i64]) -> Value {
    Value::Array(ns.iter().map(|n| Value::Integer(*n)).collect())
}

#[test]
fn test_map_preserves_order_and_length() {
    assert_eq!(evaluate("#i+1 for #i in #?", &["2", "4", "5", "10"], "int").unwrap(), ints(&[3, 5, 6, 11]));
}

#[test]
fn test_filter_clause() {
    let args = ["1", "2", "3", "4", "5", "6"];
    assert_eq!(evaluate("#i for #i in #? if #i % 2 == 0", &args, "int").unwrap(), ints(&[2, 4, 6]));
}

#[test]
fn test_methods_on_elements() {
    assert_eq!(
        evaluate("#i.upper() for #i in #?", &["a", "b"], "str").unwrap(),
        Value::Array(vec![Value::String("A".into()), Value::String("B".into())])
    );
}

#[test]
fn test_float_elements() {
    assert_eq!(
        evaluate("#i * 2 for #i in #?", &["1.5", "2"], "float").unwrap(),
        Value::Array(vec![Value::Float(3.0), Value::Float(4.0)])
    );
}

#[test]
fn test_no_arguments_maps_to_empty_list() {
    assert_eq!(evaluate("#i for #i in #?", &[], "int").unwrap(), ints(&[]));
}

#[test]
fn test_aggregate_wins_over_positional_placeholders() {
    // #1 is not bound in aggregate mode
    let err = evaluate("#i + #1 for #i in #?", &["1", "2"], "int").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Generic);
}
