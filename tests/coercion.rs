use lambda_eval::coercion::{coerce, raw_values};
use lambda_eval::{ErrorKind, Value};

#[test]
fn test_integer_tokens() {
    let (args, _) = coerce(raw_values(&["+3", " 4 ", "-5"]), "int", None).unwrap();
    assert_eq!(args, vec![Value::Integer(3), Value::Integer(4), Value::Integer(-5)]);
    assert!(coerce(raw_values(&["3.5"]), "int", None).is_err());
}

#[test]
fn test_out_of_range_floats_do_not_saturate() {
    let err = coerce(vec![Value::Float(1e30)], "int", None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    let err = coerce(vec![Value::Float(f64::NAN)], "int", None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}

#[test]
fn test_float_tokens() {
    let (args, _) = coerce(raw_values(&["1", "2.5", "inf"]), "float", None).unwrap();
    assert_eq!(args[0], Value::Float(1.0));
    assert_eq!(args[1], Value::Float(2.5));
    assert_eq!(args[2], Value::Float(f64::INFINITY));
}

#[test]
fn test_boolean_tokens() {
    let (args, _) = coerce(raw_values(&["true", "NO", "1", "off"]), "bool", None).unwrap();
    assert_eq!(
        args,
        vec![Value::Boolean(true), Value::Boolean(false), Value::Boolean(true), Value::Boolean(false)]
    );
}

#[test]
fn test_list_tokens() {
    let (args, _) = coerce(raw_values(&["[1, 'a', 2.5]", "7"]), "list", None).unwrap();
    assert_eq!(
        args[0],
        Value::Array(vec![Value::Integer(1), Value::String("a".into()), Value::Float(2.5)])
    );
    assert_eq!(args[1], Value::Array(vec![Value::String("7".into())]));
}

#[test]
fn test_none_tokens() {
    let (args, _) = coerce(raw_values(&["None", "null"]), "none", None).unwrap();
    assert_eq!(args, vec![Value::Null, Value::Null]);
    assert_eq!(coerce(raw_values(&["0"]), "none", None).unwrap_err().kind(), ErrorKind::InvalidArgument);
}

#[test]
fn test_text_type_renders_non_strings() {
    let (args, seed) = coerce(vec![Value::Float(2.5), Value::Boolean(true)], "string", Some(Value::Integer(1))).unwrap();
    assert_eq!(args, vec![Value::String("2.5".into()), Value::String("True".into())]);
    assert_eq!(seed, Some(Value::String("1".into())));
}
