use serde_json::Value;

static NULL: Value = Value::Null;

/// Walk `path` through nested JSON objects.
///
/// Returns `None` as soon as a step lands on something that is not an object
/// or the key is missing. An empty path yields `value` itself.
pub fn lookup<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter()
        .try_fold(value, |cur, key| cur.as_object()?.get(*key))
}

pub fn lookup_or<'a>(value: &'a Value, path: &[&str], default: &'a Value) -> &'a Value {
    lookup(value, path).unwrap_or(default)
}

pub fn lookup_str<'a>(value: &'a Value, path: &[&str]) -> Option<&'a str> {
    lookup(value, path)?.as_str()
}

pub fn lookup_i64(value: &Value, path: &[&str]) -> Option<i64> {
    lookup(value, path)?.as_i64()
}

/// Array at `path`, or an empty slice.
pub fn lookup_array<'a>(value: &'a Value, path: &[&str]) -> &'a [Value] {
    lookup_or(value, path, &NULL)
        .as_array()
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// True for values that carry no data: `null`, `false`, zero, and empty
/// strings, arrays or objects.
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

/// String entries of the `addresses` list of an input or output. Anything
/// that is not a string is skipped.
pub fn lookup_addresses(value: &Value) -> impl Iterator<Item = &str> {
    lookup_array(value, &["addresses"])
        .iter()
        .filter_map(Value::as_str)
}
