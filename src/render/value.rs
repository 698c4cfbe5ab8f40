use crate::Value;

impl Value {
    pub(crate) fn human(&self) -> &'static str {
        match self {
            Value::None => "none",
            Value::Bool(_) => "bool",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Lambda(_) => "lambda",
        }
    }

    /// Whether the value skips a section and renders an inverted section.
    ///
    /// Only `None`, `false`, and empty lists or maps are falsey. Zero and the
    /// empty string are truthy.
    pub(crate) fn is_falsey(&self) -> bool {
        match self {
            Value::None => true,
            Value::Bool(b) => !b,
            Value::List(list) => list.is_empty(),
            Value::Map(map) => map.is_empty(),
            Value::Integer(_) | Value::Float(_) | Value::String(_) | Value::Lambda(_) => false,
        }
    }
}

/// Index into the value with a single path segment.
///
/// Maps are indexed by key and lists by a numeric segment. Any other value
/// or a missing entry yields `None`.
pub fn lookup<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    match value {
        Value::Map(map) => map.get(key),
        Value::List(list) => key.parse::<usize>().ok().and_then(|i| list.get(i)),
        _ => None,
    }
}
