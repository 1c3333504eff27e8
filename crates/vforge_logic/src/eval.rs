//! Context lookup and truthiness.

use serde_json::Value;

/// Resolve a dotted path against a context value.
///
/// Path segments index objects by key and arrays by numeric index. The
/// segment `length` on an array or string yields its element count, matching
/// how declarations address collection sizes (`components.sprites.length`).
/// Returns `None` when any segment fails to resolve.
pub fn lookup(ctx: &Value, path: &str) -> Option<Value> {
    if path.is_empty() {
        return Some(ctx.clone());
    }

    let mut current = ctx;
    let mut segments = path.split('.');
    while let Some(segment) = segments.next() {
        match current {
            Value::Object(map) => {
                current = map.get(segment)?;
            }
            Value::Array(items) => {
                if segment == "length" {
                    // length terminates the path
                    return match segments.next() {
                        None => Some(Value::from(items.len())),
                        Some(_) => None,
                    };
                }
                let index: usize = segment.parse().ok()?;
                current = items.get(index)?;
            }
            Value::String(text) if segment == "length" => {
                return match segments.next() {
                    None => Some(Value::from(text.chars().count())),
                    Some(_) => None,
                };
            }
            _ => return None,
        }
    }
    Some(current.clone())
}

/// JS-like truthiness: `false`, `null`, `0`, `""` and `[]` are falsy.
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lookup_nested() {
        let ctx = json!({"a": {"b": {"c": 3}}});
        assert_eq!(lookup(&ctx, "a.b.c"), Some(json!(3)));
        assert_eq!(lookup(&ctx, "a.b"), Some(json!({"c": 3})));
        assert_eq!(lookup(&ctx, "a.x"), None);
    }

    #[test]
    fn test_lookup_array_index() {
        let ctx = json!({"files": ["a.png", "b.png"]});
        assert_eq!(lookup(&ctx, "files.0"), Some(json!("a.png")));
        assert_eq!(lookup(&ctx, "files.2"), None);
        assert_eq!(lookup(&ctx, "files.first"), None);
    }

    #[test]
    fn test_lookup_length() {
        let ctx = json!({"files": ["a.png", "b.png"], "name": "actor"});
        assert_eq!(lookup(&ctx, "files.length"), Some(json!(2)));
        assert_eq!(lookup(&ctx, "name.length"), Some(json!(5)));
        assert_eq!(lookup(&ctx, "files.length.tail"), None);
    }

    #[test]
    fn test_lookup_empty_path_is_identity() {
        let ctx = json!({"a": 1});
        assert_eq!(lookup(&ctx, ""), Some(ctx.clone()));
    }

    #[test]
    fn test_truthiness() {
        assert!(!truthy(&json!(null)));
        assert!(!truthy(&json!(false)));
        assert!(!truthy(&json!(0)));
        assert!(!truthy(&json!("")));
        assert!(!truthy(&json!([])));
        assert!(truthy(&json!({})));
        assert!(truthy(&json!(1)));
        assert!(truthy(&json!("x")));
        assert!(truthy(&json!([0])));
    }
}
