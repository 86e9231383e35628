//! Pretty-printing for JSON-encoded cells.
//!
//! Objects become `key: value` lines with keys sorted at every level so the
//! output does not depend on the order the writer used. Nested values are
//! indented two spaces per level.

use super::quote::quote_str;
use crate::error::Result;
use serde_json::{Number, Value};

/// Integers beyond this magnitude lose precision as doubles and print as-is.
const MAX_EXACT_INTEGER: u64 = 1 << 53;

pub fn format(data: &[u8]) -> Result<String> {
    let value: Value = serde_json::from_slice(data)?;
    let rendered = render(&value, "");
    Ok(rendered.trim_start_matches('\n').to_string())
}

fn render(value: &Value, indent: &str) -> String {
    let child = format!("  {}", indent);
    match value {
        Value::String(s) => format!("{}{:>6}", indent, quote_str(s)),
        Value::Number(n) => format!("{}{}", indent, render_number(n)),
        Value::Array(items) => {
            let mut out = format!("\n{}[\n", indent);
            for item in items {
                out.push_str(&render(item, &child));
                out.push('\n');
            }
            out.push_str(indent);
            out.push(']');
            out
        }
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();

            let mut out = String::from("\n");
            for key in keys {
                let rendered = render(&map[key.as_str()], &child);
                out.push_str(&format!("{}{}: {}\n", indent, key, rendered));
            }
            out
        }
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
    }
}

fn render_number(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        if i.unsigned_abs() > MAX_EXACT_INTEGER {
            return format!("{:>6}", i);
        }
    } else if let Some(u) = n.as_u64() {
        if u > MAX_EXACT_INTEGER {
            return format!("{:>6}", u);
        }
    }
    format!("{:>6.2}", n.as_f64().unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FormatError;

    #[test]
    fn test_nested_document() {
        let input = br#"{"name": "Brave", "age": 2, "isFluffy": true, "hobbies": { "toys": [ "mousies"]}}"#;
        let got = format(input).unwrap();
        let want = "age:     2.00\n\
                    hobbies: \n  \
                    toys: \n    \
                    [\n      \
                    \"mousies\"\n    \
                    ]\n\
                    \n\
                    isFluffy: true\n\
                    name:   \"Brave\"\n";
        assert_eq!(got, want);
    }

    #[test]
    fn test_keys_sorted_regardless_of_input_order() {
        let a = format(br#"{"name":"Brave","age":2}"#).unwrap();
        let b = format(br#"{"age":2,"name":"Brave"}"#).unwrap();
        assert_eq!(a, b);
        assert!(a.starts_with("age:"));
        assert!(a.find("age").unwrap() < a.find("name").unwrap());
    }

    #[test]
    fn test_leading_newlines_trimmed() {
        let got = format(br#"{"a": 1}"#).unwrap();
        assert!(!got.starts_with('\n'));
        let got = format(b"[1, 2]").unwrap();
        assert_eq!(got, "[\n    1.00\n    2.00\n]");
    }

    #[test]
    fn test_scalars() {
        assert_eq!(format(b"3.14159").unwrap(), "  3.14");
        assert_eq!(format(br#""hi""#).unwrap(), "  \"hi\"");
        assert_eq!(format(b"null").unwrap(), "null");
        assert_eq!(format(b"false").unwrap(), "false");
    }

    #[test]
    fn test_large_integers_keep_precision() {
        assert_eq!(
            format(b"9007199254740993").unwrap(),
            "9007199254740993"
        );
        assert_eq!(
            format(b"-9007199254740993").unwrap(),
            "-9007199254740993"
        );
        assert_eq!(format(b"42").unwrap(), " 42.00");
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            format(b"{\"name\": "),
            Err(FormatError::JsonParse(_))
        ));
        assert!(format(b"Hello world!").is_err());
    }
}
