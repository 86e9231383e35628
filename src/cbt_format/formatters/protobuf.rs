//! Protocol-buffer decoding through runtime-loaded message descriptors.
//!
//! Decoded messages print in a text form: one `field: value` line per
//! populated field in descriptor order, nested messages in braces, two
//! spaces of indentation per level.

use super::quote::{quote_bytes, quote_str};
use crate::error::{FormatError, Result};
use prost_reflect::{
    DynamicMessage, FieldDescriptor, Kind, MapKey, MessageDescriptor, ReflectMessage, Value,
};

pub fn decode(data: &[u8], descriptor: &MessageDescriptor) -> Result<String> {
    let message = DynamicMessage::decode(descriptor.clone(), data)
        .map_err(|e| FormatError::ProtoDecode(e.to_string()))?;
    let mut out = String::new();
    write_message(&mut out, &message, "");
    Ok(out)
}

fn write_message(out: &mut String, message: &DynamicMessage, indent: &str) {
    for field in message.descriptor().fields() {
        if !message.has_field(&field) {
            continue;
        }
        let value = message.get_field(&field);
        match value.as_ref() {
            Value::List(items) => {
                for item in items {
                    write_field(out, field.name(), item, &field.kind(), indent);
                }
            }
            Value::Map(entries) => write_map(out, &field, entries, indent),
            other => write_field(out, field.name(), other, &field.kind(), indent),
        }
    }
}

fn write_field(out: &mut String, name: &str, value: &Value, kind: &Kind, indent: &str) {
    match value {
        Value::Message(nested) => {
            out.push_str(&format!("{}{}: {{\n", indent, name));
            write_message(out, nested, &format!("  {}", indent));
            out.push_str(&format!("{}}}\n", indent));
        }
        scalar => {
            out.push_str(&format!("{}{}: {}\n", indent, name, scalar_text(scalar, kind)));
        }
    }
}

fn write_map(
    out: &mut String,
    field: &FieldDescriptor,
    entries: &std::collections::HashMap<MapKey, Value>,
    indent: &str,
) {
    let value_kind = match field.kind() {
        Kind::Message(entry) => entry.map_entry_value_field().kind(),
        other => other,
    };
    let inner = format!("  {}", indent);

    let mut sorted: Vec<(String, &Value)> = entries
        .iter()
        .map(|(key, value)| (map_key_text(key), value))
        .collect();
    sorted.sort_by(|a, b| a.0.cmp(&b.0));

    for (key, value) in sorted {
        out.push_str(&format!("{}{}: {{\n", indent, field.name()));
        out.push_str(&format!("{}key: {}\n", inner, key));
        write_field(out, "value", value, &value_kind, &inner);
        out.push_str(&format!("{}}}\n", indent));
    }
}

fn scalar_text(value: &Value, kind: &Kind) -> String {
    match value {
        Value::Bool(v) => v.to_string(),
        Value::I32(v) => v.to_string(),
        Value::I64(v) => v.to_string(),
        Value::U32(v) => v.to_string(),
        Value::U64(v) => v.to_string(),
        Value::F32(v) => v.to_string(),
        Value::F64(v) => v.to_string(),
        Value::String(v) => quote_str(v),
        Value::Bytes(v) => quote_bytes(v),
        Value::EnumNumber(number) => match kind {
            Kind::Enum(descriptor) => descriptor
                .get_value(*number)
                .map(|v| v.name().to_string())
                .unwrap_or_else(|| number.to_string()),
            _ => number.to_string(),
        },
        // Lists, maps and messages are expanded by the callers.
        Value::List(_) | Value::Map(_) | Value::Message(_) => String::new(),
    }
}

fn map_key_text(key: &MapKey) -> String {
    match key {
        MapKey::Bool(v) => v.to_string(),
        MapKey::I32(v) => v.to_string(),
        MapKey::I64(v) => v.to_string(),
        MapKey::U32(v) => v.to_string(),
        MapKey::U64(v) => v.to_string(),
        MapKey::String(v) => quote_str(v),
    }
}
