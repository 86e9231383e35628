//! # Value Formatters
//!
//! A [`ValueFormatter`] turns the raw bytes of one cell into text. Which
//! variant a column gets is decided once by the engine (see `engine.rs`) and
//! then reused for every cell of that column.
//!
//! Formatters are plain data: cloning one is cheap (protobuf descriptors are
//! reference counted) and applying one never mutates it.

use crate::encoding::{BinaryType, ByteOrder};
use crate::error::Result;
use prost_reflect::MessageDescriptor;

pub mod binary;
pub mod json;
pub mod protobuf;
pub mod quote;

#[derive(Debug, Clone)]
pub enum ValueFormatter {
    /// Quoted string of the raw bytes.
    Raw,
    Hex,
    Binary { order: ByteOrder, ty: BinaryType },
    Json,
    Protobuf(MessageDescriptor),
}

impl ValueFormatter {
    pub fn format(&self, data: &[u8]) -> Result<String> {
        match self {
            ValueFormatter::Raw => Ok(quote::quote_bytes(data)),
            ValueFormatter::Hex => Ok(quote::hex_bytes(data)),
            ValueFormatter::Binary { order, ty } => binary::decode(data, *order, *ty),
            ValueFormatter::Json => json::format(data),
            ValueFormatter::Protobuf(descriptor) => protobuf::decode(data, descriptor),
        }
    }

    /// Short label used in log output.
    pub fn label(&self) -> String {
        match self {
            ValueFormatter::Raw => "raw".to_string(),
            ValueFormatter::Hex => "hex".to_string(),
            ValueFormatter::Binary { order, ty } => format!("{:?}-endian {}", order, ty),
            ValueFormatter::Json => "json".to_string(),
            ValueFormatter::Protobuf(descriptor) => {
                format!("protobuf {}", descriptor.full_name())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch() {
        assert_eq!(
            ValueFormatter::Raw.format(b"Hello world!").unwrap(),
            "\"Hello world!\""
        );
        assert_eq!(ValueFormatter::Hex.format(b"Hi").unwrap(), "48 69");
        let binary = ValueFormatter::Binary {
            order: ByteOrder::Big,
            ty: BinaryType::Int16,
        };
        assert_eq!(
            binary.format(b"Hello world!").unwrap(),
            "[18533 27756 28448 30575 29292 25633]"
        );
        assert_eq!(
            ValueFormatter::Json.format(br#"{"b": "x", "a": 1}"#).unwrap(),
            "a:     1.00\nb:      \"x\"\n"
        );
    }

    #[test]
    fn test_labels() {
        assert_eq!(ValueFormatter::Raw.label(), "raw");
        let binary = ValueFormatter::Binary {
            order: ByteOrder::Little,
            ty: BinaryType::Uint32,
        };
        assert_eq!(binary.label(), "Little-endian uint32");
    }
}
