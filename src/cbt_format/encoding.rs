//! # Encodings and Binary Types
//!
//! Users name encodings and binary element types in the format file. This
//! module maps those names onto closed enums so the rest of the crate can
//! `match` instead of comparing strings.
//!
//! | Encoding | Accepted names (case-insensitive) |
//! |----------|-----------------------------------|
//! | `BigEndian` | `bigendian`, `b`, `binary` |
//! | `LittleEndian` | `littleendian`, `l` |
//! | `ProtocolBuffer` | `protocolbuffer`, `protocol-buffer`, `protocol_buffer`, `proto`, `p` |
//! | `Hex` | `hex`, `h` |
//! | `Json` | `json`, `j` |
//! | `None` | the empty string |

use crate::error::{FormatError, Result};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// No encoding configured: values print as quoted strings.
    None,
    BigEndian,
    LittleEndian,
    ProtocolBuffer,
    Hex,
    Json,
}

impl Encoding {
    pub fn parse(name: &str) -> Result<Self> {
        match name.to_lowercase().as_str() {
            "" => Ok(Encoding::None),
            "bigendian" | "b" | "binary" => Ok(Encoding::BigEndian),
            "littleendian" | "l" => Ok(Encoding::LittleEndian),
            "protocolbuffer" | "protocol-buffer" | "protocol_buffer" | "proto" | "p" => {
                Ok(Encoding::ProtocolBuffer)
            }
            "hex" | "h" => Ok(Encoding::Hex),
            "json" | "j" => Ok(Encoding::Json),
            _ => Err(FormatError::UnknownEncoding(name.to_string())),
        }
    }

    /// The byte order for the fixed-width encodings.
    pub fn byte_order(&self) -> Option<ByteOrder> {
        match self {
            Encoding::BigEndian => Some(ByteOrder::Big),
            Encoding::LittleEndian => Some(ByteOrder::Little),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ByteOrder {
    Big,
    Little,
}

/// Element types understood by the big- and little-endian encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryType {
    Int8,
    Int16,
    Int32,
    Int64,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Float32,
    Float64,
}

impl BinaryType {
    pub const ALL: [BinaryType; 10] = [
        BinaryType::Int8,
        BinaryType::Int16,
        BinaryType::Int32,
        BinaryType::Int64,
        BinaryType::Uint8,
        BinaryType::Uint16,
        BinaryType::Uint32,
        BinaryType::Uint64,
        BinaryType::Float32,
        BinaryType::Float64,
    ];

    pub fn parse(name: &str) -> Result<Self> {
        match name.to_lowercase().as_str() {
            "int8" => Ok(BinaryType::Int8),
            "int16" => Ok(BinaryType::Int16),
            "int32" => Ok(BinaryType::Int32),
            "int64" => Ok(BinaryType::Int64),
            "uint8" => Ok(BinaryType::Uint8),
            "uint16" => Ok(BinaryType::Uint16),
            "uint32" => Ok(BinaryType::Uint32),
            "uint64" => Ok(BinaryType::Uint64),
            "float32" => Ok(BinaryType::Float32),
            "float64" => Ok(BinaryType::Float64),
            _ => Err(FormatError::UnknownType(name.to_string())),
        }
    }

    /// Size of one element in bytes.
    pub fn width(&self) -> usize {
        match self {
            BinaryType::Int8 | BinaryType::Uint8 => 1,
            BinaryType::Int16 | BinaryType::Uint16 => 2,
            BinaryType::Int32 | BinaryType::Uint32 | BinaryType::Float32 => 4,
            BinaryType::Int64 | BinaryType::Uint64 | BinaryType::Float64 => 8,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BinaryType::Int8 => "int8",
            BinaryType::Int16 => "int16",
            BinaryType::Int32 => "int32",
            BinaryType::Int64 => "int64",
            BinaryType::Uint8 => "uint8",
            BinaryType::Uint16 => "uint16",
            BinaryType::Uint32 => "uint32",
            BinaryType::Uint64 => "uint64",
            BinaryType::Float32 => "float32",
            BinaryType::Float64 => "float64",
        }
    }
}

impl fmt::Display for BinaryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
