//! Row dumps and raw values given to the binary.
//!
//! A row dump is JSON, either one row or an array of rows:
//!
//! ```json
//! {"key": "r1", "cells": {"f1": [{"column": "f1:c1", "timestamp": 0, "value": "Hello!"}]}}
//! ```
//!
//! `value` is a UTF-8 string or an array of byte values. `timestamp` is in
//! microseconds and defaults to 0.

use cbt_format::error::{FormatError, Result};
use cbt_format::row::{ReadItem, Row};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RowsDump {
    Many(Vec<RowDump>),
    One(RowDump),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RowDump {
    key: String,
    #[serde(default)]
    cells: BTreeMap<String, Vec<CellDump>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CellDump {
    column: String,
    #[serde(default)]
    timestamp: i64,
    value: CellValue,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CellValue {
    Text(String),
    Bytes(Vec<u8>),
}

impl From<CellValue> for Vec<u8> {
    fn from(value: CellValue) -> Self {
        match value {
            CellValue::Text(text) => text.into_bytes(),
            CellValue::Bytes(bytes) => bytes,
        }
    }
}

/// Reads a row dump from `path`, or stdin when `path` is `-`.
pub fn read_rows(path: &Path) -> Result<Vec<Row>> {
    let content = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(path)?
    };
    parse_rows(&content)
}

pub fn parse_rows(content: &str) -> Result<Vec<Row>> {
    let dump: RowsDump = serde_json::from_str(content)
        .map_err(|e| FormatError::InvalidInput(format!("row dump: {}", e)))?;
    let rows = match dump {
        RowsDump::Many(rows) => rows,
        RowsDump::One(row) => vec![row],
    };
    Ok(rows.into_iter().map(into_row).collect())
}

fn into_row(dump: RowDump) -> Row {
    let mut row = Row::new(dump.key);
    for (family, cells) in dump.cells {
        for cell in cells {
            row.push(
                family.clone(),
                ReadItem::new(cell.column, cell.timestamp, cell.value),
            );
        }
    }
    row
}

/// Decodes the `--hex` flag of the `value` command.
pub fn decode_hex(digits: &str) -> Result<Vec<u8>> {
    let compact: String = digits.chars().filter(|c| !c.is_whitespace()).collect();
    hex::decode(&compact).map_err(|e| FormatError::InvalidInput(format!("hex value: {}", e)))
}
