//! # Row Rendering
//!
//! Prints a row the way the `lookup` and `read` commands show it:
//!
//! ```text
//! ----------------------------------------
//! r1
//!   f1:c1                                    @ 2024/01/02-03:04:05.000000
//!     "Hello!"
//! ```
//!
//! Families print in sorted order and cells within a family sorted by column.
//! Each value goes through [`ValueFormatting::format`] with a four-space
//! indent. The first formatting error stops the row and is returned.

use crate::engine::ValueFormatting;
use crate::error::Result;
use chrono::{DateTime, Local, TimeZone};
use std::collections::BTreeMap;
use std::fmt::Display;
use std::io::Write;
use unicode_width::UnicodeWidthStr;

const SEPARATOR_WIDTH: usize = 40;
const COLUMN_WIDTH: usize = 40;
const VALUE_INDENT: &str = "    ";
const TIMESTAMP_FORMAT: &str = "%Y/%m/%d-%H:%M:%S%.6f";

/// One cell version: `column` is the qualified `family:qualifier` name and
/// `timestamp` is in microseconds since the Unix epoch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadItem {
    pub column: String,
    pub timestamp: i64,
    pub value: Vec<u8>,
}

impl ReadItem {
    pub fn new(column: impl Into<String>, timestamp: i64, value: impl Into<Vec<u8>>) -> Self {
        Self {
            column: column.into(),
            timestamp,
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    pub key: String,
    pub cells: BTreeMap<String, Vec<ReadItem>>,
}

impl Row {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            cells: BTreeMap::new(),
        }
    }

    /// Appends a cell to `family`.
    pub fn push(&mut self, family: impl Into<String>, item: ReadItem) {
        self.cells.entry(family.into()).or_default().push(item);
    }
}

/// Writes `row` with timestamps in the local time zone.
pub fn print_row<W: Write>(formatting: &ValueFormatting, row: &Row, out: &mut W) -> Result<()> {
    print_row_in(formatting, row, out, &Local)
}

/// Writes `row` with timestamps shown in `tz`.
pub fn print_row_in<W, Tz>(
    formatting: &ValueFormatting,
    row: &Row,
    out: &mut W,
    tz: &Tz,
) -> Result<()>
where
    W: Write,
    Tz: TimeZone,
    Tz::Offset: Display,
{
    writeln!(out, "{}", "-".repeat(SEPARATOR_WIDTH))?;
    writeln!(out, "{}", row.key)?;

    // BTreeMap iteration is already sorted by family.
    for (family, items) in &row.cells {
        let mut items: Vec<&ReadItem> = items.iter().collect();
        items.sort_by(|a, b| a.column.cmp(&b.column));
        for item in items {
            writeln!(
                out,
                "  {} @ {}",
                pad_column(&item.column),
                format_timestamp(item.timestamp, tz)
            )?;
            let formatted = formatting.format(VALUE_INDENT, family, &item.column, &item.value)?;
            out.write_all(formatted.as_bytes())?;
        }
    }
    Ok(())
}

/// Renders `row` to a string using the local time zone.
pub fn render_row(formatting: &ValueFormatting, row: &Row) -> Result<String> {
    render_row_in(formatting, row, &Local)
}

pub fn render_row_in<Tz>(formatting: &ValueFormatting, row: &Row, tz: &Tz) -> Result<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut buf = Vec::new();
    print_row_in(formatting, row, &mut buf, tz)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

fn pad_column(column: &str) -> String {
    let width = column.width();
    if width >= COLUMN_WIDTH {
        column.to_string()
    } else {
        format!("{}{}", column, " ".repeat(COLUMN_WIDTH - width))
    }
}

fn format_timestamp<Tz>(micros: i64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match DateTime::from_timestamp_micros(micros) {
        Some(utc) => utc.with_timezone(tz).format(TIMESTAMP_FORMAT).to_string(),
        None => micros.to_string(),
    }
}
