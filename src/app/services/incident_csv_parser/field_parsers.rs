//! Field parsing utilities for incident CSV records
//!
//! This module provides helper functions for extracting and parsing
//! individual fields from CSV records, distinguishing absent values
//! from present-but-malformed ones so the caller can count diagnostics.

use super::column_mapping::ColumnMapping;
use crate::{Error, Result};
use csv::StringRecord;
use std::str::FromStr;

/// Outcome of parsing an optional typed field.
///
/// `Absent` is normal (uploads carry column subsets); `Invalid` means the
/// value was present but malformed and must be counted as a diagnostic,
/// never silently treated as missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedField<T> {
    /// Column missing from the upload, or the value empty
    Absent,
    /// Value present but not parseable as the expected type
    Invalid,
    /// Successfully parsed value
    Value(T),
}

/// Get a required field value from a CSV record
pub fn get_required_field<'a>(
    record: &'a StringRecord,
    mapping: &ColumnMapping,
    field_name: &str,
) -> Result<&'a str> {
    let index = mapping.get_index(field_name).ok_or_else(|| {
        Error::data_validation(format!("Required column '{}' not found", field_name))
    })?;

    let value = record.get(index).ok_or_else(|| {
        Error::data_validation(format!("No value for required column '{}'", field_name))
    })?;

    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::data_validation(format!(
            "Empty value for required column '{}'",
            field_name
        )));
    }

    Ok(trimmed)
}

/// Get an optional field value from a CSV record
pub fn get_optional_field<'a>(
    record: &'a StringRecord,
    mapping: &ColumnMapping,
    field_name: &str,
) -> Option<&'a str> {
    mapping
        .get_index(field_name)
        .and_then(|index| record.get(index))
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
}

/// Parse an optional numeric field, reporting malformed values
pub fn parse_optional_number<T: FromStr>(
    record: &StringRecord,
    mapping: &ColumnMapping,
    field_name: &str,
) -> ParsedField<T> {
    match get_optional_field(record, mapping, field_name) {
        None => ParsedField::Absent,
        Some(raw) => match raw.parse::<T>() {
            Ok(value) => ParsedField::Value(value),
            Err(_) => ParsedField::Invalid,
        },
    }
}
