//! Token to typed value conversion.

use crate::record::{FieldType, FieldValue};
use std::num::ParseIntError;

/// Why a token could not be converted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionFailure {
    /// Token is not a valid number for the declared integer type
    Parse(ParseIntError),
    /// Declared type has no converter
    Unsupported(&'static str),
}

/// Convert a raw token into a value of the declared type.
///
/// Text passes through unchanged. Integers use plain decimal parsing with an
/// optional sign; surrounding whitespace is not tolerated.
pub fn convert(token: &str, field_type: FieldType) -> Result<FieldValue, ConversionFailure> {
    match field_type {
        FieldType::Text => Ok(FieldValue::Text(token.to_string())),
        FieldType::Int32 => token
            .parse::<i32>()
            .map(FieldValue::Int32)
            .map_err(ConversionFailure::Parse),
        FieldType::Int64 => token
            .parse::<i64>()
            .map(FieldValue::Int64)
            .map_err(ConversionFailure::Parse),
        FieldType::Unsupported(type_name) => Err(ConversionFailure::Unsupported(type_name)),
    }
}
