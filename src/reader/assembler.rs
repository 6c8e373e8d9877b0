//! Record assembly from one data line
//!
//! Tokens are visited in ascending column order. Each bound token is converted
//! to the binding's declared type and handed to its setter. The first failure
//! aborts the line and the partially populated record is dropped. A setter
//! that panics fails its line the same way a setter returning `Err` does.

use super::binding::BindingTable;
use super::conversion::{ConversionFailure, convert};
use super::splitter::split_line;
use crate::error::{RecordError, SetterError};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

/// Assemble a record from already split tokens
pub fn assemble_record<T>(
    tokens: &[&str],
    bindings: &BindingTable<T>,
    factory: fn() -> T,
) -> Result<T, RecordError> {
    let mut record = factory();

    for (column, token) in tokens.iter().enumerate() {
        let Some(binding) = bindings.get(column) else {
            continue;
        };

        let value = convert(token, binding.field_type()).map_err(|failure| match failure {
            ConversionFailure::Parse(source) => RecordError::Conversion {
                column,
                field: binding.name().to_string(),
                value: token.to_string(),
                source,
            },
            ConversionFailure::Unsupported(type_name) => RecordError::UnsupportedType {
                column,
                field: binding.name().to_string(),
                type_name: type_name.to_string(),
            },
        })?;

        let setter = binding.setter();
        panic::catch_unwind(AssertUnwindSafe(|| setter.apply(&mut record, value)))
            .unwrap_or_else(|payload| {
                Err(SetterError::new(format!(
                    "setter panicked: {}",
                    panic_message(&*payload)
                )))
            })
            .map_err(|source| RecordError::SetterInvocation {
                column,
                field: binding.name().to_string(),
                source,
            })?;
    }

    Ok(record)
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "unknown panic"
    }
}

/// Split a raw line and assemble it into a record
pub fn assemble_line<T>(
    line: &str,
    bindings: &BindingTable<T>,
    factory: fn() -> T,
) -> Result<T, RecordError> {
    let tokens = split_line(line);
    assemble_record(&tokens, bindings, factory)
}
