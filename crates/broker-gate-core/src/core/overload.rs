// crates/broker-gate-core/src/core/overload.rs
// ============================================================================
// Module: Overload Resolution
// Description: Selects the unique operation overload matching raw arguments.
// Purpose: Mirror reflection-style dispatch from argument shape and types.
// Dependencies: crate::core::{args, coerce, schema}, thiserror
// ============================================================================

//! ## Overview
//! A component may expose several schemas under one operation name. Overload
//! resolution selects the single schema whose declared arity and parameter
//! types are satisfied by the raw argument tokens, honoring optional `name:`
//! prefixes, then marshals the tokens into [`OperationArgument`] values.
//!
//! Name-level cardinality (does the descriptor report exactly one schema
//! group for the literal operation name) is checked by the caller before
//! type-level matching runs; see [`OverloadError::UnknownOperation`] and
//! [`OverloadError::AmbiguousOperationName`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::args::strip_name;
use crate::core::coerce::coerce;
use crate::core::schema::OperationArgument;
use crate::core::schema::OperationSchema;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Overload resolution errors.
#[derive(Debug, Error)]
pub enum OverloadError {
    /// The descriptor reported no schema group for the operation name.
    #[error("no such operation: {operation}")]
    UnknownOperation {
        /// Requested operation name.
        operation: String,
    },
    /// The descriptor reported multiple schema groups for the operation name.
    #[error("there are multiple schemas for operation: {operation}")]
    AmbiguousOperationName {
        /// Requested operation name.
        operation: String,
    },
    /// No overload satisfies the given arguments.
    #[error("no match found for operation {operation}")]
    NoMatchingOverload {
        /// Requested operation name.
        operation: String,
    },
    /// More than one overload satisfies the given arguments.
    #[error("there are multiple matches for the operation {operation}")]
    AmbiguousOverload {
        /// Requested operation name.
        operation: String,
    },
}

// ============================================================================
// SECTION: Matching
// ============================================================================

/// Returns true when the schema's arity and types accept the raw arguments.
fn schema_matches(schema: &OperationSchema, raw_args: &[String]) -> bool {
    if raw_args.is_empty() {
        return schema.args.is_empty();
    }
    if schema.args.len() != raw_args.len() {
        return false;
    }
    for (descriptor, token) in schema.args.iter().zip(raw_args) {
        let value = match token.find(':') {
            Some(index) if index > 0 => {
                // An explicit name prefix must equal the declared name.
                if token[..index] != *descriptor.name {
                    return false;
                }
                &token[index + 1..]
            }
            _ => token.as_str(),
        };
        if coerce(&descriptor.type_tag, value).is_err() {
            return false;
        }
    }
    true
}

/// Resolves the unique matching overload and marshals the call arguments.
///
/// # Errors
///
/// Returns [`OverloadError::NoMatchingOverload`] when no candidate accepts
/// the arguments and [`OverloadError::AmbiguousOverload`] when more than one
/// does.
pub fn resolve_overload(
    operation: &str,
    schemas: &[OperationSchema],
    raw_args: &[String],
) -> Result<Vec<OperationArgument>, OverloadError> {
    let mut matches = schemas.iter().filter(|schema| schema_matches(schema, raw_args));
    let Some(matched) = matches.next() else {
        return Err(OverloadError::NoMatchingOverload {
            operation: operation.to_string(),
        });
    };
    if matches.next().is_some() {
        return Err(OverloadError::AmbiguousOverload {
            operation: operation.to_string(),
        });
    }
    Ok(matched
        .args
        .iter()
        .zip(raw_args)
        .map(|(descriptor, token)| OperationArgument {
            type_tag: descriptor.type_tag.clone(),
            value: strip_name(token).to_string(),
        })
        .collect())
}
