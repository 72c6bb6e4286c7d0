// crates/broker-gate-core/src/core/coerce.rs
// ============================================================================
// Module: Type Coercion
// Description: Converts argument literals into protocol-typed values.
// Purpose: Validate raw tokens against declared parameter type tags.
// Dependencies: serde_json, thiserror
// ============================================================================

//! ## Overview
//! Every declared parameter carries a protocol type tag. [`coerce`] converts
//! a raw argument literal into a typed [`serde_json::Value`] according to
//! that tag, failing with a typed error on mismatch. The case table is
//! exhaustive; unknown tags fail rather than passing values through.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;
use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Type coercion errors.
#[derive(Debug, Error)]
pub enum CoercionError {
    /// The literal does not satisfy the declared type.
    #[error("invalid {type_tag} value: {value}")]
    InvalidArgument {
        /// Declared type tag.
        type_tag: String,
        /// Offending literal.
        value: String,
    },
    /// The declared type tag is not recognized.
    #[error("unsupported data type: {type_tag}")]
    UnsupportedType {
        /// Unrecognized type tag.
        type_tag: String,
    },
}

impl CoercionError {
    /// Builds an invalid-argument error for a tag/value pair.
    fn invalid(type_tag: &str, value: &str) -> Self {
        Self::InvalidArgument {
            type_tag: type_tag.to_string(),
            value: value.to_string(),
        }
    }
}

// ============================================================================
// SECTION: Coercion
// ============================================================================

/// Coerces a raw literal into a typed value for the declared type tag.
///
/// # Errors
///
/// Returns [`CoercionError::InvalidArgument`] when the literal does not parse
/// as the declared type, and [`CoercionError::UnsupportedType`] for tags
/// outside the protocol's case table.
pub fn coerce(type_tag: &str, value: &str) -> Result<Value, CoercionError> {
    match type_tag {
        "boolean" | "java.lang.Boolean" => match value {
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            _ => Err(CoercionError::invalid(type_tag, value)),
        },
        "double" | "java.lang.Double" => {
            let parsed: f64 =
                value.parse().map_err(|_| CoercionError::invalid(type_tag, value))?;
            serde_json::Number::from_f64(parsed)
                .map(Value::Number)
                .ok_or_else(|| CoercionError::invalid(type_tag, value))
        }
        "int" | "long" | "java.lang.Integer" | "java.lang.Long" => {
            let parsed: i64 =
                value.parse().map_err(|_| CoercionError::invalid(type_tag, value))?;
            Ok(Value::Number(parsed.into()))
        }
        "Object" | "java.lang.Object" => {
            serde_json::from_str(value).map_err(|_| CoercionError::invalid(type_tag, value))
        }
        "java.lang.String" => Ok(Value::String(value.to_string())),
        "java.util.Map" => {
            let parsed: Value =
                serde_json::from_str(value).map_err(|_| CoercionError::invalid(type_tag, value))?;
            if parsed.is_object() {
                Ok(parsed)
            } else {
                Err(CoercionError::invalid(type_tag, value))
            }
        }
        "[Ljava.lang.Object;" | "[Ljava.lang.String;" | "[Ljava.util.Map;" => {
            let parsed: Value =
                serde_json::from_str(value).map_err(|_| CoercionError::invalid(type_tag, value))?;
            if parsed.is_array() {
                Ok(parsed)
            } else {
                Err(CoercionError::invalid(type_tag, value))
            }
        }
        _ => Err(CoercionError::UnsupportedType {
            type_tag: type_tag.to_string(),
        }),
    }
}
