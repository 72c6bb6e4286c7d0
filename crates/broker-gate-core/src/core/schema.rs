// crates/broker-gate-core/src/core/schema.rs
// ============================================================================
// Module: Operation Schemas
// Description: Remote operation descriptors and call-argument wire types.
// Purpose: Model per-operation overload schemas and marshaled arguments.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A component descriptor exposes its operations as a map from operation name
//! to a list of [`OperationSchema`] entries, one per overload. Schemas are
//! immutable once received and are fetched per call, never cached across
//! invocations. [`OperationArgument`] carries the coerced value in its wire
//! form (the name-stripped literal text) paired with the declared type tag.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Schema Types
// ============================================================================

/// One declared parameter of an operation overload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterDescriptor {
    /// Declared parameter name.
    pub name: String,
    /// Protocol type tag (for example `boolean` or `java.lang.String`).
    #[serde(rename = "type")]
    pub type_tag: String,
    /// Human-readable parameter description.
    #[serde(default)]
    pub desc: String,
}

/// One overload of a named management operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationSchema {
    /// Ordered declared parameters.
    #[serde(default)]
    pub args: Vec<ParameterDescriptor>,
    /// Return type tag.
    #[serde(default)]
    pub ret: String,
    /// Human-readable operation description.
    #[serde(default)]
    pub desc: String,
}

/// Operation name to overload list, as reported by a component descriptor.
pub type OperationMap = BTreeMap<String, Vec<OperationSchema>>;

/// A typed, validated call argument ready for transmission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationArgument {
    /// Declared protocol type tag.
    #[serde(rename = "type")]
    pub type_tag: String,
    /// Argument value in wire-string form, name prefix stripped.
    pub value: String,
}

/// The invocation payload for a resolved operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationSignature {
    /// Operation name.
    pub name: String,
    /// Ordered call arguments.
    pub args: Vec<OperationArgument>,
}

// ============================================================================
// SECTION: Filters
// ============================================================================

/// Attribute or operation name selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// No filtering; return everything.
    All,
    /// Only the listed names.
    Names(Vec<String>),
}

impl Default for Filter {
    fn default() -> Self {
        Self::All
    }
}

impl Filter {
    /// Builds a filter from user-supplied names.
    ///
    /// A leading `"*"` means no filter. Names may carry embedded commas from
    /// shell quoting; they are split apart and empty fragments dropped.
    #[must_use]
    pub fn from_names(names: &[String]) -> Self {
        if names.first().is_some_and(|first| first == "*") {
            return Self::All;
        }
        let mut resolved = Vec::new();
        for name in names {
            for part in name.split(',') {
                if !part.is_empty() {
                    resolved.push(part.to_string());
                }
            }
        }
        Self::Names(resolved)
    }

    /// Returns true when the given name passes the filter.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        match self {
            Self::All => true,
            Self::Names(names) => names.iter().any(|candidate| candidate == name),
        }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Retains only the operations whose names pass the filter.
#[must_use]
pub fn filter_operations(operations: OperationMap, names: &Filter) -> OperationMap {
    match names {
        Filter::All => operations,
        Filter::Names(_) => {
            operations.into_iter().filter(|(name, _)| names.matches(name)).collect()
        }
    }
}
