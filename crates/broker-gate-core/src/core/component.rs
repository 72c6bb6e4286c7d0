// crates/broker-gate-core/src/core/component.rs
// ============================================================================
// Module: Component Kinds
// Description: Closed set of managed broker component kinds with aliases.
// Purpose: Replace string-keyed component dispatch with a tagged variant.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Commands address broker sub-resources by external alias (`queue`,
//! `queues`, `cluster-connection`, ...). The alias table maps both singular
//! and plural forms onto one [`ComponentKind`] variant; an unknown alias is a
//! typed error, never a silent default.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Component kind lookup errors.
#[derive(Debug, Error)]
pub enum ComponentKindError {
    /// The alias does not name a supported component kind.
    #[error("component type not supported: {name}")]
    Unsupported {
        /// Alias text supplied by the caller.
        name: String,
    },
}

// ============================================================================
// SECTION: Component Kind
// ============================================================================

/// A managed broker sub-resource kind, or the broker itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentKind {
    /// The broker root component.
    Broker,
    /// A queue.
    Queue,
    /// An address.
    Address,
    /// An acceptor.
    Acceptor,
    /// A cluster connection.
    ClusterConnection,
}

impl ComponentKind {
    /// Parses an external alias, accepting singular and plural forms.
    ///
    /// # Errors
    ///
    /// Returns [`ComponentKindError::Unsupported`] for unknown aliases.
    pub fn parse(alias: &str) -> Result<Self, ComponentKindError> {
        match alias {
            "broker" => Ok(Self::Broker),
            "queue" | "queues" => Ok(Self::Queue),
            "address" | "addresses" => Ok(Self::Address),
            "acceptor" | "acceptors" => Ok(Self::Acceptor),
            "cluster-connection" | "cluster-connections" => Ok(Self::ClusterConnection),
            other => Err(ComponentKindError::Unsupported {
                name: other.to_string(),
            }),
        }
    }

    /// Returns the canonical singular name of this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Broker => "broker",
            Self::Queue => "queue",
            Self::Address => "address",
            Self::Acceptor => "acceptor",
            Self::ClusterConnection => "cluster-connection",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
