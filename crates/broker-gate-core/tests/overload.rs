// crates/broker-gate-core/tests/overload.rs
// ============================================================================
// Module: Overload Resolution Tests
// Description: Tests for schema matching and argument marshaling.
// Purpose: Ensure exactly one overload is selected and arguments are typed.
// Dependencies: broker-gate-core
// ============================================================================

//! ## Overview
//! Builds overload sets by hand and asserts deterministic selection by arity
//! and type, name-prefix enforcement, and the zero/multiple match failures.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use broker_gate_core::OperationSchema;
use broker_gate_core::OverloadError;
use broker_gate_core::ParameterDescriptor;
use broker_gate_core::resolve_overload;

// ============================================================================
// SECTION: Helpers
// ============================================================================

fn param(name: &str, type_tag: &str) -> ParameterDescriptor {
    ParameterDescriptor {
        name: name.to_string(),
        type_tag: type_tag.to_string(),
        desc: String::new(),
    }
}

fn schema(args: Vec<ParameterDescriptor>, ret: &str) -> OperationSchema {
    OperationSchema {
        args,
        ret: ret.to_string(),
        desc: String::new(),
    }
}

fn list_addresses_overloads() -> Vec<OperationSchema> {
    vec![
        schema(vec![param("separator", "java.lang.String")], "java.lang.String"),
        schema(Vec::new(), "void"),
    ]
}

// ============================================================================
// SECTION: Tests
// ============================================================================

/// Verifies one string argument selects the one-parameter overload.
#[test]
fn selects_one_argument_overload() {
    let args = resolve_overload("listAddresses", &list_addresses_overloads(), &[
        "a".to_string(),
    ])
    .expect("resolve");
    assert_eq!(args.len(), 1);
    assert_eq!(args[0].type_tag, "java.lang.String");
    assert_eq!(args[0].value, "a");
}

/// Verifies empty arguments select the zero-parameter overload.
#[test]
fn selects_zero_argument_overload() {
    let args =
        resolve_overload("listAddresses", &list_addresses_overloads(), &[]).expect("resolve");
    assert!(args.is_empty());
}

/// Verifies a name prefix must equal the declared parameter name.
#[test]
fn name_prefix_must_match_declared_name() {
    let overloads = list_addresses_overloads();
    let args = resolve_overload("listAddresses", &overloads, &["separator:;".to_string()])
        .expect("resolve");
    assert_eq!(args[0].value, ";");

    let err = resolve_overload("listAddresses", &overloads, &["wrong:;".to_string()])
        .expect_err("must fail");
    assert!(matches!(err, OverloadError::NoMatchingOverload { .. }));
}

/// Verifies a type mismatch disqualifies the schema instead of aborting.
#[test]
fn type_mismatch_disqualifies_schema() {
    let overloads = vec![
        schema(vec![param("count", "int")], "void"),
        schema(vec![param("label", "java.lang.String")], "void"),
    ];
    let args = resolve_overload("touch", &overloads, &["not-a-number".to_string()])
        .expect("string overload");
    assert_eq!(args[0].type_tag, "java.lang.String");
}

/// Verifies every position must coerce, not only the first.
#[test]
fn all_positions_must_coerce() {
    let overloads = vec![schema(
        vec![param("name", "java.lang.String"), param("durable", "boolean")],
        "void",
    )];
    let err = resolve_overload("createQueue", &overloads, &[
        "orders".to_string(),
        "maybe".to_string(),
    ])
    .expect_err("must fail");
    assert!(matches!(err, OverloadError::NoMatchingOverload { .. }));
}

/// Verifies multiple satisfied overloads are ambiguous.
#[test]
fn multiple_matches_are_ambiguous() {
    let overloads = vec![
        schema(vec![param("a", "java.lang.String")], "void"),
        schema(vec![param("b", "java.lang.String")], "void"),
    ];
    let err =
        resolve_overload("dup", &overloads, &["x".to_string()]).expect_err("must fail");
    assert!(matches!(err, OverloadError::AmbiguousOverload { .. }));
}
