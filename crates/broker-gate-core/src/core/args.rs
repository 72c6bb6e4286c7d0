// crates/broker-gate-core/src/core/args.rs
// ============================================================================
// Module: Argument Codec
// Description: Escaping and tokenizing of raw operation argument strings.
// Purpose: Preserve literal commas and strip optional name prefixes.
// Dependencies: base64
// ============================================================================

//! ## Overview
//! Operation arguments arrive as one comma-separated string; a literal comma
//! inside a value must be escaped as `\,`. [`normalize`] replaces every
//! escaped comma with a private token that ordinary user text never produces,
//! so downstream tokenizers can split freely; [`split_args`] splits on the
//! remaining unescaped commas and restores each token; [`strip_name`] removes
//! an optional `name:` prefix.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::LazyLock;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Argument delimiter in raw argument strings.
const ARG_SEPARATOR: &str = ",";
/// Separator between an argument name prefix and its value.
const ARG_NAME_SEPARATOR: char = ':';
/// Escape sequence users write for a literal comma.
const ESCAPED_SEPARATOR: &str = "\\,";

/// Private escape token substituted for escaped commas.
static SEPARATOR_TOKEN: LazyLock<String> =
    LazyLock::new(|| format!("___{}___", STANDARD.encode(ARG_SEPARATOR)));

// ============================================================================
// SECTION: Codec
// ============================================================================

/// Replaces every escaped comma with the private escape token.
#[must_use]
pub fn normalize(raw: &str) -> String {
    raw.replace(ESCAPED_SEPARATOR, SEPARATOR_TOKEN.as_str())
}

/// Restores the private escape token back into a literal comma.
#[must_use]
pub fn restore(token: &str) -> String {
    token.replace(SEPARATOR_TOKEN.as_str(), ARG_SEPARATOR)
}

/// Splits a normalized argument string into restored argument tokens.
///
/// An empty string yields no tokens.
#[must_use]
pub fn split_args(arg_str: &str) -> Vec<String> {
    if arg_str.is_empty() {
        return Vec::new();
    }
    arg_str.split(ARG_SEPARATOR).map(restore).collect()
}

/// Strips a `name:` prefix, returning the value portion.
///
/// A colon with an empty left-hand side is part of the value and is kept.
#[must_use]
pub fn strip_name(token: &str) -> &str {
    match token.find(ARG_NAME_SEPARATOR) {
        Some(index) if index > 0 => &token[index + ARG_NAME_SEPARATOR.len_utf8()..],
        _ => token,
    }
}
