//! Precompiled endpoint patterns.
//!
//! Compiled on first use and shared for the life of the process.

use regex::Regex;
use std::sync::LazyLock;

/// Loose prefix check: a known transport family, any non-colon suffix, then `://`.
const PROTO_ADDR_GUESS: &str = r"(?i)^(?:tcp|udp|ip|unix)[^:]*://";

/// Full grammar. Group 1 is the scheme, group 2 the address.
const PROTO_ADDR_EXACT: &str =
    r"(?i)^((?:(?:tcp|udp|ip)[46]?)|(?:unix(?:gram|packet)?))://(.+)$";

/// Blank means ASCII whitespace only (`\t \n \f \r` and space). A value made of
/// other Unicode spaces is left for the resolver to treat as a path.
const EMPTY: &str = r"^[\t\n\f\r ]*$";

static EMPTY_RX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMPTY).expect("valid empty-address regex"));

static GUESS_RX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PROTO_ADDR_GUESS).expect("valid guess regex"));

static EXACT_RX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PROTO_ADDR_EXACT).expect("valid exact regex"));

/// Returns true if `s` is empty or whitespace only.
pub fn is_blank(s: &str) -> bool {
    EMPTY_RX.is_match(s)
}

/// Returns true if `s` looks like it was meant as a `scheme://address` string.
pub fn looks_like_proto_addr(s: &str) -> bool {
    GUESS_RX.is_match(s)
}

/// Splits a well-formed `scheme://address` string into its two parts.
///
/// Both slices borrow from `s` and keep their original case.
pub fn split_proto_addr(s: &str) -> Option<(&str, &str)> {
    let caps = EXACT_RX.captures(s)?;
    Some((caps.get(1)?.as_str(), caps.get(2)?.as_str()))
}
