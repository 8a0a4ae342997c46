//! Command matching predicates
//!
//! Two notions of "same command" are used:
//!
//! - **Call-time** ([`call_matches`]): positional. The called arguments must
//!   line up with the registered pattern in order; wildcards are invoked on
//!   the candidate at their position.
//! - **Registration-time** ([`registration_equal`], [`pattern_equal`]): used
//!   to drop an earlier registration when an equivalent one is added. Literal
//!   patterns are equal when they hold the same multiset of arguments in any
//!   order; wildcard patterns are equal only position by position with the
//!   same wildcard kinds.
//!
//! Names are compared exactly (case-sensitive).

use crate::arg::Arg;
use crate::value::Value;

/// Whether a call `(name, args)` resolves to the registered `(cmd_name, pattern)`.
///
/// The argument count must match exactly unless the pattern contains a
/// trailing-arguments marker, in which case only the positions before the
/// marker are checked and the marker absorbs the rest.
pub fn call_matches(name: &str, args: &[Value], cmd_name: &str, pattern: &[Arg]) -> bool {
    if name != cmd_name {
        return false;
    }

    let checked = match pattern.iter().position(Arg::accepts_trailing) {
        Some(marker) => {
            if args.len() < marker {
                return false;
            }
            &pattern[..marker]
        }
        None => {
            if args.len() != pattern.len() {
                return false;
            }
            pattern
        }
    };

    checked
        .iter()
        .zip(args.iter())
        .all(|(expected, candidate)| expected.accepts(candidate))
}

/// Registration-time equality for literal patterns, ignoring argument order.
///
/// Both patterns must be wildcard-free and hold the same multiset of values.
pub fn registration_equal(name: &str, args: &[Arg], cmd_name: &str, pattern: &[Arg]) -> bool {
    if name != cmd_name || args.len() != pattern.len() {
        return false;
    }
    if args.iter().chain(pattern.iter()).any(Arg::is_wildcard) {
        return false;
    }

    let mut used = vec![false; pattern.len()];
    args.iter().all(|arg| {
        let slot = pattern
            .iter()
            .enumerate()
            .find(|(i, candidate)| !used[*i] && candidate.same_pattern(arg))
            .map(|(i, _)| i);
        match slot {
            Some(i) => {
                used[i] = true;
                true
            }
            None => false,
        }
    })
}

/// Registration-time equality for wildcard patterns: exact and positional.
pub fn pattern_equal(name: &str, args: &[Arg], cmd_name: &str, pattern: &[Arg]) -> bool {
    name == cmd_name
        && args.len() == pattern.len()
        && args
            .iter()
            .zip(pattern.iter())
            .all(|(a, b)| a.same_pattern(b))
}
