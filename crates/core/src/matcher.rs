//! Wildcard argument matchers
//!
//! A [`Matcher`] stands in for a literal argument when a command is
//! registered. At call time the matcher decides whether the candidate
//! argument is acceptable.
//!
//! Built-in matchers:
//!
//! | Constructor | Accepts |
//! |-------------|---------|
//! | [`any_int`] | any `Value::Int` |
//! | [`any_float`] | any `Value::Float` |
//! | [`any_data`] | any single argument |
//! | [`any_data_array`] | any number of trailing arguments |

use std::fmt;

use crate::arg::Arg;
use crate::value::Value;

/// Predicate standing in for a literal argument.
///
/// Two wildcard arguments are considered the same registration only when
/// both their [`kind`](Matcher::kind) and their [`key`](Matcher::key) are
/// identical, so parameterised matchers of one type stay distinct.
pub trait Matcher: fmt::Debug + Send + Sync {
    /// Whether the candidate argument satisfies this matcher.
    fn matches(&self, candidate: &Value) -> bool;

    /// Stable name of the matcher type.
    fn kind(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Value-level identity, including any parameters. Used for
    /// registration equality, statistics and displaying argument patterns.
    ///
    /// Defaults to the `Debug` rendering of the matcher.
    fn key(&self) -> String {
        format!("{:?}", self)
    }

    /// Whether this matcher absorbs every argument from its position onward.
    fn accepts_trailing(&self) -> bool {
        false
    }
}

/// Matches any integer argument.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnyInt;

impl Matcher for AnyInt {
    fn matches(&self, candidate: &Value) -> bool {
        candidate.is_int()
    }

    fn kind(&self) -> &'static str {
        "any int"
    }

    fn key(&self) -> String {
        self.kind().to_string()
    }
}

/// Matches any float argument.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnyFloat;

impl Matcher for AnyFloat {
    fn matches(&self, candidate: &Value) -> bool {
        candidate.is_float()
    }

    fn kind(&self) -> &'static str {
        "any float"
    }

    fn key(&self) -> String {
        self.kind().to_string()
    }
}

/// Matches any single argument.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnyData;

impl Matcher for AnyData {
    fn matches(&self, _candidate: &Value) -> bool {
        true
    }

    fn kind(&self) -> &'static str {
        "any data"
    }

    fn key(&self) -> String {
        self.kind().to_string()
    }
}

/// Matches zero or more trailing arguments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnyDataArray;

impl Matcher for AnyDataArray {
    fn matches(&self, _candidate: &Value) -> bool {
        true
    }

    fn kind(&self) -> &'static str {
        "any data..."
    }

    fn key(&self) -> String {
        self.kind().to_string()
    }

    fn accepts_trailing(&self) -> bool {
        true
    }
}

/// Wildcard matching any integer argument.
pub fn any_int() -> Arg {
    Arg::matcher(AnyInt)
}

/// Wildcard matching any float argument.
pub fn any_float() -> Arg {
    Arg::matcher(AnyFloat)
}

/// Wildcard matching any single argument.
pub fn any_data() -> Arg {
    Arg::matcher(AnyData)
}

/// Wildcard matching every remaining argument, including none.
pub fn any_data_array() -> Arg {
    Arg::matcher(AnyDataArray)
}
