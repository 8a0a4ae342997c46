//! Registered argument patterns
//!
//! An [`Arg`] is one position of a registered command: either a literal
//! [`Value`] compared by equality, or a shared [`Matcher`].

use std::fmt;
use std::sync::Arc;

use crate::matcher::Matcher;
use crate::value::Value;

/// One position of a registered argument pattern
#[derive(Clone)]
pub enum Arg {
    /// Compared by structural equality (type and value)
    Literal(Value),
    /// Compared by invoking the matcher on the candidate
    Wildcard(Arc<dyn Matcher>),
}

impl Arg {
    /// Wrap a matcher as a wildcard argument.
    pub fn matcher<M: Matcher + 'static>(matcher: M) -> Self {
        Arg::Wildcard(Arc::new(matcher))
    }

    /// Whether this position is a wildcard.
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Arg::Wildcard(_))
    }

    /// Whether this position absorbs all remaining call arguments.
    pub fn accepts_trailing(&self) -> bool {
        match self {
            Arg::Wildcard(m) => m.accepts_trailing(),
            Arg::Literal(_) => false,
        }
    }

    /// Call-time check of a candidate argument against this position.
    pub fn accepts(&self, candidate: &Value) -> bool {
        match self {
            Arg::Literal(v) => v == candidate,
            Arg::Wildcard(m) => m.matches(candidate),
        }
    }

    /// Registration-time identity: literals by equality, wildcards by kind
    /// and key.
    ///
    /// A literal never equals a wildcard.
    pub fn same_pattern(&self, other: &Arg) -> bool {
        match (self, other) {
            (Arg::Literal(a), Arg::Literal(b)) => a == b,
            (Arg::Wildcard(a), Arg::Wildcard(b)) => {
                a.kind() == b.kind() && a.key() == b.key()
            }
            _ => false,
        }
    }

    /// Literal value, if this position is not a wildcard.
    pub fn as_literal(&self) -> Option<&Value> {
        match self {
            Arg::Literal(v) => Some(v),
            Arg::Wildcard(_) => None,
        }
    }
}

impl fmt::Debug for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Literal(v) => f.debug_tuple("Literal").field(v).finish(),
            Arg::Wildcard(m) => f.debug_tuple("Wildcard").field(&m.key()).finish(),
        }
    }
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Literal(v) => write!(f, "{}", v),
            Arg::Wildcard(m) => write!(f, "<{}>", m.key()),
        }
    }
}

impl<T: Into<Value>> From<T> for Arg {
    fn from(v: T) -> Self {
        Arg::Literal(v.into())
    }
}

/// Render an argument list as `[a, b, c]`.
pub fn display_list<T: fmt::Display>(items: &[T]) -> String {
    let parts: Vec<String> = items.iter().map(|item| item.to_string()).collect();
    format!("[{}]", parts.join(", "))
}

/// Build a `Vec<Arg>` mixing literals and wildcards.
///
/// ```
/// use redimock_core::{any_int, args, Arg};
///
/// let pattern = args!["key", any_int()];
/// assert!(pattern[1].is_wildcard());
/// ```
#[macro_export]
macro_rules! args {
    () => { ::std::vec::Vec::<$crate::Arg>::new() };
    ($($x:expr),+ $(,)?) => { vec![$($crate::Arg::from($x)),+] };
}
