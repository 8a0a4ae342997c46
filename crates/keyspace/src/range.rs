//! Score bounds and rank slices for sorted-set queries
//!
//! ## Bound tokens
//!
//! | Token | Lower bound | Upper bound |
//! |-------|-------------|-------------|
//! | `5` | `score >= 5` | `score <= 5` |
//! | `(5` | `score > 5` | `score < 5` |
//! | `-inf`, `+inf`, any `...inf` | unconstrained | unconstrained |
//!
//! The `(` prefix takes precedence, so `(inf` is rejected as a non-integer.
//! Integers may be passed as `Value::Int` or as text.

use std::collections::HashMap;

use redimock_core::{Error, Result, Value};

/// One side of a score range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// No constraint on this side
    Unbounded,
    /// Score may equal the limit
    Inclusive(i64),
    /// Score must differ from the limit
    Exclusive(i64),
}

impl Bound {
    /// Parse a bound token.
    pub fn parse(token: &Value) -> Result<Self> {
        if let Value::Int(n) = token {
            return Ok(Bound::Inclusive(*n));
        }

        let text = match token {
            Value::String(s) => s.as_str(),
            Value::Bytes(b) => std::str::from_utf8(b).map_err(|_| not_a_bound(token))?,
            _ => return Err(not_a_bound(token)),
        };

        if let Some(rest) = text.strip_prefix('(') {
            return rest
                .parse()
                .map(Bound::Exclusive)
                .map_err(|_| not_a_bound(token));
        }
        if text.ends_with("inf") {
            return Ok(Bound::Unbounded);
        }
        text.parse()
            .map(Bound::Inclusive)
            .map_err(|_| not_a_bound(token))
    }

    fn admits_above(&self, score: i64) -> bool {
        match *self {
            Bound::Unbounded => true,
            Bound::Inclusive(min) => score >= min,
            Bound::Exclusive(min) => score > min,
        }
    }

    fn admits_below(&self, score: i64) -> bool {
        match *self {
            Bound::Unbounded => true,
            Bound::Inclusive(max) => score <= max,
            Bound::Exclusive(max) => score < max,
        }
    }
}

fn not_a_bound(token: &Value) -> Error {
    Error::invalid_input(format!("min or max is not an integer: {}", token))
}

/// Score interval of `ZCOUNT`, `ZRANGEBYSCORE` and `ZREMRANGEBYSCORE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreRange {
    /// Lower side
    pub min: Bound,
    /// Upper side
    pub max: Bound,
}

impl ScoreRange {
    /// Parse a `min max` token pair.
    pub fn parse(min: &Value, max: &Value) -> Result<Self> {
        Ok(Self {
            min: Bound::parse(min)?,
            max: Bound::parse(max)?,
        })
    }

    /// Whether `score` lies inside the range.
    pub fn contains(&self, score: i64) -> bool {
        self.min.admits_above(score) && self.max.admits_below(score)
    }
}

/// Members ordered by `(score, member)` ascending.
pub fn ordered(zset: &HashMap<String, i64>) -> Vec<(&str, i64)> {
    let mut members: Vec<(&str, i64)> = zset.iter().map(|(m, s)| (m.as_str(), *s)).collect();
    members.sort_unstable_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)));
    members
}

/// Resolve inclusive rank indices against a sequence of `len` items.
///
/// Negative indices count from the end. Returns `None` when the slice is
/// empty.
pub fn rank_slice(len: usize, start: i64, stop: i64) -> Option<(usize, usize)> {
    let len = i64::try_from(len).ok()?;
    let start = if start < 0 { (len + start).max(0) } else { start };
    let stop = if stop < 0 { len + stop } else { stop.min(len - 1) };

    if start > stop || start >= len {
        return None;
    }
    Some((usize::try_from(start).ok()?, usize::try_from(stop).ok()?))
}
