//! Command handlers organized by container kind.
//!
//! | Module | Commands | Container |
//! |--------|----------|-----------|
//! | `strings` | SET, GET, KEYS, FLUSHDB | Scalar / whole keyspace |
//! | `sets` | SADD, SREM, SMEMBERS, SUNION | Set |
//! | `sorted_sets` | ZADD, ZRANGE, ZCOUNT, ZREMRANGEBYSCORE, ZRANGEBYSCORE | SortedSet |
//! | `transaction` | EXEC | Pending pipeline results |
//!
//! Every keyspace handler has the signature
//! `fn(&mut Keyspace, &[Value]) -> Result<Value>` and receives the call
//! arguments exactly as the client passed them.

pub mod sets;
pub mod sorted_sets;
pub mod strings;
pub mod transaction;

use redimock_core::{Error, Result, Value};

// =============================================================================
// Argument helpers
// =============================================================================

/// Fail unless at least `min` arguments were passed.
pub(crate) fn require_args(command: &str, args: &[Value], min: usize) -> Result<()> {
    if args.len() < min {
        return Err(Error::invalid_input(format!(
            "wrong number of arguments for '{}' command",
            command
        )));
    }
    Ok(())
}

/// Key or member name of a scalar argument.
pub(crate) fn text(arg: &Value) -> Result<String> {
    arg.to_arg_string()
        .ok_or_else(|| Error::invalid_input(format!("{} is not a valid argument", arg)))
}

/// Integer argument (score or rank index).
pub(crate) fn integer(arg: &Value) -> Result<i64> {
    arg.to_i64()
        .ok_or_else(|| Error::invalid_input(format!("value is not an integer: {}", arg)))
}

/// Whether the call ends with a `WITHSCORES` option after `fixed` leading
/// arguments.
pub(crate) fn with_scores(args: &[Value], fixed: usize) -> bool {
    args.len() > fixed
        && args
            .last()
            .and_then(Value::to_arg_string)
            .map_or(false, |opt| opt.eq_ignore_ascii_case("withscores"))
}

/// Bulk reply of member names, optionally interleaved with scores.
pub(crate) fn members_reply<'a, I>(members: I, scores: bool) -> Value
where
    I: IntoIterator<Item = (&'a str, i64)>,
{
    let mut out = Vec::new();
    for (member, score) in members {
        out.push(Value::Bytes(member.as_bytes().to_vec()));
        if scores {
            out.push(Value::Bytes(score.to_string().into_bytes()));
        }
    }
    Value::Array(out)
}
