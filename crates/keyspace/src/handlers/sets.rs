//! Set command handlers.

use std::collections::HashSet;

use redimock_core::{Result, Value};

use super::{require_args, text};
use crate::store::Keyspace;

/// Handle `SADD key member [member ...]`.
///
/// Returns the number of members that were not already present.
pub fn sadd(ks: &mut Keyspace, args: &[Value]) -> Result<Value> {
    require_args("SADD", args, 2)?;
    let key = text(&args[0])?;
    let members = args[1..].iter().map(text).collect::<Result<Vec<_>>>()?;

    let set = ks.set_or_create(&key)?;
    let added = members
        .into_iter()
        .map(|member| set.insert(member))
        .filter(|inserted| *inserted)
        .count();
    Ok(Value::from(added))
}

/// Handle `SREM key member [member ...]`.
///
/// Returns the number of members that were present; a missing key removes
/// nothing.
pub fn srem(ks: &mut Keyspace, args: &[Value]) -> Result<Value> {
    require_args("SREM", args, 2)?;
    let key = text(&args[0])?;
    let members = args[1..].iter().map(text).collect::<Result<Vec<_>>>()?;

    let removed = match ks.set_mut(&key)? {
        Some(set) => members.iter().filter(|member| set.remove(*member)).count(),
        None => 0,
    };
    Ok(Value::from(removed))
}

/// Handle `SMEMBERS key`.
pub fn smembers(ks: &mut Keyspace, args: &[Value]) -> Result<Value> {
    require_args("SMEMBERS", args, 1)?;
    let key = text(&args[0])?;
    Ok(match ks.set(&key)? {
        Some(set) => Value::bulk_array(set.iter()),
        None => Value::Array(Vec::new()),
    })
}

/// Handle `SUNION key [key ...]`.
///
/// Missing keys contribute nothing.
pub fn sunion(ks: &mut Keyspace, args: &[Value]) -> Result<Value> {
    require_args("SUNION", args, 1)?;
    let mut union: HashSet<&str> = HashSet::new();
    for arg in args {
        let key = text(arg)?;
        if let Some(set) = ks.set(&key)? {
            union.extend(set.iter().map(String::as_str));
        }
    }
    Ok(Value::bulk_array(union))
}
