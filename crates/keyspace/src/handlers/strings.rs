//! Scalar and keyspace-wide command handlers.

use redimock_core::{Result, Value};
use tracing::debug;

use super::{require_args, text};
use crate::glob::glob_match;
use crate::store::Keyspace;

/// Handle `SET key value [options...]`.
///
/// Options after the value are accepted and ignored.
pub fn set(ks: &mut Keyspace, args: &[Value]) -> Result<Value> {
    require_args("SET", args, 2)?;
    let key = text(&args[0])?;
    ks.set_scalar(&key, args[1].clone());
    Ok(Value::from("OK"))
}

/// Handle `GET key`.
pub fn get(ks: &mut Keyspace, args: &[Value]) -> Result<Value> {
    require_args("GET", args, 1)?;
    let key = text(&args[0])?;
    Ok(ks.scalar(&key)?.cloned().unwrap_or(Value::Null))
}

/// Handle `KEYS pattern`.
pub fn keys(ks: &mut Keyspace, args: &[Value]) -> Result<Value> {
    require_args("KEYS", args, 1)?;
    let pattern = text(&args[0])?;
    Ok(Value::bulk_array(
        ks.keys()
            .filter(|key| glob_match(pattern.as_bytes(), key.as_bytes())),
    ))
}

/// Handle `FLUSHDB`.
pub fn flushdb(ks: &mut Keyspace, _args: &[Value]) -> Result<Value> {
    debug!(target: "redimock::keyspace", keys = ks.len(), "flushing keyspace");
    ks.flush();
    Ok(Value::Null)
}
