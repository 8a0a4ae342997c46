//! Transaction command handlers.
//!
//! `MULTI` is a plain registration with no outcome. Commands sent after it
//! are queued on the connection; `EXEC` resolves them and returns every
//! accumulated non-nil reply in order.

use redimock_conn::WeakConn;
use redimock_core::{Result, Value};
use tracing::debug;

/// Handle `EXEC`.
pub fn exec(conn: &WeakConn) -> Result<Value> {
    let Some(conn) = conn.upgrade() else {
        return Ok(Value::Array(Vec::new()));
    };
    let results = conn.drain_pending()?;
    debug!(target: "redimock::keyspace", replies = results.len(), "executed transaction");
    Ok(Value::Array(results))
}
