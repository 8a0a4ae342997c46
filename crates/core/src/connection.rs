//! Client connection abstraction
//!
//! Code under test talks to the store through [`Connection`]. A real client
//! and the mock both implement it, so production code can take
//! `&impl Connection` and tests can hand it a mocked connection.

use crate::error::Result;
use crate::value::Value;

/// Request/response surface of a key-value store client.
///
/// Thread safety: implementations must be safe to call concurrently from
/// multiple threads (requires Send + Sync).
pub trait Connection: Send + Sync {
    /// Send a command and wait for its reply.
    fn do_command(&self, name: &str, args: &[Value]) -> Result<Value>;

    /// Queue a command for pipelined submission.
    fn send(&self, name: &str, args: &[Value]) -> Result<()>;

    /// Submit queued commands.
    fn flush(&self) -> Result<()>;

    /// Read the reply of the oldest queued command.
    fn receive(&self) -> Result<Value>;

    /// Close the connection.
    fn close(&self) -> Result<()>;

    /// Report a fatal connection error, if any.
    fn err(&self) -> Result<()>;
}
