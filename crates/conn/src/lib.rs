//! Mocked connection for key-value store clients
//!
//! Test code registers expected commands on a [`Conn`], then hands the
//! connection to the code under test through the
//! [`Connection`](redimock_core::Connection) trait.
//!
//! # Architecture
//!
//! - [`Cmd`]: one expectation with its outcome queue, callback and counter
//! - [`Conn`]: the registry of plain and wildcard commands, the pipeline
//!   queue and call statistics
//! - [`ConnConfig`]: settings loadable from TOML
//!
//! # Example
//!
//! ```
//! use redimock_conn::Conn;
//! use redimock_core::{any_int, args, vals, Connection, Value};
//!
//! let conn = Conn::new();
//! let cmd = conn.command("INCRBY", args!["counter", any_int()]).expect(5);
//!
//! assert_eq!(conn.do_command("INCRBY", &vals!["counter", 5]).unwrap(), Value::Int(5));
//! assert_eq!(conn.stats(&cmd), 1);
//! assert!(conn.expectations_were_met().is_ok());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cmd;
pub mod config;
pub mod conn;
mod gate;

pub use cmd::{Callback, Cmd, CmdHash, Outcome};
pub use config::ConnConfig;
pub use conn::{Conn, Hook, WeakConn};
