//! redimock - mock connection for key-value store clients
//!
//! Code that talks to a key-value store through the [`Connection`] trait can
//! be tested against a [`Conn`] instead of a live server. Expected commands
//! are registered up front with their replies; calls are matched against
//! them and replies are delivered in order.
//!
//! # Quick Start
//!
//! ```
//! use redimock::{args, vals, Conn, Connection, Value};
//!
//! let conn = Conn::new();
//! conn.command("HGETALL", args!["person:1"])
//!     .expect_map([("name", "Mr. Johnson"), ("age", "42")]);
//!
//! let reply = conn.do_command("HGETALL", &vals!["person:1"]).unwrap();
//! assert_eq!(reply, Value::bulk_array(["name", "Mr. Johnson", "age", "42"]));
//! ```
//!
//! # Architecture
//!
//! - `redimock-core`: values, argument patterns, wildcard matchers, errors and
//!   the [`Connection`] trait
//! - `redimock-conn`: the mocked connection and its command expectations
//! - `redimock-keyspace`: an in-memory store simulator installed on a
//!   connection ([`new_fake`])

pub use redimock_conn::*;
pub use redimock_core::*;
pub use redimock_keyspace::{install, new_fake, Keyspace, SharedKeyspace};
