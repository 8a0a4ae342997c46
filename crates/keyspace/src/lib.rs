//! In-memory keyspace simulator
//!
//! Turns a mocked [`Conn`] into a miniature store: scalar keys, unordered
//! sets and score-ordered sorted sets. Every supported command is an
//! ordinary registration on the connection whose callback operates on a
//! shared [`Keyspace`], so extra expectations can be layered on top.
//!
//! # Supported commands
//!
//! | Command | Reply |
//! |---------|-------|
//! | `SET key value` | `"OK"` |
//! | `GET key` | stored value or nil |
//! | `KEYS pattern` | matching key names |
//! | `FLUSHDB` | nil |
//! | `SADD`, `SREM` | count of members added / removed |
//! | `SMEMBERS`, `SUNION` | member names |
//! | `ZADD` | count of new members |
//! | `ZRANGE`, `ZRANGEBYSCORE` | members, optionally with scores |
//! | `ZCOUNT`, `ZREMRANGEBYSCORE` | count of members in range |
//! | `MULTI`, `EXEC` | nil / replies of the queued commands |
//!
//! # Example
//!
//! ```
//! use redimock_core::{vals, Connection, Value};
//!
//! let conn = redimock_keyspace::new_fake();
//! conn.do_command("SET", &vals!["foo", "bar"]).unwrap();
//! assert_eq!(conn.do_command("GET", &vals!["foo"]).unwrap(), Value::from("bar"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod glob;
pub mod handlers;
pub mod range;
pub mod store;

use std::sync::Arc;

use parking_lot::Mutex;
use redimock_conn::Conn;
use redimock_core::{any_data, any_data_array, args, Arg, Result, Value};
use tracing::debug;

pub use glob::glob_match;
pub use range::{Bound, ScoreRange};
pub use store::{Container, Keyspace, Kind};

/// Keyspace shared between the installed command callbacks.
pub type SharedKeyspace = Arc<Mutex<Keyspace>>;

/// Handler operating on the keyspace.
type Handler = fn(&mut Keyspace, &[Value]) -> Result<Value>;

/// Create a connection that behaves like an empty store.
pub fn new_fake() -> Conn {
    let conn = Conn::new();
    install(&conn);
    conn
}

/// Register the simulated commands on `conn`.
///
/// Returns the keyspace the callbacks operate on. Registrations made later
/// on the same connection take priority over the simulated ones when they
/// match more closely.
pub fn install(conn: &Conn) -> SharedKeyspace {
    let keyspace: SharedKeyspace = Arc::new(Mutex::new(Keyspace::new()));

    let weak = conn.downgrade();
    conn.command("MULTI", args![]);
    conn.command("EXEC", args![])
        .handle(move |_| handlers::transaction::exec(&weak));

    let table: [(&str, Vec<Arg>, Handler); 13] = [
        ("SET", args![any_data_array()], handlers::strings::set),
        ("GET", args![any_data()], handlers::strings::get),
        ("KEYS", args![any_data()], handlers::strings::keys),
        ("FLUSHDB", args![], handlers::strings::flushdb),
        ("SADD", args![any_data_array()], handlers::sets::sadd),
        ("SREM", args![any_data_array()], handlers::sets::srem),
        ("SMEMBERS", args![any_data()], handlers::sets::smembers),
        ("SUNION", args![any_data_array()], handlers::sets::sunion),
        ("ZADD", args![any_data_array()], handlers::sorted_sets::zadd),
        ("ZRANGE", args![any_data_array()], handlers::sorted_sets::zrange),
        ("ZCOUNT", args![any_data_array()], handlers::sorted_sets::zcount),
        (
            "ZREMRANGEBYSCORE",
            args![any_data_array()],
            handlers::sorted_sets::zremrangebyscore,
        ),
        (
            "ZRANGEBYSCORE",
            args![any_data_array()],
            handlers::sorted_sets::zrangebyscore,
        ),
    ];

    for (name, pattern, handler) in table {
        let keyspace = Arc::clone(&keyspace);
        conn.command(name, pattern).handle(move |call| {
            let mut ks = keyspace.lock();
            let reply = handler(&mut *ks, call);
            if let Err(err) = &reply {
                debug!(target: "redimock::keyspace", command = name, error = %err, "command failed");
            }
            reply
        });
    }

    debug!(target: "redimock::keyspace", "installed keyspace simulator");
    keyspace
}
