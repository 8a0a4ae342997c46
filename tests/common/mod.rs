//! Shared test utilities for the integration test suites.
//!
//! Holds a small piece of "production" client code written against the
//! `Connection` trait, the way an application would use a real client.
//! Import via `mod common;` from a suite's main.rs.

#![allow(dead_code)]

use std::sync::Once;

use redimock::{vals, Connection, Error, Result, Value};

// ============================================================================
// Logging
// ============================================================================

static INIT_TRACING: Once = Once::new();

/// Route library logs to the test output.
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();
    });
}

// ============================================================================
// Client code under test
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Person {
    pub name: String,
    pub age: i64,
}

/// Decode an `HGETALL`-style reply into a person.
pub fn scan_person(reply: &Value) -> Result<Person> {
    let fields = reply
        .as_array()
        .ok_or_else(|| Error::reply(format!("expected array reply, got {}", reply)))?;

    let mut person = Person::default();
    for pair in fields.chunks(2) {
        let [field, value] = pair else {
            return Err(Error::reply("odd number of hash fields"));
        };
        let field = field.to_arg_string().unwrap_or_default();
        let value = value.to_arg_string().unwrap_or_default();
        match field.as_str() {
            "name" => person.name = value,
            "age" => {
                person.age = value
                    .parse()
                    .map_err(|_| Error::reply(format!("bad age {:?}", value)))?
            }
            _ => {}
        }
    }
    Ok(person)
}

pub fn retrieve_person(conn: &impl Connection, id: &str) -> Result<Person> {
    let reply = conn.do_command("HGETALL", &vals![format!("person:{}", id)])?;
    scan_person(&reply)
}

pub fn retrieve_people(conn: &impl Connection, ids: &[&str]) -> Result<Vec<Person>> {
    for id in ids {
        conn.send("HGETALL", &vals![format!("person:{}", id)])?;
    }
    conn.flush()?;

    ids.iter()
        .map(|_| conn.receive().and_then(|reply| scan_person(&reply)))
        .collect()
}

/// Increment a counter inside a transaction and return the new value.
pub fn bump_in_transaction(conn: &impl Connection, key: &str) -> Result<i64> {
    conn.send("MULTI", &[])?;
    conn.send("INCR", &vals![key])?;
    let reply = conn.do_command("EXEC", &[])?;
    reply
        .as_array()
        .and_then(|replies| replies.first())
        .and_then(Value::as_int)
        .ok_or_else(|| Error::reply("unexpected EXEC reply"))
}
