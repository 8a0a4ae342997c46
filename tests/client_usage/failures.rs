//! Injected failures: errors, panics, lifecycle hooks and unregistered calls.

use std::panic::{self, AssertUnwindSafe};

use crate::common::*;
use redimock::{args, vals, Conn, Connection, Error, Value};

#[test]
fn injected_panic_unwinds_the_caller() {
    let conn = Conn::new();
    conn.command("HGETALL", args!["person:1"])
        .expect_panic("connection reset");

    let caught = panic::catch_unwind(AssertUnwindSafe(|| retrieve_person(&conn, "1")));
    let payload = caught.unwrap_err();
    assert_eq!(
        payload.downcast_ref::<Value>(),
        Some(&Value::from("connection reset"))
    );

    // The connection stays usable after the panic.
    conn.command("PING", args![]).expect("PONG");
    assert_eq!(conn.do_command("PING", &[]).unwrap(), Value::from("PONG"));
}

#[test]
fn panicking_callback_propagates() {
    let conn = Conn::new();
    conn.command("GET", args!["k"])
        .handle(|_| panic!("callback failure"));

    let caught = panic::catch_unwind(AssertUnwindSafe(|| conn.do_command("GET", &vals!["k"])));
    assert!(caught.is_err());
    assert!(conn.find("GET", &vals!["k"]).is_some());
}

#[test]
fn outcomes_change_across_calls() {
    let conn = Conn::new();
    conn.command("GET", args!["flaky"])
        .expect_error(Error::reply("LOADING"))
        .expect("ready");

    assert_eq!(
        conn.do_command("GET", &vals!["flaky"]),
        Err(Error::reply("LOADING"))
    );
    assert_eq!(
        conn.do_command("GET", &vals!["flaky"]),
        Ok(Value::from("ready"))
    );
}

#[test]
fn unregistered_call_names_the_command_and_suggests() {
    let conn = Conn::new();
    conn.command("HGETALL", args!["person:1"]);
    conn.command("HGETALL", args!["person:2"]);

    let err = retrieve_person(&conn, "3").unwrap_err();
    let message = err.to_string();
    assert!(message.contains("HGETALL"), "{}", message);
    assert!(message.contains("person:3"), "{}", message);
    assert!(message.contains("person:1"), "{}", message);
    assert!(message.contains("person:2"), "{}", message);
}

#[test]
fn unseen_command_with_nothing_registered() {
    let conn = Conn::new();
    let err = conn.do_command("UNSEEN", &[]).unwrap_err();
    assert!(err.to_string().contains("UNSEEN"));
}

#[test]
fn argument_order_matters_at_call_time() {
    let conn = Conn::new();
    conn.command("HMGET", args!["h", "a", "b"]).expect("ok");
    assert!(conn.do_command("HMGET", &vals!["h", "a", "b"]).is_ok());
    assert!(matches!(
        conn.do_command("HMGET", &vals!["h", "b", "a"]),
        Err(Error::Unregistered { .. })
    ));
}

#[test]
fn lifecycle_hooks_inject_failures() {
    let conn = Conn::new();
    assert!(conn.close().is_ok());

    conn.set_close_hook(|| Err(Error::reply("close: broken pipe")));
    conn.set_err_hook(|| Err(Error::reply("connection lost")));
    conn.set_flush_hook(|| Err(Error::reply("flush: timeout")));

    assert_eq!(conn.close(), Err(Error::reply("close: broken pipe")));
    assert_eq!(conn.err(), Err(Error::reply("connection lost")));
    assert!(retrieve_people(&conn, &["1"]).is_err());
}

#[test]
fn clear_orphans_previous_expectations() {
    let conn = Conn::new();
    let old = conn.command("GET", args!["k"]).expect("v");
    conn.do_command("GET", &vals!["k"]).unwrap();

    conn.clear();

    assert_eq!(conn.stats(&old), 0);
    assert!(matches!(
        conn.do_command("GET", &vals!["k"]),
        Err(Error::Unregistered { .. })
    ));
}
