//! Pipelining, transactions and wait-for-signal receive.

use std::thread;
use std::time::Duration;

use crate::common::*;
use redimock::{args, vals, Conn, ConnConfig, Connection, Value};

#[test]
fn transaction_with_hand_written_exec() {
    let conn = Conn::new();
    let weak = conn.downgrade();
    conn.command("MULTI", args![]);
    conn.command("INCR", args!["visits"]).expect(11);
    conn.command("EXEC", args![]).handle(move |_| match weak.upgrade() {
        Some(conn) => conn.drain_pending().map(Value::Array),
        None => Ok(Value::Null),
    });

    assert_eq!(bump_in_transaction(&conn, "visits").unwrap(), 11);
}

#[test]
fn transaction_on_simulator() {
    let conn = redimock::new_fake();
    conn.command("INCR", args!["visits"]).expect(1).expect(2);

    assert_eq!(bump_in_transaction(&conn, "visits").unwrap(), 1);
    assert_eq!(bump_in_transaction(&conn, "visits").unwrap(), 2);
}

#[test]
fn do_drains_exactly_one_queued_call() {
    let conn = Conn::new();
    let a = conn.command("SET", args!["a", 1]).expect("OK");
    let b = conn.command("SET", args!["b", 2]).expect("OK");
    conn.command("PING", args![]).expect("PONG");

    conn.send("SET", &vals!["a", 1]).unwrap();
    conn.send("SET", &vals!["b", 2]).unwrap();
    conn.do_command("PING", &[]).unwrap();

    assert_eq!((conn.stats(&a), conn.stats(&b)), (1, 0));
    assert_eq!(conn.queued_calls(), 1);
    assert_eq!(conn.drain_pending().unwrap().len(), 2);
    assert_eq!(conn.stats(&b), 1);
}

#[test]
fn subscribe_loop_waits_for_signals() {
    let conn = Conn::with_config(ConnConfig {
        receive_wait: true,
        ..ConnConfig::default()
    });
    conn.command("SUBSCRIBE", args!["news"])
        .expect_slice(vec![Value::from("message"), Value::from("news"), Value::from("hello")]);
    conn.send("SUBSCRIBE", &vals!["news"]).unwrap();

    let listener = {
        let conn = conn.clone();
        thread::spawn(move || conn.receive())
    };

    thread::sleep(Duration::from_millis(20));
    assert!(!listener.is_finished());
    conn.receive_now();

    let message = listener.join().unwrap().unwrap();
    assert_eq!(message.as_array().map(<[Value]>::len), Some(3));
}

#[test]
fn config_file_drives_connection() {
    let config = ConnConfig::from_toml_str("suggest_similar = false").unwrap();
    let conn = Conn::with_config(config);
    conn.command("GET", args!["a"]);
    let err = conn.do_command("GET", &vals!["b"]).unwrap_err();
    assert!(!err.to_string().contains("registered argument patterns"));
}
