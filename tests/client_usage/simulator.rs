//! Client code running against the keyspace simulator.

use redimock::{install, vals, Connection, Error, Value};

use crate::common::init_tracing;

/// Leaderboard client: record a score and read the top of the board.
fn record_score(conn: &impl Connection, player: &str, score: i64) -> redimock::Result<bool> {
    let added = conn.do_command("ZADD", &vals!["leaderboard", score, player])?;
    Ok(added == Value::Int(1))
}

fn top_players(conn: &impl Connection, n: i64) -> redimock::Result<Vec<Value>> {
    let reply = conn.do_command("ZRANGE", &vals!["leaderboard", -n, -1])?;
    Ok(reply.as_array().map(<[Value]>::to_vec).unwrap_or_default())
}

#[test]
fn leaderboard_on_simulator() {
    init_tracing();
    let conn = redimock::new_fake();

    assert!(record_score(&conn, "ann", 30).unwrap());
    assert!(record_score(&conn, "bob", 10).unwrap());
    assert!(record_score(&conn, "cid", 20).unwrap());
    assert!(!record_score(&conn, "bob", 40).unwrap());

    assert_eq!(
        top_players(&conn, 2).unwrap(),
        vec![Value::from(b"ann"), Value::from(b"bob")]
    );
    assert_eq!(
        conn.do_command("ZCOUNT", &vals!["leaderboard", "(20", "+inf"])
            .unwrap(),
        Value::Int(2)
    );
}

#[test]
fn simulator_keyspace_is_inspectable() {
    let conn = redimock::Conn::new();
    let keyspace = install(&conn);

    conn.do_command("SADD", &vals!["tags", "rust", "mock"]).unwrap();
    conn.do_command("SET", &vals!["greeting", "hi"]).unwrap();

    let ks = keyspace.lock();
    assert_eq!(ks.len(), 2);
    assert_eq!(ks.set("tags").unwrap().map(|s| s.len()), Some(2));
}

#[test]
fn wrong_type_does_not_modify_the_key() {
    let conn = redimock::new_fake();
    conn.do_command("SET", &vals!["k", "v"]).unwrap();

    let err = conn.do_command("ZADD", &vals!["k", 1, "m"]).unwrap_err();
    assert!(matches!(err, Error::WrongType { .. }));
    assert_eq!(conn.do_command("GET", &vals!["k"]).unwrap(), Value::from("v"));
}

#[test]
fn flushdb_in_the_middle_of_a_session() {
    let conn = redimock::new_fake();
    conn.do_command("SADD", &vals!["s", "a"]).unwrap();
    conn.do_command("FLUSHDB", &[]).unwrap();
    assert_eq!(
        conn.do_command("SMEMBERS", &vals!["s"]).unwrap(),
        Value::Array(vec![])
    );
    assert_eq!(conn.do_command("SADD", &vals!["s", "a"]).unwrap(), Value::Int(1));
}
