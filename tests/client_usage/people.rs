//! Request/response and pipelined reads of hash records.

use crate::common::*;
use redimock::{args, Conn, Error};

#[test]
fn do_command_decodes_expected_map() {
    init_tracing();
    let conn = Conn::new();
    conn.command("HGETALL", args!["person:1"])
        .expect_map([("name", "Mr. Johnson"), ("age", "42")]);

    let person = retrieve_person(&conn, "1").unwrap();
    assert_eq!(
        person,
        Person {
            name: "Mr. Johnson".to_string(),
            age: 42,
        }
    );
}

#[test]
fn do_command_returns_injected_error() {
    let conn = Conn::new();
    conn.command("HGETALL", args!["person:1"])
        .expect_error(Error::reply("Simulated error!"));

    let err = retrieve_person(&conn, "1").unwrap_err();
    assert_eq!(err, Error::reply("Simulated error!"));
}

#[test]
fn generic_command_answers_any_id() {
    let conn = Conn::new();
    conn.generic_command("HGETALL")
        .expect_string_slice(["name", "Anyone", "age", "30"]);

    let person = retrieve_person(&conn, "999").unwrap();
    assert_eq!(person.name, "Anyone");
    assert_eq!(person.age, 30);
}

#[test]
fn send_flush_receive_keeps_order() {
    let conn = Conn::new();
    conn.command("HGETALL", args!["person:1"])
        .expect_map([("name", "Mr. Johnson"), ("age", "42")]);
    conn.command("HGETALL", args!["person:2"])
        .expect_map([("name", "Ms. Jennifer"), ("age", "28")]);

    let people = retrieve_people(&conn, &["1", "2"]).unwrap();
    assert_eq!(people.len(), 2);
    assert_eq!(people[0].name, "Mr. Johnson");
    assert_eq!(people[1].name, "Ms. Jennifer");
    assert_eq!(people[0].age, 42);
    assert_eq!(people[1].age, 28);
}

#[test]
fn send_flush_receive_surfaces_errors() {
    let conn = Conn::new();
    conn.command("HGETALL", args!["person:1"])
        .expect_map([("name", "Mr. Johnson"), ("age", "42")]);
    conn.command("HGETALL", args!["person:2"])
        .expect_error(Error::reply("Simulated error!"));

    assert!(retrieve_people(&conn, &["1", "2", "3"]).is_err());
}

#[test]
fn receiving_past_the_pipeline_fails() {
    let conn = Conn::new();
    conn.command("HGETALL", args!["person:1"]).expect_map([("name", "A")]);

    let people = retrieve_people(&conn, &["1"]).unwrap();
    assert_eq!(people[0].name, "A");
    assert!(matches!(
        redimock::Connection::receive(&conn),
        Err(Error::NoQueuedCalls)
    ));
}

#[test]
fn every_expectation_was_used() {
    let conn = Conn::new();
    let first = conn
        .command("HGETALL", args!["person:1"])
        .expect_map([("name", "A"), ("age", "1")]);
    conn.command("HGETALL", args!["person:2"])
        .expect_map([("name", "B"), ("age", "2")]);

    retrieve_person(&conn, "1").unwrap();
    assert!(matches!(
        conn.expectations_were_met(),
        Err(Error::ExpectationsNotMet { ref commands }) if commands.len() == 1
    ));

    retrieve_person(&conn, "2").unwrap();
    assert!(conn.expectations_were_met().is_ok());
    assert_eq!(conn.stats(&first), 1);
}
