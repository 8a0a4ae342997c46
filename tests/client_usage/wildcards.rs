//! Wildcard argument patterns, custom matchers and scripts.

use redimock::{
    any_data, any_data_array, any_float, any_int, args, vals, Arg, Conn, Connection, Error,
    Matcher, Value,
};

#[derive(Debug)]
struct KeyPrefix(&'static str);

impl Matcher for KeyPrefix {
    fn matches(&self, candidate: &Value) -> bool {
        candidate
            .to_arg_string()
            .map_or(false, |s| s.starts_with(self.0))
    }
}

#[test]
fn typed_wildcards() {
    let conn = Conn::new();
    conn.command("EXPIRE", args![any_data(), any_int()]).expect(1);
    conn.command("INCRBYFLOAT", args!["ratio", any_float()])
        .expect("1.5");

    assert_eq!(
        conn.do_command("EXPIRE", &vals!["session:1", 60]).unwrap(),
        Value::Int(1)
    );
    assert!(conn.do_command("EXPIRE", &vals!["session:1", "60"]).is_err());
    assert_eq!(
        conn.do_command("INCRBYFLOAT", &vals!["ratio", 0.5]).unwrap(),
        Value::from("1.5")
    );
    assert!(conn.do_command("INCRBYFLOAT", &vals!["ratio", 1]).is_err());
}

#[test]
fn trailing_wildcard_absorbs_options() {
    let conn = Conn::new();
    let cmd = conn.command("SET", args!["lock", any_data_array()]).expect("OK");
    cmd.expect("OK");

    assert!(conn.do_command("SET", &vals!["lock", "token"]).is_ok());
    assert!(conn
        .do_command("SET", &vals!["lock", "token", "NX", "PX", 3000])
        .is_ok());
    assert!(conn.do_command("SET", &vals!["other", "token"]).is_err());
    assert_eq!(conn.stats(&cmd), 2);
}

#[test]
fn custom_matcher() {
    let conn = Conn::new();
    conn.command("DEL", args![Arg::matcher(KeyPrefix("cache:"))])
        .expect(1);

    assert_eq!(
        conn.do_command("DEL", &vals!["cache:user:1"]).unwrap(),
        Value::Int(1)
    );
    assert!(matches!(
        conn.do_command("DEL", &vals!["user:1"]),
        Err(Error::Unregistered { .. })
    ));
}

#[test]
fn custom_matchers_with_different_parameters_coexist() {
    let conn = Conn::new();
    let cache = conn
        .command("DEL", args![Arg::matcher(KeyPrefix("cache:"))])
        .expect(1);
    let user = conn
        .command("DEL", args![Arg::matcher(KeyPrefix("user:"))])
        .expect(2);

    assert_eq!(conn.wildcard_commands().len(), 2);
    assert_eq!(
        conn.do_command("DEL", &vals!["cache:1"]).unwrap(),
        Value::Int(1)
    );
    assert_eq!(
        conn.do_command("DEL", &vals!["user:1"]).unwrap(),
        Value::Int(2)
    );
    assert_eq!((conn.stats(&cache), conn.stats(&user)), (1, 1));
    assert!(conn.expectations_were_met().is_ok());
}

#[test]
fn literal_registration_wins_over_wildcard() {
    let conn = Conn::new();
    conn.command("GET", args![any_data()]).expect("wildcard");
    conn.command("GET", args!["exact"]).expect("literal");

    assert_eq!(
        conn.do_command("GET", &vals!["exact"]).unwrap(),
        Value::from("literal")
    );
    assert_eq!(
        conn.do_command("GET", &vals!["other"]).unwrap(),
        Value::from("wildcard")
    );
}

#[test]
fn script_call_through_evalsha() {
    let conn = Conn::new();
    let script = b"return redis.call('GET', KEYS[1])";
    conn.script(script, 1, args!["key1"]).expect("value");

    let sha = conn.commands()[0].args()[0]
        .as_literal()
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap();
    assert_eq!(sha.len(), 40);

    assert_eq!(
        conn.do_command("EVALSHA", &vals![sha, 1, "key1"]).unwrap(),
        Value::from("value")
    );
}
