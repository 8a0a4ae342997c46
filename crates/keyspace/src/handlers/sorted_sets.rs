//! Sorted-set command handlers.
//!
//! Queries order members by `(score, member)` ascending. Score-range
//! commands share the bound rules in [`crate::range`].

use redimock_core::{Error, Result, Value};

use super::{integer, members_reply, require_args, text, with_scores};
use crate::range::{ordered, rank_slice, ScoreRange};
use crate::store::Keyspace;

/// Handle `ZADD key score member [score member ...]`.
///
/// Returns the number of new members; score updates are not counted.
pub fn zadd(ks: &mut Keyspace, args: &[Value]) -> Result<Value> {
    require_args("ZADD", args, 3)?;
    if (args.len() - 1) % 2 != 0 {
        return Err(Error::invalid_input("ZADD expects score/member pairs"));
    }
    let key = text(&args[0])?;
    let pairs = args[1..]
        .chunks(2)
        .map(|pair| Ok((integer(&pair[0])?, text(&pair[1])?)))
        .collect::<Result<Vec<(i64, String)>>>()?;

    let zset = ks.sorted_set_or_create(&key)?;
    let added = pairs
        .into_iter()
        .map(|(score, member)| zset.insert(member, score))
        .filter(Option::is_none)
        .count();
    Ok(Value::from(added))
}

/// Handle `ZRANGE key start stop [WITHSCORES]`.
pub fn zrange(ks: &mut Keyspace, args: &[Value]) -> Result<Value> {
    require_args("ZRANGE", args, 3)?;
    let key = text(&args[0])?;
    let start = integer(&args[1])?;
    let stop = integer(&args[2])?;
    let scores = with_scores(args, 3);

    let Some(zset) = ks.sorted_set(&key)? else {
        return Ok(Value::Array(Vec::new()));
    };
    let members = ordered(zset);
    Ok(match rank_slice(members.len(), start, stop) {
        Some((from, to)) => members_reply(members[from..=to].iter().copied(), scores),
        None => Value::Array(Vec::new()),
    })
}

/// Handle `ZCOUNT key min max`.
pub fn zcount(ks: &mut Keyspace, args: &[Value]) -> Result<Value> {
    let (key, range) = score_query("ZCOUNT", args)?;
    let count = match ks.sorted_set(&key)? {
        Some(zset) => zset.values().filter(|score| range.contains(**score)).count(),
        None => 0,
    };
    Ok(Value::from(count))
}

/// Handle `ZREMRANGEBYSCORE key min max`.
pub fn zremrangebyscore(ks: &mut Keyspace, args: &[Value]) -> Result<Value> {
    let (key, range) = score_query("ZREMRANGEBYSCORE", args)?;
    let removed = match ks.sorted_set_mut(&key)? {
        Some(zset) => {
            let before = zset.len();
            zset.retain(|_, score| !range.contains(*score));
            before - zset.len()
        }
        None => 0,
    };
    Ok(Value::from(removed))
}

/// Handle `ZRANGEBYSCORE key min max [WITHSCORES]`.
pub fn zrangebyscore(ks: &mut Keyspace, args: &[Value]) -> Result<Value> {
    let (key, range) = score_query("ZRANGEBYSCORE", args)?;
    let scores = with_scores(args, 3);
    Ok(match ks.sorted_set(&key)? {
        Some(zset) => members_reply(
            ordered(zset)
                .into_iter()
                .filter(|(_, score)| range.contains(*score)),
            scores,
        ),
        None => Value::Array(Vec::new()),
    })
}

fn score_query(command: &str, args: &[Value]) -> Result<(String, ScoreRange)> {
    require_args(command, args, 3)?;
    Ok((text(&args[0])?, ScoreRange::parse(&args[1], &args[2])?))
}
