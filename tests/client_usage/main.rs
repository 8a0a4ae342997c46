//! Client Usage Integration Tests
//!
//! Exercise client code written against `Connection` with the mocked
//! connection and the keyspace simulator.

#[path = "../common/mod.rs"]
mod common;

mod failures;
mod people;
mod pipelines;
mod simulator;
mod wildcards;
