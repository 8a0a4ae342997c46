//! Core types and traits for redimock
//!
//! This crate defines the foundational types used throughout the system:
//! - Value: Unified value enum for call arguments and replies
//! - Arg: Registered argument position (literal or wildcard)
//! - Matcher: Wildcard capability plus the built-in wildcards
//! - matching: Call-time and registration-time command equality
//! - Connection: The client surface code under test depends on
//! - Error: Error type hierarchy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod arg;
pub mod connection;
pub mod error;
pub mod matcher;
pub mod matching;
pub mod value;

pub use arg::{display_list, Arg};
pub use connection::Connection;
pub use error::{Error, Result};
pub use matcher::{
    any_data, any_data_array, any_float, any_int, AnyData, AnyDataArray, AnyFloat, AnyInt,
    Matcher,
};
pub use matching::{call_matches, pattern_equal, registration_equal};
pub use value::Value;
