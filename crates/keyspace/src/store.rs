//! In-memory keyspace
//!
//! Maps key names to containers of one of three kinds. An operation that
//! addresses a key holding another kind fails with [`Error::WrongType`] and
//! leaves the key untouched.

use std::collections::{HashMap, HashSet};
use std::fmt;

use redimock_core::{Error, Result, Value};

/// Kind of container stored under a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// Single value set with `SET`
    Scalar,
    /// Unordered member set
    Set,
    /// Members with integer scores
    SortedSet,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Scalar => "string",
            Kind::Set => "set",
            Kind::SortedSet => "zset",
        };
        f.write_str(name)
    }
}

/// Value stored under a key.
#[derive(Debug, Clone, PartialEq)]
pub enum Container {
    /// Scalar value
    Scalar(Value),
    /// Set members
    Set(HashSet<String>),
    /// Sorted-set members and their scores
    SortedSet(HashMap<String, i64>),
}

impl Container {
    /// Kind of this container.
    pub fn kind(&self) -> Kind {
        match self {
            Container::Scalar(_) => Kind::Scalar,
            Container::Set(_) => Kind::Set,
            Container::SortedSet(_) => Kind::SortedSet,
        }
    }
}

fn wrong_type(key: &str, expected: Kind, actual: Kind) -> Error {
    Error::WrongType {
        key: key.to_string(),
        expected: expected.to_string(),
        actual: actual.to_string(),
    }
}

/// The simulated key table.
#[derive(Debug, Default)]
pub struct Keyspace {
    keys: HashMap<String, Container>,
}

impl Keyspace {
    /// Create an empty keyspace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether no key is stored.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Iterate over key names in unspecified order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.keys().map(String::as_str)
    }

    /// Kind of the container under `key`, if any.
    pub fn kind_of(&self, key: &str) -> Option<Kind> {
        self.keys.get(key).map(Container::kind)
    }

    /// Discard every key.
    pub fn flush(&mut self) {
        self.keys.clear();
    }

    // ==================== Scalars ====================

    /// Store a scalar, replacing whatever the key held.
    pub fn set_scalar(&mut self, key: &str, value: Value) {
        self.keys.insert(key.to_string(), Container::Scalar(value));
    }

    /// Read a scalar; `None` when the key is absent.
    pub fn scalar(&self, key: &str) -> Result<Option<&Value>> {
        match self.keys.get(key) {
            None => Ok(None),
            Some(Container::Scalar(value)) => Ok(Some(value)),
            Some(other) => Err(wrong_type(key, Kind::Scalar, other.kind())),
        }
    }

    // ==================== Sets ====================

    /// Read a set; `None` when the key is absent.
    pub fn set(&self, key: &str) -> Result<Option<&HashSet<String>>> {
        match self.keys.get(key) {
            None => Ok(None),
            Some(Container::Set(set)) => Ok(Some(set)),
            Some(other) => Err(wrong_type(key, Kind::Set, other.kind())),
        }
    }

    /// Mutable access to an existing set.
    pub fn set_mut(&mut self, key: &str) -> Result<Option<&mut HashSet<String>>> {
        match self.keys.get_mut(key) {
            None => Ok(None),
            Some(Container::Set(set)) => Ok(Some(set)),
            Some(other) => Err(wrong_type(key, Kind::Set, other.kind())),
        }
    }

    /// Mutable access to a set, creating it on first use.
    pub fn set_or_create(&mut self, key: &str) -> Result<&mut HashSet<String>> {
        let container = self
            .keys
            .entry(key.to_string())
            .or_insert_with(|| Container::Set(HashSet::new()));
        match container {
            Container::Set(set) => Ok(set),
            other => Err(wrong_type(key, Kind::Set, other.kind())),
        }
    }

    // ==================== Sorted sets ====================

    /// Read a sorted set; `None` when the key is absent.
    pub fn sorted_set(&self, key: &str) -> Result<Option<&HashMap<String, i64>>> {
        match self.keys.get(key) {
            None => Ok(None),
            Some(Container::SortedSet(zset)) => Ok(Some(zset)),
            Some(other) => Err(wrong_type(key, Kind::SortedSet, other.kind())),
        }
    }

    /// Mutable access to an existing sorted set.
    pub fn sorted_set_mut(&mut self, key: &str) -> Result<Option<&mut HashMap<String, i64>>> {
        match self.keys.get_mut(key) {
            None => Ok(None),
            Some(Container::SortedSet(zset)) => Ok(Some(zset)),
            Some(other) => Err(wrong_type(key, Kind::SortedSet, other.kind())),
        }
    }

    /// Mutable access to a sorted set, creating it on first use.
    pub fn sorted_set_or_create(&mut self, key: &str) -> Result<&mut HashMap<String, i64>> {
        let container = self
            .keys
            .entry(key.to_string())
            .or_insert_with(|| Container::SortedSet(HashMap::new()));
        match container {
            Container::SortedSet(zset) => Ok(zset),
            other => Err(wrong_type(key, Kind::SortedSet, other.kind())),
        }
    }
}
