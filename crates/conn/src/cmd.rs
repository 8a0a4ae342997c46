//! Registered command expectations
//!
//! A [`Cmd`] is created by registering a command on a
//! [`Conn`](crate::Conn). It owns a FIFO queue of canned outcomes and an
//! optional callback that computes replies from the call arguments.
//!
//! ## Resolution order
//!
//! Once a callback is installed with [`Cmd::handle`], every call uses the
//! callback and the queue is left untouched. Otherwise each call pops the
//! oldest queued outcome; an empty queue yields `Value::Null` with no error.
//!
//! ## Locking
//!
//! Each `Cmd` has its own lock guarding its queue, callback and call counter.
//! Exercising one command never blocks on another. The lock is released
//! before a callback runs or an injected panic is raised.

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use redimock_core::{
    display_list, pattern_equal, registration_equal, Arg, Error, Result, Value,
};
use tracing::trace;

/// Computed-outcome function installed with [`Cmd::handle`].
pub type Callback = Arc<dyn Fn(&[Value]) -> Result<Value> + Send + Sync>;

/// One canned reaction to a call
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Reply with a value
    Value(Value),
    /// Return the error to the caller
    Error(Error),
    /// Panic on the caller's stack with the value as payload
    Panic(Value),
}

/// Identity of a registered command, used as the statistics key.
///
/// Formed from the command name followed by the display form of each
/// argument, so re-registering an identical command keeps its statistics.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CmdHash(String);

impl CmdHash {
    fn of(name: &str, args: &[Arg]) -> Self {
        let mut s = name.to_string();
        for arg in args {
            s.push(' ');
            s.push_str(&arg.to_string());
        }
        CmdHash(s)
    }

    /// The identity as text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CmdHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Default)]
struct CmdState {
    responses: VecDeque<Outcome>,
    callback: Option<Callback>,
    calls: u64,
}

struct CmdInner {
    name: String,
    args: Vec<Arg>,
    hash: CmdHash,
    state: Mutex<CmdState>,
}

/// Handle to a registered command expectation.
///
/// Cloning the handle shares the same expectation. All outcome setters
/// return the handle so registrations chain:
///
/// ```
/// use redimock_conn::Conn;
/// use redimock_core::{args, Error};
///
/// let conn = Conn::new();
/// conn.command("GET", args!["k"])
///     .expect("first")
///     .expect_error(Error::reply("second fails"));
/// ```
#[derive(Clone)]
pub struct Cmd {
    inner: Arc<CmdInner>,
}

/// What a call resolved to, taken out of the lock before it runs.
enum Step {
    Callback(Callback),
    Outcome(Option<Outcome>),
}

impl Cmd {
    pub(crate) fn new(name: &str, args: Vec<Arg>) -> Self {
        let hash = CmdHash::of(name, &args);
        Self {
            inner: Arc::new(CmdInner {
                name: name.to_string(),
                args,
                hash,
                state: Mutex::new(CmdState::default()),
            }),
        }
    }

    /// Registered command name.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Registered argument pattern.
    pub fn args(&self) -> &[Arg] {
        &self.inner.args
    }

    /// Whether any registered argument is a wildcard.
    pub fn is_wildcard(&self) -> bool {
        self.inner.args.iter().any(Arg::is_wildcard)
    }

    /// Identity used as the statistics key.
    pub fn hash(&self) -> CmdHash {
        self.inner.hash.clone()
    }

    /// Whether both handles refer to the same registration.
    pub fn ptr_eq(&self, other: &Cmd) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    // ==================== Outcomes ====================

    /// Queue a reply value.
    pub fn expect(&self, response: impl Into<Value>) -> Cmd {
        self.push(Outcome::Value(response.into()))
    }

    /// Queue a key/value reply flattened to `[k1, v1, k2, v2, ...]` bulk strings.
    ///
    /// Entries are emitted in iteration order; pass an ordered map when the
    /// order matters to the caller.
    pub fn expect_map<I, K, V>(&self, response: I) -> Cmd
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<[u8]>,
        V: AsRef<[u8]>,
    {
        let mut values = Vec::new();
        for (key, value) in response {
            values.push(Value::Bytes(key.as_ref().to_vec()));
            values.push(Value::Bytes(value.as_ref().to_vec()));
        }
        self.push(Outcome::Value(Value::Array(values)))
    }

    /// Queue a multi-bulk reply of the given values.
    pub fn expect_slice<I, V>(&self, response: I) -> Cmd
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let values = response.into_iter().map(Into::into).collect();
        self.push(Outcome::Value(Value::Array(values)))
    }

    /// Queue a multi-bulk reply of strings, each stored as bulk bytes.
    pub fn expect_string_slice<I, S>(&self, response: I) -> Cmd
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let values = response
            .into_iter()
            .map(|s| Value::Bytes(s.as_ref().as_bytes().to_vec()))
            .collect();
        self.push(Outcome::Value(Value::Array(values)))
    }

    /// Queue an error returned to the caller verbatim.
    pub fn expect_error(&self, err: impl Into<Error>) -> Cmd {
        self.push(Outcome::Error(err.into()))
    }

    /// Queue a panic raised on the caller's stack.
    ///
    /// The panic payload is the given [`Value`]; recover it with
    /// `payload.downcast_ref::<Value>()`.
    pub fn expect_panic(&self, payload: impl Into<Value>) -> Cmd {
        self.push(Outcome::Panic(payload.into()))
    }

    /// Install a callback computing each reply from the call arguments.
    ///
    /// The callback replaces any previous one and takes precedence over
    /// queued outcomes. It may panic to abort the caller.
    pub fn handle<F>(&self, callback: F) -> Cmd
    where
        F: Fn(&[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        self.inner.state.lock().callback = Some(Arc::new(callback));
        self.clone()
    }

    fn push(&self, outcome: Outcome) -> Cmd {
        self.inner.state.lock().responses.push_back(outcome);
        self.clone()
    }

    // ==================== Consumption ====================

    /// Pop the oldest queued outcome, or `None` when the queue is empty.
    pub fn next_outcome(&self) -> Option<Outcome> {
        self.inner.state.lock().responses.pop_front()
    }

    /// Number of outcomes still queued.
    pub fn pending_outcomes(&self) -> usize {
        self.inner.state.lock().responses.len()
    }

    /// Whether a callback is installed.
    pub fn has_callback(&self) -> bool {
        self.inner.state.lock().callback.is_some()
    }

    /// Number of calls resolved to this command.
    pub fn calls(&self) -> u64 {
        self.inner.state.lock().calls
    }

    /// Whether this command was called at least once.
    pub fn called(&self) -> bool {
        self.calls() > 0
    }

    /// Record a call and deliver its outcome.
    ///
    /// Panics on the caller's stack when the outcome is a panic or the
    /// callback panics.
    pub(crate) fn invoke(&self, args: &[Value]) -> Result<Value> {
        let step = {
            let mut state = self.inner.state.lock();
            state.calls += 1;
            match &state.callback {
                Some(callback) => Step::Callback(Arc::clone(callback)),
                None => Step::Outcome(state.responses.pop_front()),
            }
        };

        match step {
            Step::Callback(callback) => callback(args),
            Step::Outcome(None) => {
                trace!(target: "redimock::cmd", cmd = %self.inner.hash, "empty response queue");
                Ok(Value::Null)
            }
            Step::Outcome(Some(Outcome::Value(value))) => Ok(value),
            Step::Outcome(Some(Outcome::Error(err))) => Err(err),
            Step::Outcome(Some(Outcome::Panic(payload))) => std::panic::panic_any(payload),
        }
    }

    // ==================== Matching ====================

    /// Call-time match of `(name, args)` against this registration.
    pub fn matches(&self, name: &str, args: &[Value]) -> bool {
        redimock_core::call_matches(name, args, &self.inner.name, &self.inner.args)
    }

    /// Registration-time equality with another pattern.
    ///
    /// Literal patterns compare as multisets; wildcard patterns compare
    /// position by position.
    pub fn same_registration(&self, name: &str, args: &[Arg]) -> bool {
        if self.is_wildcard() || args.iter().any(Arg::is_wildcard) {
            pattern_equal(name, args, &self.inner.name, &self.inner.args)
        } else {
            registration_equal(name, args, &self.inner.name, &self.inner.args)
        }
    }
}

impl fmt::Debug for Cmd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cmd")
            .field("name", &self.inner.name)
            .field("args", &display_list(&self.inner.args))
            .finish()
    }
}
