//! The mocked connection - registry of expected commands.
//!
//! A [`Conn`] holds two pools of registered commands:
//!
//! - **plain**: every argument is a literal. Registering a command equal to
//!   an existing one (same name, same argument multiset in any order)
//!   replaces it in place.
//! - **wildcard**: at least one argument is a [`Matcher`](redimock_core::Matcher).
//!   Only exact positional duplicates are dropped.
//!
//! ## Resolution
//!
//! A call `(name, args)` resolves to the first plain command matching it
//! position by position, then the first matching wildcard command, then a
//! name-only (generic) registration. Anything else is
//! [`Error::Unregistered`].
//!
//! ## Thread safety
//!
//! `Conn` is a cheap handle: clones share the same registry. The registry,
//! pipeline queue and statistics sit behind one connection-scoped lock that
//! is never held while a command delivers its outcome, so callbacks may call
//! back into the connection.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use redimock_core::{display_list, Arg, Connection, Error, Result, Value};
use sha1::{Digest, Sha1};
use tracing::{debug, trace, warn};

use crate::cmd::{Cmd, CmdHash};
use crate::config::ConnConfig;
use crate::gate::ReceiveGate;

/// Injected lifecycle function for `close`, `err` or `flush`.
pub type Hook = Arc<dyn Fn() -> Result<()> + Send + Sync>;

#[derive(Debug, Clone)]
struct QueuedCall {
    name: String,
    args: Vec<Value>,
}

#[derive(Default)]
struct Registry {
    commands: Vec<Cmd>,
    wildcard_commands: Vec<Cmd>,
    queue: VecDeque<QueuedCall>,
    stats: HashMap<CmdHash, u64>,
    pending_results: Vec<Value>,
}

impl Registry {
    fn register(&mut self, cmd: &Cmd) {
        if cmd.is_wildcard() {
            let before = self.wildcard_commands.len();
            self.wildcard_commands
                .retain(|c| !c.same_registration(cmd.name(), cmd.args()));
            if self.wildcard_commands.len() != before {
                debug!(target: "redimock::conn", cmd = %cmd.hash(), "replaced duplicate wildcard command");
            }
            self.wildcard_commands.push(cmd.clone());
            return;
        }

        let first = self
            .commands
            .iter()
            .position(|c| c.same_registration(cmd.name(), cmd.args()));
        self.commands
            .retain(|c| !c.same_registration(cmd.name(), cmd.args()));
        match first {
            Some(i) => {
                debug!(target: "redimock::conn", cmd = %cmd.hash(), "replaced equal command");
                self.commands.insert(i, cmd.clone());
            }
            None => self.commands.push(cmd.clone()),
        }
    }

    fn find(&self, name: &str, args: &[Value]) -> Option<Cmd> {
        self.commands
            .iter()
            .find(|c| c.matches(name, args))
            .or_else(|| self.wildcard_commands.iter().find(|c| c.matches(name, args)))
            .or_else(|| {
                self.commands
                    .iter()
                    .find(|c| c.args().is_empty() && c.name() == name)
            })
            .cloned()
    }

    fn resolve(&self, name: &str, args: &[Value], suggest: bool) -> Result<Cmd> {
        if let Some(cmd) = self.find(name, args) {
            return Ok(cmd);
        }

        let suggestions = if suggest {
            self.commands
                .iter()
                .chain(self.wildcard_commands.iter())
                .filter(|c| c.name() == name)
                .map(|c| display_list(c.args()))
                .collect()
        } else {
            Vec::new()
        };
        let err = Error::Unregistered {
            name: name.to_string(),
            args: display_list(args),
            suggestions,
        };
        warn!(target: "redimock::conn", error = %err, "unregistered command");
        Err(err)
    }
}

#[derive(Default)]
struct Hooks {
    close: Option<Hook>,
    err: Option<Hook>,
    flush: Option<Hook>,
}

struct ConnInner {
    registry: Mutex<Registry>,
    hooks: Mutex<Hooks>,
    gate: ReceiveGate,
    suggest_similar: bool,
}

/// Mocked connection.
///
/// # Example
///
/// ```
/// use redimock_conn::Conn;
/// use redimock_core::{args, vals, Connection, Value};
///
/// let conn = Conn::new();
/// conn.command("GET", args!["greeting"]).expect("hello");
///
/// let reply = conn.do_command("GET", &vals!["greeting"]).unwrap();
/// assert_eq!(reply, Value::from("hello"));
/// ```
#[derive(Clone)]
pub struct Conn {
    inner: Arc<ConnInner>,
}

/// Non-owning handle to a [`Conn`], for callbacks registered on the
/// connection itself.
#[derive(Clone)]
pub struct WeakConn {
    inner: Weak<ConnInner>,
}

impl WeakConn {
    /// Get the connection back if it is still alive.
    pub fn upgrade(&self) -> Option<Conn> {
        self.inner.upgrade().map(|inner| Conn { inner })
    }
}

impl Default for Conn {
    fn default() -> Self {
        Self::new()
    }
}

impl Conn {
    /// Create a connection with default settings.
    pub fn new() -> Self {
        Self::with_config(ConnConfig::default())
    }

    /// Create a connection from explicit settings.
    pub fn with_config(config: ConnConfig) -> Self {
        Self {
            inner: Arc::new(ConnInner {
                registry: Mutex::new(Registry::default()),
                hooks: Mutex::new(Hooks::default()),
                gate: ReceiveGate::new(config.receive_wait),
                suggest_similar: config.suggest_similar,
            }),
        }
    }

    /// Non-owning handle to this connection.
    pub fn downgrade(&self) -> WeakConn {
        WeakConn {
            inner: Arc::downgrade(&self.inner),
        }
    }

    // ==================== Registration ====================

    /// Register an expected command.
    ///
    /// An equal plain command registered earlier (same name, same arguments
    /// in any order) is replaced; a wildcard command replaces only an exact
    /// positional duplicate.
    pub fn command(&self, name: &str, args: Vec<Arg>) -> Cmd {
        let cmd = Cmd::new(name, args);
        self.inner.registry.lock().register(&cmd);
        debug!(target: "redimock::conn", cmd = %cmd.hash(), wildcard = cmd.is_wildcard(), "registered command");
        cmd
    }

    /// Register a name-only command answering any call to `name` that has no
    /// closer registration.
    pub fn generic_command(&self, name: &str) -> Cmd {
        self.command(name, Vec::new())
    }

    /// Register an `EVALSHA` call for a script.
    ///
    /// The first argument is the lowercase hex SHA-1 of `script`, followed by
    /// `key_count` and `args`, matching what a client sends for a cached
    /// script.
    pub fn script(&self, script: &[u8], key_count: i64, args: Vec<Arg>) -> Cmd {
        let sha = hex::encode(Sha1::digest(script));
        let mut full = Vec::with_capacity(args.len() + 2);
        full.push(Arg::from(sha));
        full.push(Arg::from(key_count));
        full.extend(args);
        self.command("EVALSHA", full)
    }

    /// Drop every registration, queued call, pending result and statistic.
    ///
    /// Handles to commands registered before the clear are orphaned.
    pub fn clear(&self) {
        let mut reg = self.inner.registry.lock();
        *reg = Registry::default();
        debug!(target: "redimock::conn", "cleared registry");
    }

    /// Snapshot of the plain pool in priority order.
    pub fn commands(&self) -> Vec<Cmd> {
        self.inner.registry.lock().commands.clone()
    }

    /// Snapshot of the wildcard pool in priority order.
    pub fn wildcard_commands(&self) -> Vec<Cmd> {
        self.inner.registry.lock().wildcard_commands.clone()
    }

    /// Find the command a call would resolve to, without calling it.
    pub fn find(&self, name: &str, args: &[Value]) -> Option<Cmd> {
        self.inner.registry.lock().find(name, args)
    }

    // ==================== Statistics ====================

    /// Number of calls resolved to `cmd` on this connection.
    pub fn stats(&self, cmd: &Cmd) -> u64 {
        self.inner
            .registry
            .lock()
            .stats
            .get(&cmd.hash())
            .copied()
            .unwrap_or(0)
    }

    /// Check that every registered command was called at least once.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ExpectationsNotMet`] listing the uncalled commands.
    pub fn expectations_were_met(&self) -> Result<()> {
        let reg = self.inner.registry.lock();
        let uncalled: Vec<String> = reg
            .commands
            .iter()
            .chain(reg.wildcard_commands.iter())
            .filter(|c| !c.called())
            .map(|c| c.hash().to_string())
            .collect();
        if uncalled.is_empty() {
            Ok(())
        } else {
            Err(Error::ExpectationsNotMet { commands: uncalled })
        }
    }

    // ==================== Pipeline ====================

    /// Number of calls queued with `send` and not yet resolved.
    pub fn queued_calls(&self) -> usize {
        self.inner.registry.lock().queue.len()
    }

    /// Resolve every queued call and take the accumulated non-nil
    /// transaction results, oldest first.
    ///
    /// # Errors
    ///
    /// Stops at the first queued call that fails and returns its error; the
    /// remaining calls stay queued.
    pub fn drain_pending(&self) -> Result<Vec<Value>> {
        loop {
            let next = self.inner.registry.lock().queue.pop_front();
            let Some(call) = next else {
                break;
            };
            trace!(target: "redimock::conn", name = %call.name, "draining queued call");
            let reply = self.dispatch(&call.name, &call.args)?;
            self.push_pending(reply);
        }
        Ok(std::mem::take(
            &mut self.inner.registry.lock().pending_results,
        ))
    }

    /// Enable or disable wait-for-signal mode on `receive`.
    pub fn set_receive_wait(&self, wait: bool) {
        self.inner.gate.set_enabled(wait);
    }

    /// Whether `receive` waits for a signal.
    pub fn receive_wait(&self) -> bool {
        self.inner.gate.is_enabled()
    }

    /// Deliver one signal releasing a waiting `receive`.
    pub fn receive_now(&self) {
        self.inner.gate.signal();
    }

    // ==================== Hooks ====================

    /// Inject the result of `close`.
    pub fn set_close_hook<F>(&self, hook: F)
    where
        F: Fn() -> Result<()> + Send + Sync + 'static,
    {
        self.inner.hooks.lock().close = Some(Arc::new(hook));
    }

    /// Inject the result of `err`.
    pub fn set_err_hook<F>(&self, hook: F)
    where
        F: Fn() -> Result<()> + Send + Sync + 'static,
    {
        self.inner.hooks.lock().err = Some(Arc::new(hook));
    }

    /// Inject the result of `flush`.
    pub fn set_flush_hook<F>(&self, hook: F)
    where
        F: Fn() -> Result<()> + Send + Sync + 'static,
    {
        self.inner.hooks.lock().flush = Some(Arc::new(hook));
    }

    fn run_hook(&self, select: impl Fn(&Hooks) -> Option<Hook>) -> Result<()> {
        let hook = select(&*self.inner.hooks.lock());
        match hook {
            Some(hook) => hook(),
            None => Ok(()),
        }
    }

    // ==================== Calls ====================

    /// Null replies carry nothing for a transaction result and are skipped.
    fn push_pending(&self, reply: Value) {
        if reply != Value::Null {
            self.inner.registry.lock().pending_results.push(reply);
        }
    }

    fn dispatch(&self, name: &str, args: &[Value]) -> Result<Value> {
        let cmd = {
            let mut reg = self.inner.registry.lock();
            let cmd = reg.resolve(name, args, self.inner.suggest_similar)?;
            *reg.stats.entry(cmd.hash()).or_insert(0) += 1;
            cmd
        };
        debug!(target: "redimock::conn", name, cmd = %cmd.hash(), "resolved call");
        cmd.invoke(args)
    }
}

impl Connection for Conn {
    /// Resolve a call against the registered commands.
    ///
    /// When calls are queued, the oldest one is resolved first and its reply,
    /// unless nil, appended to the pending transaction results; its error, if
    /// any, is returned instead of resolving this call.
    fn do_command(&self, name: &str, args: &[Value]) -> Result<Value> {
        let drained = self.inner.registry.lock().queue.pop_front();
        if let Some(call) = drained {
            trace!(target: "redimock::conn", name = %call.name, "draining queued call before do");
            let reply = self.dispatch(&call.name, &call.args)?;
            self.push_pending(reply);
        }
        self.dispatch(name, args)
    }

    fn send(&self, name: &str, args: &[Value]) -> Result<()> {
        trace!(target: "redimock::conn", name, "queued call");
        self.inner.registry.lock().queue.push_back(QueuedCall {
            name: name.to_string(),
            args: args.to_vec(),
        });
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        self.run_hook(|hooks| hooks.flush.clone())
    }

    fn receive(&self) -> Result<Value> {
        self.inner.gate.wait();
        let call = self
            .inner
            .registry
            .lock()
            .queue
            .pop_front()
            .ok_or(Error::NoQueuedCalls)?;
        self.dispatch(&call.name, &call.args)
    }

    fn close(&self) -> Result<()> {
        self.run_hook(|hooks| hooks.close.clone())
    }

    fn err(&self) -> Result<()> {
        self.run_hook(|hooks| hooks.err.clone())
    }
}
