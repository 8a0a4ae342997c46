//! Wait-for-signal gate for `receive`
//!
//! When enabled, every `receive` consumes one signal, blocking until one is
//! delivered. Signals delivered ahead of time are kept and consumed in turn.
//! Disabling the gate releases all blocked receivers.

use parking_lot::{Condvar, Mutex};

#[derive(Default)]
struct GateState {
    enabled: bool,
    signals: usize,
}

#[derive(Default)]
pub(crate) struct ReceiveGate {
    state: Mutex<GateState>,
    cond: Condvar,
}

impl ReceiveGate {
    pub(crate) fn new(enabled: bool) -> Self {
        Self {
            state: Mutex::new(GateState {
                enabled,
                signals: 0,
            }),
            cond: Condvar::new(),
        }
    }

    pub(crate) fn set_enabled(&self, enabled: bool) {
        let mut state = self.state.lock();
        state.enabled = enabled;
        if !enabled {
            self.cond.notify_all();
        }
    }

    pub(crate) fn is_enabled(&self) -> bool {
        self.state.lock().enabled
    }

    pub(crate) fn signal(&self) {
        let mut state = self.state.lock();
        state.signals += 1;
        self.cond.notify_one();
    }

    /// Block until a signal is available while the gate is enabled.
    pub(crate) fn wait(&self) {
        let mut state = self.state.lock();
        while state.enabled && state.signals == 0 {
            self.cond.wait(&mut state);
        }
        if state.enabled {
            state.signals -= 1;
        }
    }
}
