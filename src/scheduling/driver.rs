//! Per-iteration timer operations for a reactor loop.
//!
//! Each loop iteration the reactor asks `next_timeout` how long it may block on I/O,
//! advances its clock after waking, then calls `expire_due` to fire everything that is due.
//! The driver never reads a clock itself; `now` is always supplied by the caller.
use std::{fmt::Debug, hash::Hash, time::Duration};

use tracing::debug;

use crate::{
    config::TimerConfig,
    scheduling::{
        registry::{TimerEntry, TimerRegistry},
        Msec, TimerEvents,
    },
};

/// Timer registry of one reactor instance, plus the operations the loop drives it with.
#[derive(Debug)]
pub struct TimerDriver<K> {
    registry: TimerRegistry<K>,
    config: TimerConfig,
}

impl<K: Copy + Ord + Hash + Debug> TimerDriver<K> {
    /// Empty driver with the default configuration.
    pub fn init() -> Self {
        Self::with_config(TimerConfig::default())
    }

    pub fn with_config(config: TimerConfig) -> Self {
        Self {
            registry: TimerRegistry::new(),
            config,
        }
    }

    pub fn config(&self) -> &TimerConfig {
        &self.config
    }

    pub fn registry(&self) -> &TimerRegistry<K> {
        &self.registry
    }

    pub fn is_registered(&self, key: K) -> bool {
        self.registry.is_registered(key)
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Register a timer for `key` at an absolute `deadline`.
    ///
    /// # Panics
    /// If `key` already has a timer.
    pub fn schedule(&mut self, key: K, deadline: Msec, cancelable: bool) {
        debug!(?key, deadline, cancelable, "event timer add");
        self.registry.insert(key, deadline, cancelable);
    }

    /// Register a timer for `key` that fires `timeout` ms after `now`.
    ///
    /// A timer already registered for `key` is moved, unless the new deadline is within
    /// `lazy_delay` of the old one; then only its cancelable flag is refreshed.
    pub fn add_timer(&mut self, key: K, now: Msec, timeout: Msec, cancelable: bool) {
        let deadline = now.saturating_add(timeout);

        if let Some(old) = self.registry.get(key) {
            if old.deadline.abs_diff(deadline) < self.config.lazy_delay {
                debug!(?key, old = old.deadline, new = deadline, "event timer kept");
                if let Err(err) = self.registry.set_cancelable(key, cancelable) {
                    panic!("{err}");
                }
                return;
            }
            self.del_timer(key);
        }

        self.schedule(key, deadline, cancelable);
    }

    /// Unlink the timer for `key`.
    ///
    /// # Panics
    /// If `key` has no timer.
    pub fn del_timer(&mut self, key: K) -> TimerEntry {
        let entry = self.registry.remove(key);
        debug!(?key, deadline = entry.deadline, "event timer del");
        entry
    }

    /// Unlink the timer for `key` if it has one. Returns whether a timer was removed.
    pub fn cancel(&mut self, key: K) -> bool {
        match self.registry.try_remove(key) {
            Ok(entry) => {
                debug!(?key, deadline = entry.deadline, "event timer del");
                true
            }
            Err(_) => false,
        }
    }

    /// Upper bound on how long the reactor may block before timers need attention.
    ///
    /// `None` means no timers are pending and the reactor may block indefinitely.
    /// `Some(Duration::ZERO)` means a timer is already due.
    pub fn next_timeout(&self, now: Msec) -> Option<Duration> {
        self.registry
            .minimum()
            .map(|(_, entry)| Duration::from_millis(entry.deadline.saturating_sub(now)))
    }

    /// Fire every timer whose deadline is at or before `now`, in deadline order.
    ///
    /// The minimum is re-read after each completion action, so a timer registered by an
    /// action with a deadline at or before `now` fires within this same call.
    /// Returns the number of timers fired.
    pub fn expire_due<E: TimerEvents<K>>(&mut self, now: Msec, events: &mut E) -> usize {
        let mut fired = 0;

        while let Some((key, entry)) = self.registry.minimum() {
            if entry.deadline > now {
                break;
            }

            debug!(?key, deadline = entry.deadline, "event timer del");
            self.registry.remove(key);

            events.set_timedout(key);
            events.handle(key, self);
            fired += 1;
        }

        fired
    }

    /// Whether every pending timer is cancelable (vacuously true when none are pending).
    ///
    /// Linear scan, meant for shutdown draining only.
    pub fn only_cancelable_remaining(&self) -> bool {
        let mut cursor = self.registry.minimum();
        while let Some((key, entry)) = cursor {
            if !entry.cancelable {
                return false;
            }
            cursor = self.registry.successor(key);
        }
        true
    }
}

impl<K: Copy + Ord + Hash + Debug> Default for TimerDriver<K> {
    fn default() -> Self {
        Self::init()
    }
}
