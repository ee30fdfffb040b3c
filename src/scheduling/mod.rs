//! Deadline scheduling for a reactor loop, with logarithmic cost per operation.
//!
//! `registry` contains the ordered multiset of pending deadlines, `driver` the
//! per-iteration queries (next wake-up, expiry, shutdown drain) built on top of it.
pub mod driver;
pub mod registry;

use driver::TimerDriver;

/// Monotonic milliseconds since an arbitrary epoch.
pub type Msec = u64;

/// The event objects that own the timers, addressed by their identity `K`.
///
/// The registry never owns events, it only links their keys. When a timer fires the
/// driver unlinks it, calls `set_timedout`, then `handle` exactly once.
pub trait TimerEvents<K> {
    /// Raise the event's timed-out flag.
    fn set_timedout(&mut self, key: K);
    /// Completion action. May schedule new timers, including for `key` itself.
    fn handle(&mut self, key: K, timers: &mut TimerDriver<K>);
}
