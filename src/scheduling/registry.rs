//! Ordered multiset of timer deadlines.
//!
//! Entries are kept in a `BTreeSet` of `(deadline, key)` pairs, with a reverse map from key
//! to its live entry so a timer can be unlinked by identity in O(log n). Many timers may share
//! a deadline; the key only makes the pair unique and gives no ordering guarantee among ties.
use std::{
    collections::{BTreeSet, HashMap},
    fmt::Debug,
    hash::Hash,
    ops::Bound::{Excluded, Unbounded},
};

use crate::{Msec, TimerError};

/// A registered timer's deadline and shutdown policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerEntry {
    pub deadline: Msec,
    /// Ignorable while draining for shutdown.
    pub cancelable: bool,
}

#[derive(Debug)]
pub struct TimerRegistry<K> {
    tree: BTreeSet<(Msec, K)>,
    entries: HashMap<K, TimerEntry>,
}

impl<K: Copy + Ord + Hash + Debug> TimerRegistry<K> {
    pub fn new() -> Self {
        Self {
            tree: BTreeSet::new(),
            entries: HashMap::new(),
        }
    }

    /// Link `key` at `deadline`, failing if it is already linked.
    pub fn try_insert(
        &mut self,
        key: K,
        deadline: Msec,
        cancelable: bool,
    ) -> Result<(), TimerError> {
        if self.entries.contains_key(&key) {
            return Err(TimerError::already_registered(key));
        }
        self.entries.insert(
            key,
            TimerEntry {
                deadline,
                cancelable,
            },
        );
        self.tree.insert((deadline, key));
        Ok(())
    }

    /// Link `key` at `deadline`.
    ///
    /// # Panics
    /// If `key` is already registered.
    pub fn insert(&mut self, key: K, deadline: Msec, cancelable: bool) {
        if let Err(err) = self.try_insert(key, deadline, cancelable) {
            panic!("{err}");
        }
    }

    /// Unlink `key`, returning the entry it had.
    pub fn try_remove(&mut self, key: K) -> Result<TimerEntry, TimerError> {
        let entry = self
            .entries
            .remove(&key)
            .ok_or_else(|| TimerError::not_registered(key))?;
        let linked = self.tree.remove(&(entry.deadline, key));
        debug_assert!(linked, "reverse map and tree disagree for {key:?}");
        Ok(entry)
    }

    /// Unlink `key`.
    ///
    /// # Panics
    /// If `key` is not registered.
    pub fn remove(&mut self, key: K) -> TimerEntry {
        match self.try_remove(key) {
            Ok(entry) => entry,
            Err(err) => panic!("{err}"),
        }
    }

    /// Entry with the smallest deadline. Which of several equal minimums is returned is unspecified.
    pub fn minimum(&self) -> Option<(K, TimerEntry)> {
        self.tree
            .first()
            .map(|&(_, key)| (key, self.entries[&key]))
    }

    /// Next entry after `key` in deadline order, `None` if `key` is the maximum.
    ///
    /// # Panics
    /// If `key` is not registered.
    pub fn successor(&self, key: K) -> Option<(K, TimerEntry)> {
        let Some(entry) = self.entries.get(&key) else {
            panic!("{}", TimerError::not_registered(key));
        };
        self.tree
            .range((Excluded((entry.deadline, key)), Unbounded))
            .next()
            .map(|&(_, next)| (next, self.entries[&next]))
    }

    /// Update the shutdown policy of a registered timer without moving it.
    pub(crate) fn set_cancelable(&mut self, key: K, cancelable: bool) -> Result<(), TimerError> {
        let entry = self
            .entries
            .get_mut(&key)
            .ok_or_else(|| TimerError::not_registered(key))?;
        entry.cancelable = cancelable;
        Ok(())
    }

    pub fn get(&self, key: K) -> Option<TimerEntry> {
        self.entries.get(&key).copied()
    }

    pub fn is_registered(&self, key: K) -> bool {
        self.entries.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// All entries in non-decreasing deadline order.
    pub fn iter(&self) -> impl Iterator<Item = (K, TimerEntry)> + '_ {
        self.tree
            .iter()
            .map(|&(_, key)| (key, self.entries[&key]))
    }
}

impl<K: Copy + Ord + Hash + Debug> Default for TimerRegistry<K> {
    fn default() -> Self {
        Self::new()
    }
}
