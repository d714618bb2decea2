//! Monitor registry
//!
//! Owns every [`StatisticsMonitor`] exclusively. Monitors live in a slot
//! arena addressed through an id-to-slot map; freed slots are reused so
//! add/remove churn does not grow the arena.

use super::statistics::StatisticsMonitor;
use crate::domain::MonitorConfig;
use std::collections::HashMap;

#[derive(Debug, Clone)]
struct Slot {
    /// Insertion sequence, breaks priority ties
    seq: u64,
    monitor: StatisticsMonitor,
}

/// Registry of statistics monitors keyed by identifier
#[derive(Debug, Clone, Default)]
pub struct MonitorRegistry {
    slots: Vec<Option<Slot>>,
    free: Vec<usize>,
    index: HashMap<String, usize>,
    next_seq: u64,
}

impl MonitorRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the given monitors
    ///
    /// Later configurations with an already used id are ignored.
    pub fn with_monitors<I>(configs: I) -> Self
    where
        I: IntoIterator<Item = MonitorConfig>,
    {
        let mut registry = Self::new();
        for config in configs {
            registry.add(config);
        }
        registry
    }

    /// Add a monitor
    ///
    /// Returns `false` without touching the registry if the id is taken, so
    /// the existing monitor keeps its running statistics.
    pub fn add(&mut self, config: MonitorConfig) -> bool {
        if self.index.contains_key(&config.id) {
            log::debug!("Monitor '{}' already exists, keeping it", config.id);
            return false;
        }

        let id = config.id.clone();
        let slot = Slot {
            seq: self.next_seq,
            monitor: StatisticsMonitor::new(config),
        };
        self.next_seq += 1;

        let position = match self.free.pop() {
            Some(position) => {
                self.slots[position] = Some(slot);
                position
            }
            None => {
                self.slots.push(Some(slot));
                self.slots.len() - 1
            }
        };

        log::debug!("Added monitor '{}'", id);
        self.index.insert(id, position);
        true
    }

    /// Remove a monitor by id
    ///
    /// Returns `false` if no such monitor existed.
    pub fn remove(&mut self, id: &str) -> bool {
        match self.index.remove(id) {
            Some(position) => {
                self.slots[position] = None;
                self.free.push(position);
                log::debug!("Removed monitor '{}'", id);
                true
            }
            None => false,
        }
    }

    /// Replace a monitor's configuration, resetting its statistics
    ///
    /// The monitor keeps its place in tie-breaking order. Returns `false` if
    /// no monitor has `config.id`.
    pub fn replace(&mut self, config: MonitorConfig) -> bool {
        let Some(&position) = self.index.get(&config.id) else {
            return false;
        };

        if let Some(slot) = self.slots[position].as_mut() {
            log::debug!("Replaced monitor '{}'", config.id);
            slot.monitor = StatisticsMonitor::new(config);
            return true;
        }
        false
    }

    /// Look up a monitor by id
    pub fn get(&self, id: &str) -> Option<&StatisticsMonitor> {
        let position = *self.index.get(id)?;
        self.slots[position].as_ref().map(|slot| &slot.monitor)
    }

    /// Feed a value to every monitor
    pub fn update_all(&mut self, value: f64, now_ms: u64) {
        for slot in self.slots.iter_mut().flatten() {
            slot.monitor.update(value, now_ms);
        }
    }

    /// Up to `k` monitors in ascending priority order
    ///
    /// Ties keep insertion order.
    pub fn top_by_priority(&self, k: usize) -> Vec<&StatisticsMonitor> {
        let mut slots: Vec<&Slot> = self.slots.iter().flatten().collect();
        slots.sort_by_key(|slot| (slot.monitor.priority(), slot.seq));
        slots.into_iter().take(k).map(|slot| &slot.monitor).collect()
    }

    /// All monitors in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &StatisticsMonitor> {
        let mut slots: Vec<&Slot> = self.slots.iter().flatten().collect();
        slots.sort_by_key(|slot| slot.seq);
        slots.into_iter().map(|slot| &slot.monitor)
    }

    /// Number of monitors
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}
