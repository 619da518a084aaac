//! Strategy: a bounded cache that delegates eviction to a swappable policy.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::io::Write;
use std::str::FromStr;

use serde::Deserialize;
use tracing::debug;

use crate::error::{PatternError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvictionPolicy {
    /// Oldest insertion goes first.
    Fifo,
    /// Least recently accessed goes first.
    Lru,
    /// Least frequently accessed goes first; ties fall back to recency.
    Lfu,
}

pub(crate) struct Slot<V> {
    value: V,
    inserted_at: u64,
    last_access: u64,
    hits: u64,
}

impl EvictionPolicy {
    pub fn name(self) -> &'static str {
        match self {
            EvictionPolicy::Fifo => "fifo",
            EvictionPolicy::Lru => "lru",
            EvictionPolicy::Lfu => "lfu",
        }
    }

    /// Chooses a victim and removes it from `entries`.
    pub(crate) fn evict<K, V>(self, entries: &mut HashMap<K, Slot<V>>) -> Option<(K, V)>
    where
        K: Eq + Hash + Clone,
    {
        let victim = match self {
            EvictionPolicy::Fifo => entries.iter().min_by_key(|(_, slot)| slot.inserted_at),
            EvictionPolicy::Lru => entries.iter().min_by_key(|(_, slot)| slot.last_access),
            EvictionPolicy::Lfu => entries
                .iter()
                .min_by_key(|(_, slot)| (slot.hits, slot.last_access)),
        }
        .map(|(key, _)| key.clone())?;

        entries.remove(&victim).map(|slot| (victim, slot.value))
    }
}

impl fmt::Display for EvictionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EvictionPolicy {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "fifo" => Ok(EvictionPolicy::Fifo),
            "lru" => Ok(EvictionPolicy::Lru),
            "lfu" => Ok(EvictionPolicy::Lfu),
            _ => Err(PatternError::invalid_selector("eviction policy", s)),
        }
    }
}

pub struct Cache<K, V> {
    entries: HashMap<K, Slot<V>>,
    policy: EvictionPolicy,
    max_capacity: usize,
    clock: u64,
}

impl<K, V> Cache<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn new(policy: EvictionPolicy, max_capacity: usize) -> Result<Self> {
        if max_capacity == 0 {
            return Err(PatternError::InvalidCapacity(max_capacity));
        }
        Ok(Self {
            entries: HashMap::new(),
            policy,
            max_capacity,
            clock: 0,
        })
    }

    pub fn policy(&self) -> EvictionPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: EvictionPolicy) {
        debug!(from = %self.policy, to = %policy, "eviction policy swapped");
        self.policy = policy;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_capacity(&self) -> usize {
        self.max_capacity
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.keys()
    }

    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    /// Inserts or updates `key`. When a new key arrives at full capacity the
    /// current policy evicts one entry first, and that entry is returned.
    pub fn add(&mut self, key: K, value: V) -> Option<(K, V)> {
        let now = self.tick();

        if let Some(slot) = self.entries.get_mut(&key) {
            slot.value = value;
            slot.last_access = now;
            slot.hits += 1;
            return None;
        }

        let evicted = if self.entries.len() >= self.max_capacity {
            let evicted = self.policy.evict(&mut self.entries);
            if evicted.is_some() {
                debug!(policy = %self.policy, size = self.entries.len(), "evicted entry");
            }
            evicted
        } else {
            None
        };

        self.entries.insert(
            key,
            Slot {
                value,
                inserted_at: now,
                last_access: now,
                hits: 0,
            },
        );
        evicted
    }

    /// Reads `key` and records the access.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let now = self.tick();
        let slot = self.entries.get_mut(key)?;
        slot.last_access = now;
        slot.hits += 1;
        Some(&slot.value)
    }

    /// Removes `key` and hands its value back.
    pub fn take(&mut self, key: &K) -> Option<V> {
        self.entries.remove(key).map(|slot| slot.value)
    }
}

pub fn demo<W: Write>(out: &mut W, initial: EvictionPolicy, max_capacity: usize) -> Result<()> {
    let mut cache: Cache<String, String> = Cache::new(initial, max_capacity)?;

    let mut add = |cache: &mut Cache<String, String>, key: &str, value: &str| -> Result<()> {
        if let Some((victim, _)) = cache.add(key.to_string(), value.to_string()) {
            writeln!(out, "Evicting by {} strategy: removed '{victim}'", cache.policy())?;
        }
        writeln!(out, "Added '{key}' ({} of {})", cache.len(), cache.max_capacity())?;
        Ok(())
    };

    add(&mut cache, "a", "1")?;
    add(&mut cache, "b", "2")?;
    cache.get(&"a".to_string());
    add(&mut cache, "c", "3")?;

    cache.set_policy(EvictionPolicy::Lru);
    add(&mut cache, "d", "4")?;

    cache.set_policy(EvictionPolicy::Fifo);
    add(&mut cache, "e", "5")?;

    let mut keys: Vec<&String> = cache.keys().collect();
    keys.sort();
    let keys: Vec<&str> = keys.into_iter().map(String::as_str).collect();
    writeln!(out, "Cache now holds: {}", keys.join(", "))?;
    Ok(())
}
