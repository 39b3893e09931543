//! HashTable: open addressing with double hashing over a prime-sized slot array.

use crate::config::{CountPolicy, TableConfig};
use crate::error::TableError;
use crate::prime::next_prime;
use tracing::{debug, trace};

/// Multiplier for the primary hash. Both multipliers are primes above the
/// ASCII alphabet size.
pub const HASH_PRIME_A: u64 = 167;
/// Multiplier for the step hash.
pub const HASH_PRIME_B: u64 = 229;

#[derive(Debug)]
struct Entry {
    key: String,
    value: String,
}

/// `Empty` ends a probe walk; `Tombstone` does not.
#[derive(Debug, Default)]
enum Slot {
    #[default]
    Empty,
    Occupied(Entry),
    Tombstone,
}

/// `Σ prime^(len-1-i) * bytes[i] mod modulus`, by Horner's rule.
fn polynomial_hash(bytes: &[u8], prime: u64, modulus: usize) -> usize {
    let m = modulus as u128;
    let p = prime as u128;
    let mut hash: u128 = 0;
    for &b in bytes {
        hash = (hash * p + b as u128) % m;
    }
    hash as usize
}

/// Double-hash probe sequence for one key at one capacity.
#[derive(Copy, Clone, Debug)]
struct ProbeSeq {
    start: usize,
    step: usize,
    capacity: usize,
}

impl ProbeSeq {
    fn new(key: &str, capacity: usize) -> Self {
        let bytes = key.as_bytes();
        let hash_a = polynomial_hash(bytes, HASH_PRIME_A, capacity);
        let hash_b = polynomial_hash(bytes, HASH_PRIME_B, capacity);
        // +1 keeps the step non-zero when hash_b is 0.
        Self {
            start: hash_a,
            step: hash_b + 1,
            capacity,
        }
    }

    #[inline]
    fn index(&self, attempt: usize) -> usize {
        let i = self.start as u128 + attempt as u128 * self.step as u128;
        (i % self.capacity as u128) as usize
    }

    /// One full cycle of the sequence; later attempts only repeat these indices.
    fn indices(self) -> impl Iterator<Item = usize> {
        (0..self.capacity).map(move |attempt| self.index(attempt))
    }
}

/// Slot index `key` probes on the given attempt in a table of `capacity` slots.
pub fn probe_index(key: &str, capacity: usize, attempt: usize) -> usize {
    ProbeSeq::new(key, capacity).index(attempt)
}

/// Where a probe walk for a key ended.
enum Lookup {
    Found(usize),
    Vacant(usize),
    /// Walked a full cycle without meeting the key or an empty slot.
    Exhausted { tombstone: Option<usize> },
}

fn empty_slots(size: usize) -> Vec<Slot> {
    let mut slots = Vec::with_capacity(size);
    slots.resize_with(size, Slot::default);
    slots
}

fn try_empty_slots(size: usize) -> Result<Vec<Slot>, TableError> {
    let mut slots = Vec::new();
    slots
        .try_reserve_exact(size)
        .map_err(|_| TableError::AllocationFailed { slots: size })?;
    slots.resize_with(size, Slot::default);
    Ok(slots)
}

/// String-to-string map with tombstone deletion and prime-sized buckets.
///
/// Capacity is always `next_prime(base_size)`. Inserting grows the table
/// (doubling `base_size`) once load passes the grow threshold; deleting
/// shrinks it (halving `base_size`) once load drops below the shrink
/// threshold, but never below the configured minimum.
#[derive(Debug)]
pub struct HashTable {
    slots: Vec<Slot>,
    base_size: usize,
    count: usize,
    config: TableConfig,
}

impl HashTable {
    /// Empty table with the default configuration (base size 50, 53 slots).
    pub fn new() -> Self {
        let config = TableConfig::default();
        let base_size = config.initial_base_size;
        Self {
            slots: empty_slots(next_prime(base_size)),
            base_size,
            count: 0,
            config,
        }
    }

    pub fn with_config(config: TableConfig) -> Result<Self, TableError> {
        config.validate()?;
        Self::with_base_size(config, config.initial_base_size)
    }

    fn with_base_size(config: TableConfig, base_size: usize) -> Result<Self, TableError> {
        Ok(Self {
            slots: try_empty_slots(next_prime(base_size))?,
            base_size,
            count: 0,
            config,
        })
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Physical slot count; always prime.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn base_size(&self) -> usize {
        self.base_size
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// `len * 100 / capacity`, rounded down.
    pub fn load_percent(&self) -> usize {
        self.count * 100 / self.slots.len()
    }

    /// Slots currently holding a tombstone. Linear in capacity.
    pub fn tombstones(&self) -> usize {
        self.slots
            .iter()
            .filter(|s| matches!(s, Slot::Tombstone))
            .count()
    }

    fn lookup(&self, key: &str) -> Lookup {
        let mut tombstone = None;
        for idx in ProbeSeq::new(key, self.slots.len()).indices() {
            match &self.slots[idx] {
                Slot::Empty => return Lookup::Vacant(idx),
                Slot::Tombstone => {
                    tombstone.get_or_insert(idx);
                }
                Slot::Occupied(e) if e.key == key => return Lookup::Found(idx),
                Slot::Occupied(_) => {}
            }
        }
        Lookup::Exhausted { tombstone }
    }

    /// Value stored for `key`, borrowed from the table.
    pub fn search(&self, key: &str) -> Option<&str> {
        let Lookup::Found(idx) = self.lookup(key) else {
            return None;
        };
        match &self.slots[idx] {
            Slot::Occupied(e) => Some(e.value.as_str()),
            _ => None,
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        matches!(self.lookup(key), Lookup::Found(_))
    }

    /// Inserts a copy of `key`/`value`, replacing the value in place if the
    /// key is already present.
    ///
    /// Fails only if a resize cannot allocate its bucket array; the table
    /// contents are unspecified after such a failure.
    pub fn insert(&mut self, key: &str, value: &str) -> Result<(), TableError> {
        self.insert_entry(Entry {
            key: key.to_owned(),
            value: value.to_owned(),
        })
    }

    fn insert_entry(&mut self, entry: Entry) -> Result<(), TableError> {
        if self.load_percent() > self.config.grow_load_percent {
            self.resize_up()?;
        }
        loop {
            match self.lookup(&entry.key) {
                Lookup::Found(idx) => {
                    self.slots[idx] = Slot::Occupied(entry);
                    return Ok(());
                }
                Lookup::Vacant(idx) => {
                    self.slots[idx] = Slot::Occupied(entry);
                    self.count += 1;
                    return Ok(());
                }
                Lookup::Exhausted {
                    tombstone: Some(idx),
                } => {
                    // The key is absent from its whole sequence, so reusing
                    // a tombstone on it cannot create a duplicate.
                    trace!(slot = idx, "probe cycle exhausted; reusing tombstone");
                    self.slots[idx] = Slot::Occupied(entry);
                    self.count += 1;
                    return Ok(());
                }
                Lookup::Exhausted { tombstone: None } => {
                    trace!(
                        capacity = self.slots.len(),
                        "probe cycle exhausted with no free slot; growing"
                    );
                    self.resize_up()?;
                }
            }
        }
    }

    /// Tombstones `key` if present. Returns whether an entry was removed.
    pub fn delete(&mut self, key: &str) -> Result<bool, TableError> {
        if self.load_percent() < self.config.shrink_load_percent {
            self.resize_down()?;
        }

        let mut removed = 0;
        for idx in ProbeSeq::new(key, self.slots.len()).indices() {
            let hit = match &self.slots[idx] {
                Slot::Empty => break,
                Slot::Occupied(e) => e.key == key,
                Slot::Tombstone => false,
            };
            if hit {
                self.slots[idx] = Slot::Tombstone;
                removed += 1;
            }
        }

        match self.config.count_policy {
            CountPolicy::Exact => self.count -= removed,
            CountPolicy::Legacy => self.count = self.count.saturating_sub(1),
        }
        Ok(removed > 0)
    }

    fn resize_up(&mut self) -> Result<(), TableError> {
        let base_size = self
            .base_size
            .checked_mul(2)
            .ok_or(TableError::AllocationFailed { slots: usize::MAX })?;
        self.resize(base_size)
    }

    fn resize_down(&mut self) -> Result<(), TableError> {
        self.resize(self.base_size / 2)
    }

    /// Rebuilds the table at `base_size` by reinserting every live entry.
    /// Tombstones do not survive. Below the minimum base size this is a no-op.
    fn resize(&mut self, base_size: usize) -> Result<(), TableError> {
        if base_size < self.config.min_base_size {
            return Ok(());
        }
        let mut next = Self::with_base_size(self.config, base_size)?;
        let from = self.slots.len();
        for slot in self.slots.iter_mut() {
            if let Slot::Occupied(entry) = std::mem::take(slot) {
                next.insert_entry(entry)?;
            }
        }
        debug!(
            from,
            to = next.slots.len(),
            live = next.count,
            "resized hash table"
        );
        *self = next;
        Ok(())
    }
}

impl Default for HashTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
impl HashTable {
    /// Panics if any structural invariant is broken.
    pub(crate) fn assert_invariants(&self) {
        use crate::prime::is_prime;
        use std::collections::HashSet;

        assert!(is_prime(self.slots.len()).is_prime(), "capacity must be prime");
        assert_eq!(self.slots.len(), next_prime(self.base_size));
        assert!(self.base_size >= self.config.min_base_size);

        let mut keys = HashSet::new();
        for slot in &self.slots {
            if let Slot::Occupied(e) = slot {
                assert!(keys.insert(e.key.as_str()), "duplicate key {:?}", e.key);
                assert_eq!(self.search(&e.key), Some(e.value.as_str()));
            }
        }
        if self.config.count_policy == CountPolicy::Exact {
            assert_eq!(self.count, keys.len(), "count must equal occupied slots");
        }
    }

    pub(crate) fn slot_of(&self, key: &str) -> Option<usize> {
        match self.lookup(key) {
            Lookup::Found(idx) => Some(idx),
            _ => None,
        }
    }

    pub(crate) fn is_tombstone(&self, idx: usize) -> bool {
        matches!(self.slots[idx], Slot::Tombstone)
    }
}
