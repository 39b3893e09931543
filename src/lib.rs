//! prime-probe-table: a single-threaded string-to-string hash table using
//! open addressing with double hashing over prime-sized buckets.
//!
//! Internal Design:
//!
//! Summary
//! - `prime`: primality test and next-prime search used to size buckets.
//! - `HashTable`: owns a `Vec` of tri-state slots (`Empty`, `Occupied`,
//!   `Tombstone`), a live-entry count and a `base_size` capacity target.
//!   Physical capacity is always `next_prime(base_size)`.
//!
//! Probing
//! - Two polynomial hashes over the key bytes, with multipliers 167 and
//!   229, give a start slot `a` and step `b + 1`; attempt `i` visits
//!   `(a + i * (b + 1)) mod capacity`.
//! - `Empty` ends a walk. `Tombstone` never does: a key may have been
//!   placed past a slot that was later deleted.
//! - A walk is bounded by one full cycle (`capacity` attempts). If a cycle
//!   finds neither the key nor an empty slot, insert reuses the first
//!   tombstone on the cycle, or grows the table when there is none.
//!
//! Resizing
//! - Insert grows (`base_size * 2`) once load exceeds 70%; delete shrinks
//!   (`base_size / 2`) once load falls below 10%, never below the minimum
//!   base size. Thresholds and sizes live in [`TableConfig`].
//! - A resize builds a second table, moves every live entry into it through
//!   the normal insert path, then replaces `self` wholesale. Tombstones are
//!   discarded.
//!
//! Constraints
//! - Single-threaded: no internal synchronization. Wrap the table in a lock
//!   for shared use; resizes happen inside `insert`/`delete`.
//! - Keys and values are copied into owned `String`s; `search` hands back a
//!   borrowed `&str` into the table.
//! - No iteration API.
//!
//! Counting
//! - [`CountPolicy::Exact`] decrements the live count only when `delete`
//!   tombstones an entry. [`CountPolicy::Legacy`] decrements on every
//!   `delete`, reproducing older tables whose count drifted on misses.

pub mod config;
pub mod error;
pub mod hash_table;
mod hash_table_proptest;
pub mod prime;

// Public surface
pub use config::{CountPolicy, TableConfig};
pub use error::TableError;
pub use hash_table::HashTable;
pub use prime::{is_prime, next_prime, Primality};
