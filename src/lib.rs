//! chained-table: a fixed-bucket, separate-chaining hash table whose hash
//! function and equality predicate are bound per table instance.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a small associative container with caller-defined key
//!   semantics, built in two layers that can be reasoned about
//!   independently.
//! - Layers:
//!   - ChainedList<T>: singly-linked list with append, indexed get,
//!     indexed insert and indexed removal. Nodes live in a `slotmap`
//!     arena and link to each other by key; the list never inspects its
//!     payloads.
//!   - ChainedHashTable<K, V, P>: boxed slice of `N` bucket slots, each
//!     either empty or owning a `ChainedList<Record<K, V>>`. A key selects
//!     its bucket via `hash(key) mod N`, then the bucket is scanned
//!     linearly with the policy's equality predicate.
//!
//! Constraints
//! - Single-threaded: tables are `!Send`/`!Sync` (marker in the
//!   reentrancy guard).
//! - Fixed bucket count: `N` is chosen at construction (120 by default)
//!   and never changes. There is no growth or rehashing; heavy load
//!   degrades every bucket to an O(k) scan.
//! - Per-instance key policy: `P: KeyPolicy<K>` is owned by the table.
//!   No hash or equality state is shared between tables.
//!
//! Duplicate keys
//! - `DuplicatePolicy::Append` (default): `insert` never checks for an
//!   equal key. Duplicates accumulate in the bucket in insertion order;
//!   `get` returns the earliest, `remove` unlinks the earliest and
//!   exposes the next.
//! - `DuplicatePolicy::Replace`: `insert` overwrites the first equal
//!   record and returns the previous value.
//!
//! Entry count
//! - `len()` counts records. `insert` (when it adds a record) increments
//!   it and `remove` decrements it, so `len()` always equals the number of
//!   reachable records.
//!
//! Bucket indexing
//! - `IndexMode::Modulo` (default) reduces the hash modulo `N`.
//! - `IndexMode::Direct` uses the hash itself as the bucket index.
//!   Out-of-range hashes are rejected by `insert` with
//!   `TableError::BucketOutOfRange` and read as "not present" by lookups.
//!
//! Teardown
//! - Dropping a table drops every key and value it holds.
//! - `destroy_with(f)` consumes the table and passes each surviving
//!   `(key, value)` to `f` exactly once. The list layer only drains
//!   payloads; the `Record` shape is known to the table alone.
//!
//! Reentrancy
//! - Hash and equality callbacks run while a bucket is being scanned. A
//!   debug-only guard panics if such a callback re-enters the same table.
//!
//! Logging
//! - Through the `log` facade: construction and teardown at `debug`,
//!   bucket creation and reclamation at `trace`, rejected direct indices
//!   at `warn`.

pub mod chain;
#[cfg(test)]
mod chain_proptest;
mod config;
mod error;
mod policy;
mod record;
mod reentrancy;
mod table;

// Public surface
pub use chain::ChainedList;
pub use config::{DuplicatePolicy, IndexMode, TableConfig, DEFAULT_BUCKET_COUNT};
pub use error::TableError;
pub use policy::{FnPolicy, HashEq, KeyPolicy};
pub use record::Record;
pub use reentrancy::{OpGuard, Section};
pub use table::{ChainedHashTable, TableStats};
