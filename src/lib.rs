//! hash-tables: two single-threaded hash containers that grow by doubling,
//! with diagnostic dumps of their exact physical layout.
//!
//! Internal Design:
//!
//! Summary
//! - `ChainedMap`: `String` keys to `i32` values. Collisions are resolved
//!   by per-bucket singly-linked chains; new keys are prepended to their
//!   chain. Hash is 32-bit FNV-1a.
//! - `ProbingSet`: `i32` keys stored directly in a slot array. Collisions
//!   are resolved by double hashing; removal leaves a tombstone.
//! - Both grow when an insert pushes `len / capacity` above
//!   [`MAX_LOAD_FACTOR`]. Neither shrinks.
//!
//! Constraints
//! - Single-threaded. Mutation takes `&mut self`; no interior mutability.
//! - No sentinel values: absent keys are `None`/`false`.
//! - Copies are explicit (`copy()` or `Clone`) and deep.
//!
//! Chain storage
//! - Chain nodes live in a `slotmap::SlotMap` arena and link to each other
//!   by arena key. A bucket holds its chain head's key. Each node caches
//!   its key's hash, so growing relinks nodes without rehashing key bytes
//!   or moving key buffers.
//!
//! Probing and tombstones
//! - Probe sequence: `(h1(key) + i * h2(key)) mod size`, `i = 0..size`.
//!   Lookups stop at the first `Empty` slot and walk through `Deleted`
//!   ones. Inserts also walk to the first `Empty` slot before claiming the
//!   earliest tombstone seen, so a key is never stored twice.
//! - With the default doubling growth the step and the size may share a
//!   factor, leaving part of the table unreachable for some keys. Walks are
//!   bounded by the table size; an insert that finds no vacancy on its
//!   cycle grows the table. `Growth::Prime` avoids the issue entirely.
//!
//! Failure semantics
//! - Construction and growth allocate with `try_reserve_exact` and report
//!   `TableError::AllocFailed` instead of aborting. Growth builds the new
//!   array completely before swapping it in, so a failed growth leaves the
//!   table exactly as it was.
//!
//! Logging
//! - Growth is reported at `debug` level through the `log` facade; probe
//!   cycle saturation at `trace`. No logger is installed by this crate.

pub mod chained_map;
pub mod diagnostics;
pub mod error;
pub mod hashing;
pub mod probing_set;

mod chained_map_proptest;

/// Load factor above which an insert grows the table.
pub const MAX_LOAD_FACTOR: f64 = 0.75;

/// Capacity multiplier applied on growth.
pub const GROWTH_FACTOR: usize = 2;

// Public surface
pub use chained_map::ChainedMap;
pub use error::TableError;
pub use probing_set::{Growth, ProbingSet, Slot};
