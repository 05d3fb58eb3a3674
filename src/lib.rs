//! symtable: a single-threaded symbol table mapping string keys to
//! borrowed values over a singly linked chain of bindings.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: the smallest useful associative container: no hashing, no
//!   ordering beyond most-recently-inserted-first, linear scans only.
//! - Layers:
//!   - Binding<'v, V>: one link of the chain. Owns a copy of its key,
//!     borrows its value, names its successor by `Link`.
//!   - SymTable<'v, V>: owns the chain (head + binding arena) and exposes
//!     put/insert, get, contains, remove/take, map and iteration.
//!
//! Constraints
//! - Keys are unique; duplicate inserts fail and leave the table untouched.
//! - New bindings are prepended, so traversal is reverse insertion order.
//! - Values are never owned. `'v` ties every bound value to the table's
//!   lifetime, so a value cannot be dropped while it is still bound.
//! - Every keyed operation is O(n) in the number of bindings.
//!
//! Chain representation
//! - Bindings live in a `slotmap::SlotMap` arena and point at their
//!   successor with a generational `Link`. Unlinking splices the
//!   predecessor (or the head) past the removed binding and then frees its
//!   slot; the free list recycles slots for later inserts.
//! - The chain and the arena always hold the same set of bindings, so
//!   `len()` is the arena's length.
//!
//! Failure model
//! - Missing keys and duplicate inserts are ordinary results (`bool`,
//!   `Option`, `InsertError`), never panics.
//! - A corrupt chain is a bug and panics on the dangling link.
//!
//! Notes and non-goals
//! - No internal locking. Shared reads go through `&self`; writes need
//!   `&mut self`.
//! - `map` borrows the table, so a visitor cannot insert or remove while
//!   the chain is being walked. Mutate values through `Cell`/`RefCell`.
//! - No resizing, rehashing or persistence.

mod binding;
mod sym_table;
mod sym_table_proptest;

// Public surface
pub use sym_table::{InsertError, Iter, Keys, SymTable};
