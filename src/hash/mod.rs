//! Open-addressing hash table with pluggable hash and probe functions.

pub mod table;

pub use table::{default_hash_fn, linear_probing, Entry, HashMap, HashTable, KeyEntry, KeyValueEntry, Table};
