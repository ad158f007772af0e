//! Collection aliases used across the crate.
//!
//! Keys are small integer ids, so the fast non-DoS-resistant hasher is fine.

pub type HashMap<K, V> = rustc_hash::FxHashMap<K, V>;
