//! Digests de blobs registrados en el store.

pub mod hash;

pub use hash::hash_bytes;
