//! Storage layer for the persisted contact collection.
//!
//! # Modules
//!
//! - `backend`: Storage trait plus an in-memory implementation
//! - `json`: JSON file-based storage implementation

pub mod backend;
pub mod json;

pub use backend::{ContactStorage, MemoryStorage};
pub use json::JsonStorage;
