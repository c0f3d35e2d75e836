//! Infrastructure layer for filesystem and environment interactions.

pub mod paths;

pub use paths::{default_storage_path, expand_tilde, get_data_dir};
