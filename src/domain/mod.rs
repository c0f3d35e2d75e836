//! Domain layer for the contact book.
//!
//! Core types and rules, independent of storage, query strings and rendering.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`contact`]: Contact model and identifiers
//! - [`collection`]: The contact collection and its mutation rules
//! - [`sort`]: Sort field, direction and the toggle rule
//! - [`projection`]: Filter, sort and paginate into the visible page

pub mod collection;
pub mod contact;
pub mod error;
pub mod projection;
pub mod sort;

pub use collection::ContactCollection;
pub use contact::{demo_contacts, Contact, ContactId};
pub use error::{ContactbookError, Result};
pub use projection::{project, Projection};
pub use sort::{SortDirection, SortField, SortSpec};
