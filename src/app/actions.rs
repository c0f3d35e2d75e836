//! Actions representing side effects to be executed by the runtime.
//!
//! The event handler never touches storage or the host environment directly. It
//! returns [`Action`]s, and [`ContactBook`](crate::runtime::ContactBook) executes
//! them in order.
//!
//! # Example
//!
//! ```rust
//! use contactbook::Action;
//!
//! let actions = vec![
//!     Action::PersistContacts,
//!     Action::PushQuery("sorting=false&page=1".to_string()),
//! ];
//! assert_eq!(actions.len(), 2);
//! ```

/// Side effects produced by event handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Writes the contact collection to storage.
    ///
    /// Emitted after every accepted add, update or delete.
    PersistContacts,

    /// Replaces the current URL query with this one.
    ///
    /// Emitted when the search term, sort or page changes through user
    /// interaction. Applying a query from the URL does not emit it.
    PushQuery(String),

    /// Copies a shareable link to the clipboard.
    ///
    /// Carries the query only; the runtime joins it onto the configured base URL.
    CopyLink(String),
}
