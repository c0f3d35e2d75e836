//! Storage backend abstraction.
//!
//! [`ContactStorage`] is the seam between the runtime and wherever contacts live.
//! It only knows how to load and save the whole collection; all mutation rules
//! stay in [`ContactCollection`](crate::domain::ContactCollection).

use crate::domain::error::Result;
use crate::domain::Contact;

/// Abstraction over persistent storage backends.
///
/// # Implementations
///
/// - [`JsonStorage`](super::JsonStorage): JSON file with atomic writes (default)
/// - [`MemoryStorage`](super::MemoryStorage): in-process, nothing survives a restart
///
/// # Examples
///
/// ```no_run
/// use contactbook::storage::{ContactStorage, JsonStorage};
/// use std::path::PathBuf;
///
/// let mut storage = JsonStorage::new(PathBuf::from("/tmp/contacts.json"))?;
/// let contacts = storage.load_contacts()?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait ContactStorage: Send {
    /// Returns all stored contacts in collection order.
    ///
    /// File-backed implementations read the backing store again, so changes made
    /// by other processes since the last load are picked up.
    ///
    /// # Errors
    ///
    /// Returns an error if the read operation fails.
    fn load_contacts(&mut self) -> Result<Vec<Contact>>;

    /// Replaces the stored contacts with `contacts`.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails. Backends may keep the new contacts in
    /// memory and retry on a later save.
    fn save_contacts(&mut self, contacts: &[Contact]) -> Result<()>;
}

impl<S: ContactStorage + ?Sized> ContactStorage for Box<S> {
    fn load_contacts(&mut self) -> Result<Vec<Contact>> {
        (**self).load_contacts()
    }

    fn save_contacts(&mut self, contacts: &[Contact]) -> Result<()> {
        (**self).save_contacts(contacts)
    }
}

/// Storage that keeps contacts in memory only.
///
/// Useful for hosts without a writable filesystem and for tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    contacts: Vec<Contact>,
    saves: usize,
}

impl MemoryStorage {
    /// Creates storage preloaded with `contacts`.
    #[must_use]
    pub fn with_contacts(contacts: Vec<Contact>) -> Self {
        Self { contacts, saves: 0 }
    }

    /// Number of successful saves so far.
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl ContactStorage for MemoryStorage {
    fn load_contacts(&mut self) -> Result<Vec<Contact>> {
        Ok(self.contacts.clone())
    }

    fn save_contacts(&mut self, contacts: &[Contact]) -> Result<()> {
        contacts.clone_into(&mut self.contacts);
        self.saves += 1;
        tracing::trace!(count = contacts.len(), "contacts kept in memory");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_storage_returns_what_was_saved() {
        let mut storage = MemoryStorage::default();
        assert!(storage.load_contacts().unwrap().is_empty());

        let contacts = vec![Contact::with_id("1", "Alice", "Mexico")];
        storage.save_contacts(&contacts).unwrap();

        assert_eq!(storage.load_contacts().unwrap(), contacts);
        assert_eq!(storage.save_count(), 1);
    }
}
