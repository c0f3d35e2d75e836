//! The contact collection and its mutation rules.
//!
//! [`ContactCollection`] is the single source of truth for contact data. It enforces
//! the input rules for user-originated mutations: names and cities are trimmed and
//! must be non-empty, otherwise the mutation is silently skipped. Unknown ids are
//! skipped the same way. None of these cases is an error.

use super::contact::{Contact, ContactId};

/// Trims both inputs and returns them only if neither ends up empty.
fn validated(name: &str, city: &str) -> Option<(String, String)> {
    let name = name.trim();
    let city = city.trim();
    if name.is_empty() || city.is_empty() {
        return None;
    }
    Some((name.to_string(), city.to_string()))
}

/// Ordered collection of contacts with unique ids.
///
/// Order matters: it is the "unsorted" display order. New contacts are prepended,
/// updates keep position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactCollection {
    contacts: Vec<Contact>,
}

impl ContactCollection {
    /// Wraps an existing list, dropping later duplicates of an id.
    #[must_use]
    pub fn new(contacts: Vec<Contact>) -> Self {
        let mut collection = Self::default();
        collection.replace_all(contacts);
        collection
    }

    /// Returns the contacts in collection order.
    #[must_use]
    pub fn as_slice(&self) -> &[Contact] {
        &self.contacts
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    /// Looks up a contact by id.
    #[must_use]
    pub fn get(&self, id: &ContactId) -> Option<&Contact> {
        self.contacts.iter().find(|c| &c.id == id)
    }

    /// Adds a contact at the front of the collection.
    ///
    /// Returns the id of the new contact, or `None` if the trimmed name or city was
    /// empty (the collection is left untouched).
    ///
    /// # Examples
    ///
    /// ```
    /// use contactbook::ContactCollection;
    ///
    /// let mut contacts = ContactCollection::default();
    /// assert!(contacts.add("  Alice ", "Berlin").is_some());
    /// assert!(contacts.add("", "City").is_none());
    /// assert_eq!(contacts.len(), 1);
    /// assert_eq!(contacts.as_slice()[0].name, "Alice");
    /// ```
    pub fn add(&mut self, name: &str, city: &str) -> Option<ContactId> {
        let Some((name, city)) = validated(name, city) else {
            tracing::debug!("rejected contact with empty name or city");
            return None;
        };

        let contact = Contact::new(name, city);
        let id = contact.id.clone();
        self.contacts.insert(0, contact);

        tracing::debug!(contact_id = %id, total = self.contacts.len(), "contact added");
        Some(id)
    }

    /// Replaces name and city of the contact with `id`, keeping its position.
    ///
    /// Returns `true` if a contact was changed. Empty trimmed input or an unknown id
    /// leave the collection untouched and return `false`.
    pub fn update(&mut self, id: &ContactId, name: &str, city: &str) -> bool {
        let Some((name, city)) = validated(name, city) else {
            tracing::debug!(contact_id = %id, "rejected update with empty name or city");
            return false;
        };

        let Some(contact) = self.contacts.iter_mut().find(|c| &c.id == id) else {
            tracing::debug!(contact_id = %id, "update for unknown contact ignored");
            return false;
        };

        contact.name = name;
        contact.city = city;
        tracing::debug!(contact_id = %id, "contact updated");
        true
    }

    /// Removes the contact with `id`. Returns `true` if something was removed.
    pub fn delete(&mut self, id: &ContactId) -> bool {
        let before = self.contacts.len();
        self.contacts.retain(|c| &c.id != id);
        let removed = self.contacts.len() != before;

        tracing::debug!(contact_id = %id, removed, "contact delete processed");
        removed
    }

    /// Replaces the whole collection, e.g. after loading from storage.
    ///
    /// If the input repeats an id, the first occurrence wins.
    pub fn replace_all(&mut self, contacts: Vec<Contact>) {
        let mut seen = std::collections::HashSet::with_capacity(contacts.len());
        let incoming = contacts.len();

        self.contacts = contacts
            .into_iter()
            .filter(|c| seen.insert(c.id.clone()))
            .collect();

        if self.contacts.len() != incoming {
            tracing::debug!(
                incoming,
                kept = self.contacts.len(),
                "dropped contacts with duplicate ids"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn sample() -> ContactCollection {
        ContactCollection::new(vec![
            Contact::with_id("1", "Alice", "Mexico"),
            Contact::with_id("2", "Bob", "Glasgow"),
        ])
    }

    #[test]
    fn add_prepends_trimmed_contact() {
        let mut contacts = sample();
        let id = contacts.add("  Carol ", " Oslo  ").unwrap();

        let first = &contacts.as_slice()[0];
        assert_eq!(first.id, id);
        assert_eq!(first.name, "Carol");
        assert_eq!(first.city, "Oslo");
        assert_eq!(contacts.len(), 3);
    }

    #[rstest]
    #[case("", "City")]
    #[case("Name", "")]
    #[case("   ", "City")]
    #[case("Name", "\t\n")]
    fn add_rejects_blank_fields(#[case] name: &str, #[case] city: &str) {
        let mut contacts = sample();
        assert!(contacts.add(name, city).is_none());
        assert_eq!(contacts, sample());
    }

    #[test]
    fn added_ids_are_never_reused() {
        let mut contacts = ContactCollection::default();
        let first = contacts.add("A", "B").unwrap();
        contacts.delete(&first);
        let second = contacts.add("A", "B").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn update_replaces_in_place() {
        let mut contacts = sample();
        assert!(contacts.update(&ContactId::from("2"), " Robert ", "Edinburgh"));

        let updated = &contacts.as_slice()[1];
        assert_eq!(updated.id.as_str(), "2");
        assert_eq!(updated.name, "Robert");
        assert_eq!(updated.city, "Edinburgh");
    }

    #[test]
    fn update_rejects_blank_and_unknown() {
        let mut contacts = sample();
        assert!(!contacts.update(&ContactId::from("2"), " ", "Edinburgh"));
        assert!(!contacts.update(&ContactId::from("99"), "Zed", "Zagreb"));
        assert_eq!(contacts, sample());
    }

    #[test]
    fn delete_removes_only_matching_id() {
        let mut contacts = sample();
        assert!(contacts.delete(&ContactId::from("1")));
        assert!(!contacts.delete(&ContactId::from("1")));
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts.as_slice()[0].name, "Bob");
    }

    #[test]
    fn replace_all_keeps_first_of_duplicate_ids() {
        let contacts = ContactCollection::new(vec![
            Contact::with_id("1", "Alice", "Mexico"),
            Contact::with_id("1", "Impostor", "Nowhere"),
        ]);
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts.as_slice()[0].name, "Alice");
    }
}
