//! Contact domain model.
//!
//! A [`Contact`] is a name/city pair identified by an opaque [`ContactId`]. Ids are
//! assigned once at creation and never reused; names and cities carry no uniqueness
//! constraint.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque, unique contact identifier.
///
/// Fresh ids are random UUIDs. Ids loaded from storage are kept verbatim, so older
/// collections with numeric ids (`"1"`, `"2"`, ...) stay addressable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactId(String);

impl ContactId {
    /// Generates a new identifier that has never been handed out before.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ContactId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ContactId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single entry in the contact book.
///
/// Serialized flat as `{"id": "...", "name": "...", "city": "..."}`.
///
/// `name` and `city` are trimmed and non-empty when they come through the mutation
/// layer. Records that bypass validation (hand-edited storage files, for instance) may
/// hold empty strings; every consumer in this crate tolerates that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    pub city: String,
}

impl Contact {
    /// Creates a contact with a freshly generated id.
    ///
    /// No validation happens here; use
    /// [`ContactCollection::add`](crate::domain::ContactCollection::add) for user input.
    ///
    /// # Examples
    ///
    /// ```
    /// use contactbook::Contact;
    ///
    /// let contact = Contact::new("Alice", "Berlin");
    /// assert_eq!(contact.name, "Alice");
    /// assert!(!contact.id.as_str().is_empty());
    /// ```
    pub fn new(name: impl Into<String>, city: impl Into<String>) -> Self {
        Self::with_id(ContactId::generate(), name, city)
    }

    /// Creates a contact with an explicit id.
    pub fn with_id(id: impl Into<ContactId>, name: impl Into<String>, city: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            city: city.into(),
        }
    }
}

const DEMO_ENTRIES: [(&str, &str); 60] = [
    ("Alice Johnson", "New York"),
    ("Bob Smith", "Los Angeles"),
    ("Charlie Brown", "Chicago"),
    ("David Williams", "Houston"),
    ("Emma Davis", "Phoenix"),
    ("Frank Miller", "Philadelphia"),
    ("Grace Wilson", "San Antonio"),
    ("Henry Moore", "San Diego"),
    ("Isabella Garcia", "Dallas"),
    ("Jack Martinez", "San Jose"),
    ("Katherine Lee", "Austin"),
    ("Liam Taylor", "Jacksonville"),
    ("Megan Adams", "San Francisco"),
    ("Noah Clark", "Columbus"),
    ("Olivia Rodriguez", "Fort Worth"),
    ("Patrick White", "Charlotte"),
    ("Quinn Evans", "Detroit"),
    ("Rachel Foster", "El Paso"),
    ("Samuel Rivera", "Memphis"),
    ("Tiffany Brooks", "Boston"),
    ("Ulysses Hayes", "Seattle"),
    ("Victoria Price", "Denver"),
    ("William Hughes", "Washington DC"),
    ("Xander Morgan", "Nashville"),
    ("Yasmine Cooper", "Baltimore"),
    ("Zachary Reed", "Louisville"),
    ("Amelia Phillips", "Portland"),
    ("Benjamin Scott", "Oklahoma City"),
    ("Chloe Turner", "Milwaukee"),
    ("Dominic Carter", "Las Vegas"),
    ("Elena Sanchez", "Albuquerque"),
    ("Felix Mitchell", "Tucson"),
    ("Gabriella Perez", "Fresno"),
    ("Harrison Kelly", "Sacramento"),
    ("Ivy Nelson", "Long Beach"),
    ("Julian Baker", "Kansas City"),
    ("Kira Gonzalez", "Mesa"),
    ("Leo Edwards", "Atlanta"),
    ("Melissa Collins", "Virginia Beach"),
    ("Nathan Stewart", "Omaha"),
    ("Octavia Morris", "Raleigh"),
    ("Preston Butler", "Miami"),
    ("Quincy Bell", "Oakland"),
    ("Rebecca Diaz", "Minneapolis"),
    ("Spencer Woods", "Tulsa"),
    ("Tessa Barnes", "Cleveland"),
    ("Uriel Coleman", "Wichita"),
    ("Vanessa Perry", "Arlington"),
    ("Wesley Powell", "New Orleans"),
    ("Ximena Ross", "Bakersfield"),
    ("Yuri Watson", "Tampa"),
    ("Zoe Gray", "Honolulu"),
    ("Adrian James", "Aurora"),
    ("Bianca Mills", "Anaheim"),
    ("Carlos Fisher", "Santa Ana"),
    ("Diana Howard", "St. Louis"),
    ("Ethan Russell", "Riverside"),
    ("Fiona Olson", "Corpus Christi"),
    ("George Schmidt", "Pittsburgh"),
    ("Hannah Warren", "Lexington"),
];

/// Returns the sample contacts used to seed an empty contact book.
///
/// Ids are sequential (`"1"`, `"2"`, ...) so they stay stable across runs.
#[must_use]
pub fn demo_contacts() -> Vec<Contact> {
    DEMO_ENTRIES
        .iter()
        .enumerate()
        .map(|(idx, (name, city))| Contact::with_id((idx + 1).to_string(), *name, *city))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_distinct() {
        let a = ContactId::generate();
        let b = ContactId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn contact_serializes_as_flat_record() {
        let contact = Contact::with_id("42", "Alice", "Berlin");
        let json = serde_json::to_value(&contact).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": "42", "name": "Alice", "city": "Berlin"})
        );
    }

    #[test]
    fn demo_contacts_have_unique_sequential_ids() {
        let demo = demo_contacts();
        assert_eq!(demo.len(), DEMO_ENTRIES.len());
        assert_eq!(demo[0].id.as_str(), "1");
        assert_eq!(demo.len(), 60);
        assert_eq!(demo[59].id.as_str(), "60");
        assert_eq!(demo[59].name, "Hannah Warren");
        let ids: std::collections::HashSet<_> = demo.iter().map(|c| c.id.clone()).collect();
        assert_eq!(ids.len(), demo.len());
    }
}
