//! Sort specification for the contact list.
//!
//! The list is either unsorted (collection order) or sorted by one [`SortField`] in
//! one [`SortDirection`]. "Unsorted" is modelled as `Option<SortSpec>::None` rather
//! than a separate flag.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Contact field the list can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Name,
    City,
}

impl SortField {
    /// Query-string token for this field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::City => "city",
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::Name),
            "city" => Ok(Self::City),
            _ => Err(()),
        }
    }
}

/// Ordering direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Returns the opposite direction.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    /// Query-string token for this direction.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    /// Applies the direction to an ascending comparison result.
    #[must_use]
    pub const fn apply(self, ordering: std::cmp::Ordering) -> std::cmp::Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

impl FromStr for SortDirection {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(()),
        }
    }
}

/// Active sort: a field and a direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortSpec {
    #[must_use]
    pub const fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Ascending sort by `field`.
    #[must_use]
    pub const fn ascending(field: SortField) -> Self {
        Self::new(field, SortDirection::Asc)
    }

    /// Computes the sort that results from the user selecting `field`.
    ///
    /// Selecting the active field flips its direction. Selecting any other field,
    /// or selecting while unsorted, starts ascending on that field.
    ///
    /// # Examples
    ///
    /// ```
    /// use contactbook::{SortDirection, SortField, SortSpec};
    ///
    /// let current = Some(SortSpec::ascending(SortField::Name));
    /// let next = SortSpec::toggle(current, SortField::Name);
    /// assert_eq!(next.direction, SortDirection::Desc);
    ///
    /// let other = SortSpec::toggle(Some(next), SortField::City);
    /// assert_eq!(other, SortSpec::ascending(SortField::City));
    /// ```
    #[must_use]
    pub fn toggle(current: Option<Self>, field: SortField) -> Self {
        match current {
            Some(active) if active.field == field => Self::new(field, active.direction.flipped()),
            _ => Self::ascending(field),
        }
    }
}

impl Default for SortSpec {
    fn default() -> Self {
        Self::ascending(SortField::Name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn toggling_same_field_twice_restores_original_spec() {
        let start = SortSpec::ascending(SortField::Name);
        let once = SortSpec::toggle(Some(start), SortField::Name);
        let twice = SortSpec::toggle(Some(once), SortField::Name);

        assert_eq!(once.direction, SortDirection::Desc);
        assert_eq!(twice, start);
    }

    #[rstest]
    #[case(None, SortField::City)]
    #[case(Some(SortSpec::new(SortField::Name, SortDirection::Desc)), SortField::City)]
    #[case(Some(SortSpec::new(SortField::City, SortDirection::Desc)), SortField::Name)]
    fn selecting_new_field_resets_to_ascending(#[case] current: Option<SortSpec>, #[case] field: SortField) {
        assert_eq!(SortSpec::toggle(current, field), SortSpec::ascending(field));
    }

    #[rstest]
    #[case("name", Ok(SortField::Name))]
    #[case("city", Ok(SortField::City))]
    #[case("Name", Err(()))]
    #[case("", Err(()))]
    fn parses_field_tokens(#[case] input: &str, #[case] expected: std::result::Result<SortField, ()>) {
        assert_eq!(input.parse::<SortField>(), expected);
    }

    #[test]
    fn descending_reverses_comparison() {
        use std::cmp::Ordering;
        assert_eq!(SortDirection::Desc.apply(Ordering::Less), Ordering::Greater);
        assert_eq!(SortDirection::Asc.apply(Ordering::Less), Ordering::Less);
        assert_eq!(SortDirection::Desc.apply(Ordering::Equal), Ordering::Equal);
    }
}
