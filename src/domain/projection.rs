//! Contact list projection: filter, sort, paginate.
//!
//! [`project`] derives the page of contacts to display from the full collection and
//! the transient view parameters. It is pure and total: any page number, any search
//! text and any sort spec produce a result, never an error.
//!
//! # Pipeline
//!
//! ```text
//! contacts ──► filter (search term) ──► sort (optional) ──► slice [first, last)
//!                     │
//!                     └──► total_matching, total_pages
//! ```
//!
//! The order is fixed: filtering always happens before sorting, and paging always
//! happens last on the filtered, sorted sequence.

use super::contact::Contact;
use super::sort::{SortField, SortSpec};
use icu::casemap::CaseMapper;
use icu::collator::options::CollatorOptions;
use icu::collator::{Collator, CollatorBorrowed};
use icu::locale::locale;
use std::cmp::Ordering;
use std::num::NonZeroUsize;

/// Result of projecting the collection for one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection<'a> {
    /// Contacts on the requested page, in display order.
    pub visible: Vec<&'a Contact>,

    /// Number of contacts matching the search term, before paging.
    pub total_matching: usize,

    /// `ceil(total_matching / page_size)`; zero when nothing matches.
    pub total_pages: usize,

    /// Index of the first visible contact within the filtered, sorted sequence.
    ///
    /// Clamped to `total_matching`, so a page past the end reports
    /// `first_index == last_index == total_matching`.
    pub first_index: usize,

    /// Exclusive end index, clamped the same way.
    pub last_index: usize,

    /// Whether the trimmed search term is non-empty.
    pub is_filtered: bool,
}

/// Locale-aware string ordering for sort keys.
///
/// Uses the ICU root collation tailored for English, so case differences only break
/// ties (`"alice" < "Bob"`). If collation data is unavailable the comparison falls
/// back to case-folded text, then raw text.
struct ContactOrdering {
    collator: Option<CollatorBorrowed<'static>>,
}

impl ContactOrdering {
    fn new() -> Self {
        let collator = match Collator::try_new(locale!("en").into(), CollatorOptions::default()) {
            Ok(collator) => Some(collator),
            Err(e) => {
                tracing::debug!(error = %e, "collator unavailable, using case-folded ordering");
                None
            }
        };
        Self { collator }
    }

    fn compare(&self, left: &str, right: &str) -> Ordering {
        self.collator.as_ref().map_or_else(
            || {
                let folder = CaseMapper::new();
                folder
                    .fold_string(left)
                    .cmp(&folder.fold_string(right))
                    .then_with(|| left.cmp(right))
            },
            |collator| collator.compare(left, right),
        )
    }
}

fn sort_key(contact: &Contact, field: SortField) -> &str {
    match field {
        SortField::Name => contact.name.as_str(),
        SortField::City => contact.city.as_str(),
    }
}

/// Retains contacts whose name or city contains `search_term`, ignoring case.
///
/// The term is used as given (not trimmed). An empty term keeps everything.
fn filter<'a>(contacts: &'a [Contact], search_term: &str) -> Vec<&'a Contact> {
    if search_term.is_empty() {
        return contacts.iter().collect();
    }

    let folder = CaseMapper::new();
    let needle = folder.fold_string(search_term);

    contacts
        .iter()
        .filter(|contact| {
            folder.fold_string(&contact.name).contains(needle.as_ref())
                || folder.fold_string(&contact.city).contains(needle.as_ref())
        })
        .collect()
}

/// Stable sort by the selected field; equal keys keep their filtered order.
fn sort(contacts: &mut [&Contact], spec: SortSpec) {
    let ordering = ContactOrdering::new();
    contacts.sort_by(|a, b| {
        let cmp = ordering.compare(sort_key(a, spec.field), sort_key(b, spec.field));
        spec.direction.apply(cmp)
    });
}

/// Computes `[first, last)` for a 1-based page, clamped to `total`.
///
/// Page 0 has no items.
fn page_bounds(page: usize, page_size: NonZeroUsize, total: usize) -> (usize, usize) {
    let Some(offset) = page.checked_sub(1) else {
        return (0, 0);
    };
    let first = offset.saturating_mul(page_size.get()).min(total);
    let last = first.saturating_add(page_size.get()).min(total);
    (first, last)
}

/// Projects the contact collection onto one page of the list.
///
/// # Parameters
///
/// * `contacts` - Full collection in collection order
/// * `search_term` - Case-insensitive substring matched against name and city
/// * `sort_spec` - Field and direction, or `None` to keep collection order
/// * `page` - 1-based page number; pages past the end yield an empty slice
/// * `page_size` - Contacts per page
///
/// # Examples
///
/// ```
/// use contactbook::{project, Contact, SortField, SortSpec};
/// use std::num::NonZeroUsize;
///
/// let contacts = vec![
///     Contact::with_id("1", "Bob", "Munich"),
///     Contact::with_id("2", "alice", "Berlin"),
///     Contact::with_id("3", "Charlie", "Hamburg"),
/// ];
/// let page_size = NonZeroUsize::new(9).unwrap();
///
/// let result = project(&contacts, "", Some(SortSpec::ascending(SortField::Name)), 1, page_size);
/// let names: Vec<&str> = result.visible.iter().map(|c| c.name.as_str()).collect();
/// assert_eq!(names, ["alice", "Bob", "Charlie"]);
/// assert_eq!(result.total_pages, 1);
/// ```
#[must_use]
pub fn project<'a>(
    contacts: &'a [Contact],
    search_term: &str,
    sort_spec: Option<SortSpec>,
    page: usize,
    page_size: NonZeroUsize,
) -> Projection<'a> {
    let _span = tracing::debug_span!("project",
        total_contacts = contacts.len(),
        query_len = search_term.len(),
        sort = ?sort_spec,
        page
    )
    .entered();

    let mut matching = filter(contacts, search_term);

    if let Some(spec) = sort_spec {
        sort(&mut matching, spec);
    }

    let total_matching = matching.len();
    let total_pages = total_matching.div_ceil(page_size.get());
    let (first_index, last_index) = page_bounds(page, page_size, total_matching);

    let visible = matching
        .get(first_index..last_index)
        .map(<[&Contact]>::to_vec)
        .unwrap_or_default();

    tracing::debug!(
        total_matching,
        total_pages,
        visible = visible.len(),
        "projection computed"
    );

    Projection {
        visible,
        total_matching,
        total_pages,
        first_index,
        last_index,
        is_filtered: !search_term.trim().is_empty(),
    }
}
