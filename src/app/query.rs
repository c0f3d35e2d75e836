//! Mapping between view parameters and a shareable query string.
//!
//! The search term, sort spec and page are mirrored into the URL so a view can be
//! shared. Both directions are pure functions; nothing here reads or writes
//! application state.
//!
//! # Format
//!
//! ```text
//! search=<term>&sort=<name|city>&dir=<asc|desc>&sorting=true&page=<n>
//! sorting=false&page=<n>
//! ```
//!
//! `search` is only written when non-empty. Values are form-urlencoded.

use crate::domain::{SortDirection, SortField, SortSpec};
use std::collections::HashMap;
use url::form_urlencoded;

const SEARCH_KEY: &str = "search";
const SORT_KEY: &str = "sort";
const DIRECTION_KEY: &str = "dir";
const SORTING_KEY: &str = "sorting";
const PAGE_KEY: &str = "page";

/// The part of the view state that is shared through the query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewParams {
    pub search_term: String,
    pub sort: Option<SortSpec>,
    pub page: usize,
}

impl Default for ViewParams {
    /// Unfiltered, sorted by name ascending, first page.
    fn default() -> Self {
        Self {
            search_term: String::new(),
            sort: Some(SortSpec::default()),
            page: 1,
        }
    }
}

/// Serializes view parameters into a query string (without leading `?`).
///
/// # Examples
///
/// ```
/// use contactbook::app::query::{state_to_query, ViewParams};
///
/// let params = ViewParams {
///     search_term: "new york".to_string(),
///     sort: None,
///     page: 2,
/// };
/// assert_eq!(state_to_query(&params), "search=new+york&sorting=false&page=2");
/// ```
#[must_use]
pub fn state_to_query(params: &ViewParams) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());

    if !params.search_term.is_empty() {
        serializer.append_pair(SEARCH_KEY, &params.search_term);
    }

    match params.sort {
        Some(spec) => {
            serializer.append_pair(SORT_KEY, spec.field.as_str());
            serializer.append_pair(DIRECTION_KEY, spec.direction.as_str());
            serializer.append_pair(SORTING_KEY, "true");
        }
        None => {
            serializer.append_pair(SORTING_KEY, "false");
        }
    }

    serializer.append_pair(PAGE_KEY, &params.page.to_string());
    serializer.finish()
}

/// Parses a query string into view parameters.
///
/// Lenient by design of the format: a leading `?` is accepted, unknown keys are
/// ignored, and missing or malformed values fall back to defaults (`""`, name,
/// ascending, page 1). Sorting is only disabled by an explicit `sorting=false`.
/// When a key repeats, its first value is used.
///
/// # Examples
///
/// ```
/// use contactbook::app::query::query_to_state;
/// use contactbook::{SortDirection, SortField};
///
/// let params = query_to_state("?search=ali&sort=city&dir=desc&sorting=true&page=3");
/// assert_eq!(params.search_term, "ali");
/// let sort = params.sort.unwrap();
/// assert_eq!(sort.field, SortField::City);
/// assert_eq!(sort.direction, SortDirection::Desc);
/// assert_eq!(params.page, 3);
/// ```
#[must_use]
pub fn query_to_state(query: &str) -> ViewParams {
    let query = query.strip_prefix('?').unwrap_or(query);

    let mut pairs: HashMap<String, String> = HashMap::new();
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        pairs.entry(key.into_owned()).or_insert_with(|| value.into_owned());
    }

    let search_term = pairs.remove(SEARCH_KEY).unwrap_or_default();

    let sorting = pairs.get(SORTING_KEY).is_none_or(|v| v != "false");
    let sort = sorting.then(|| {
        let field = pairs
            .get(SORT_KEY)
            .and_then(|v| v.parse::<SortField>().ok())
            .unwrap_or(SortField::Name);
        let direction = pairs
            .get(DIRECTION_KEY)
            .and_then(|v| v.parse::<SortDirection>().ok())
            .unwrap_or_default();
        SortSpec::new(field, direction)
    });

    let page = pairs
        .get(PAGE_KEY)
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|p| *p >= 1)
        .unwrap_or(1);

    tracing::trace!(query_len = query.len(), ?sort, page, "parsed view query");

    ViewParams {
        search_term,
        sort,
        page,
    }
}
