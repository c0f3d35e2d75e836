//! Application state management and view model computation.
//!
//! [`AppState`] is the central state container: the contact collection plus the
//! transient view parameters (search term, sort, page) and the card edit mode.
//! Derived data, the visible page in particular, is never stored. It is recomputed
//! from state on demand by [`AppState::projection`].
//!
//! # Invariants
//!
//! - Changing the search term or the sort resets `current_page` to 1.
//! - `current_page` is always at least 1. It may point past the last page when it
//!   comes from a shared link; the projection then yields an empty page rather
//!   than an error. Deletions and reloads pull it back with
//!   [`AppState::clamp_page`].
//!
//! # Example
//!
//! ```rust
//! use contactbook::{AppState, Contact, SortField};
//! use std::num::NonZeroUsize;
//!
//! let contacts = vec![Contact::with_id("1", "Bob", "Munich")];
//! let mut state = AppState::new(contacts, NonZeroUsize::new(9).unwrap());
//! state.set_sort_field(SortField::City);
//! let view = state.compute_viewmodel();
//! assert_eq!(view.cards.len(), 1);
//! ```

use super::modes::{CardMode, EditDraft};
use super::query::{state_to_query, ViewParams};
use super::viewmodel::{
    ContactCard, ContactListView, EmptyState, PagerInfo, SearchBarInfo, SortControls,
};
use crate::domain::{
    project, Contact, ContactCollection, ContactId, Projection, SortField, SortSpec,
};
use std::num::NonZeroUsize;

/// Central application state container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    /// All contacts, in collection order.
    pub contacts: ContactCollection,

    /// Current search text, as typed.
    pub search_term: String,

    /// Active sort, or `None` for collection order.
    pub sort: Option<SortSpec>,

    /// 1-based page number.
    pub current_page: usize,

    /// Contacts per page.
    pub page_size: NonZeroUsize,

    /// Which card, if any, is being edited.
    pub card_mode: CardMode,
}

impl AppState {
    /// Creates state for `contacts` with the default view: no search, sorted by
    /// name ascending, first page.
    #[must_use]
    pub fn new(contacts: Vec<Contact>, page_size: NonZeroUsize) -> Self {
        let params = ViewParams::default();
        Self {
            contacts: ContactCollection::new(contacts),
            search_term: params.search_term,
            sort: params.sort,
            current_page: params.page,
            page_size,
            card_mode: CardMode::Viewing,
        }
    }

    /// Projects the collection with the current view parameters.
    #[must_use]
    pub fn projection(&self) -> Projection<'_> {
        project(
            self.contacts.as_slice(),
            &self.search_term,
            self.sort,
            self.current_page,
            self.page_size,
        )
    }

    /// Returns the view parameters mirrored into the query string.
    #[must_use]
    pub fn view_params(&self) -> ViewParams {
        ViewParams {
            search_term: self.search_term.clone(),
            sort: self.sort,
            page: self.current_page,
        }
    }

    /// Current query string for the view parameters.
    #[must_use]
    pub fn query(&self) -> String {
        state_to_query(&self.view_params())
    }

    /// Adopts view parameters, e.g. parsed from a shared link.
    ///
    /// The page is taken as given (clamped to at least 1), not reset.
    pub fn apply_view_params(&mut self, params: ViewParams) {
        self.search_term = params.search_term;
        self.sort = params.sort;
        self.current_page = params.page.max(1);
    }

    /// Sets the search term and returns to the first page.
    ///
    /// Returns `true` if anything changed.
    pub fn set_search_term(&mut self, term: &str) -> bool {
        if self.search_term == term && self.current_page == 1 {
            return false;
        }
        term.clone_into(&mut self.search_term);
        self.current_page = 1;
        true
    }

    /// Applies the sort toggle rule for `field` and returns to the first page.
    pub fn set_sort_field(&mut self, field: SortField) {
        self.sort = Some(SortSpec::toggle(self.sort, field));
        self.current_page = 1;
    }

    /// Switches to collection order and returns to the first page.
    ///
    /// Returns `true` if anything changed.
    pub fn reset_sorting(&mut self) -> bool {
        if self.sort.is_none() && self.current_page == 1 {
            return false;
        }
        self.sort = None;
        self.current_page = 1;
        true
    }

    /// Jumps to `page`. Page 0 is ignored.
    ///
    /// Returns `true` if the page changed.
    pub fn set_page(&mut self, page: usize) -> bool {
        if page == 0 || page == self.current_page {
            return false;
        }
        self.current_page = page;
        true
    }

    /// Advances one page if not already on the last one.
    pub fn next_page(&mut self) -> bool {
        let total_pages = self.projection().total_pages;
        if self.current_page >= total_pages {
            return false;
        }
        self.current_page += 1;
        true
    }

    /// Goes back one page if not already on the first one.
    pub fn previous_page(&mut self) -> bool {
        if self.current_page <= 1 {
            return false;
        }
        self.current_page -= 1;
        true
    }

    /// Pulls `current_page` back to the last page if it points past it.
    ///
    /// An empty result counts as one page. Returns `true` if the page changed.
    pub fn clamp_page(&mut self) -> bool {
        let last = self.projection().total_pages.max(1);
        if self.current_page <= last {
            return false;
        }
        tracing::debug!(from = self.current_page, to = last, "page clamped");
        self.current_page = last;
        true
    }

    /// Computes the renderable view model for the current page.
    #[must_use]
    pub fn compute_viewmodel(&self) -> ContactListView {
        let projection = self.projection();

        let cards = projection
            .visible
            .iter()
            .map(|contact| ContactCard {
                id: contact.id.clone(),
                name: contact.name.clone(),
                city: contact.city.clone(),
                draft: self.card_mode.draft_for(&contact.id).cloned(),
            })
            .collect();

        ContactListView {
            cards,
            search_bar: SearchBarInfo {
                query: self.search_term.clone(),
                show_clear: !self.search_term.is_empty(),
            },
            sort_controls: self.compute_sort_controls(),
            pager: self.compute_pager(&projection),
            summary: self.compute_summary(&projection),
            empty_state: self.compute_empty_state(&projection),
        }
    }

    fn compute_sort_controls(&self) -> SortControls {
        let marker = |field: SortField| {
            self.sort
                .filter(|spec| spec.field == field)
                .map(|spec| spec.direction)
        };
        SortControls {
            name: marker(SortField::Name),
            city: marker(SortField::City),
            reset_active: self.sort.is_none(),
        }
    }

    fn compute_pager(&self, projection: &Projection<'_>) -> Option<PagerInfo> {
        if projection.total_pages <= 1 {
            return None;
        }
        Some(PagerInfo {
            current_page: self.current_page,
            total_pages: projection.total_pages,
            has_previous: self.current_page > 1,
            has_next: self.current_page < projection.total_pages,
        })
    }

    fn compute_summary(&self, projection: &Projection<'_>) -> Option<String> {
        if projection.visible.is_empty() {
            return None;
        }
        let filtered = if projection.is_filtered { " filtered" } else { "" };
        Some(format!(
            "Page {} of {} • Showing {}-{} of {}{filtered} contacts",
            self.current_page,
            projection.total_pages,
            projection.first_index + 1,
            projection.last_index,
            projection.total_matching,
        ))
    }

    fn compute_empty_state(&self, projection: &Projection<'_>) -> Option<EmptyState> {
        if projection.total_matching > 0 || !projection.is_filtered {
            return None;
        }
        Some(EmptyState {
            message: format!("No contacts found matching \"{}\"", self.search_term),
            action_label: "Clear search".to_string(),
        })
    }

    /// Starts editing the card for `id`, prefilled with its current values.
    ///
    /// Returns `false` if no contact has that id.
    pub fn start_editing(&mut self, id: &ContactId) -> bool {
        let Some(contact) = self.contacts.get(id) else {
            return false;
        };
        self.card_mode = CardMode::Editing(EditDraft {
            id: contact.id.clone(),
            name: contact.name.clone(),
            city: contact.city.clone(),
        });
        true
    }
}
