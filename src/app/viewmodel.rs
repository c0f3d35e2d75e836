//! View model types representing renderable contact list state.
//!
//! View models are computed by [`AppState::compute_viewmodel`](crate::AppState::compute_viewmodel)
//! and hold only display-ready data: which cards to draw, what the pager offers,
//! which sort buttons are lit. A host renders them however it likes.

use super::modes::EditDraft;
use crate::domain::{ContactId, SortDirection};

/// Complete view model for the contact list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactListView {
    /// Cards on the current page, in display order.
    pub cards: Vec<ContactCard>,

    /// Search input state.
    pub search_bar: SearchBarInfo,

    /// Sort button state.
    pub sort_controls: SortControls,

    /// Pager, present only when there is more than one page.
    pub pager: Option<PagerInfo>,

    /// Summary line, e.g. `Page 1 of 3 • Showing 1-9 of 27 contacts`.
    ///
    /// `None` when the current page shows nothing.
    pub summary: Option<String>,

    /// Message shown when a search matches nothing.
    pub empty_state: Option<EmptyState>,
}

/// A single contact card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactCard {
    pub id: ContactId,
    pub name: String,
    pub city: String,

    /// Input values when this card is in edit mode.
    pub draft: Option<EditDraft>,
}

/// Search input display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    /// Current search text.
    pub query: String,

    /// Whether the inline clear button is shown.
    pub show_clear: bool,
}

/// Sort button display information.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortControls {
    /// Direction marker for the name button, `None` when inactive.
    pub name: Option<SortDirection>,

    /// Direction marker for the city button, `None` when inactive.
    pub city: Option<SortDirection>,

    /// Whether the reset button is highlighted (list unsorted).
    pub reset_active: bool,
}

/// Pager display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagerInfo {
    pub current_page: usize,
    pub total_pages: usize,
    pub has_previous: bool,
    pub has_next: bool,
}

impl PagerInfo {
    /// Page numbers to show as buttons, `1..=total_pages`.
    pub fn page_numbers(&self) -> impl Iterator<Item = usize> {
        1..=self.total_pages
    }
}

/// Empty search result display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    /// Primary message, e.g. `No contacts found matching "zzz"`.
    pub message: String,

    /// Label of the button that clears the search.
    pub action_label: String,
}
