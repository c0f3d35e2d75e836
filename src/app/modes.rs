//! Card interaction mode.
//!
//! Each contact card is either shown read-only or being edited inline. Only one card
//! can be in edit mode at a time, so the mode lives on the application state rather
//! than on each card.
//!
//! # State Machine
//!
//! ```text
//!            StartEditing { id }
//! Viewing ───────────────────────► Editing { id, draft }
//!    ▲                                   │
//!    └── SaveEditing (valid) ────────────┤
//!    └── CancelEditing ──────────────────┤
//!    └── DeleteContact { id } ───────────┘
//! ```

use crate::domain::ContactId;

/// Draft values of the card being edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDraft {
    /// Contact being edited.
    pub id: ContactId,
    /// Current value of the name input, untrimmed.
    pub name: String,
    /// Current value of the city input, untrimmed.
    pub city: String,
}

/// Whether a card is being edited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CardMode {
    /// All cards are read-only.
    #[default]
    Viewing,

    /// One card shows inputs prefilled with its values.
    Editing(EditDraft),
}

impl CardMode {
    /// Returns the draft if the card with `id` is being edited.
    #[must_use]
    pub fn draft_for(&self, id: &ContactId) -> Option<&EditDraft> {
        match self {
            Self::Editing(draft) if &draft.id == id => Some(draft),
            _ => None,
        }
    }

    /// Returns `true` if the card with `id` is being edited.
    #[must_use]
    pub fn is_editing(&self, id: &ContactId) -> bool {
        self.draft_for(id).is_some()
    }
}
