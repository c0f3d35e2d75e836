//! Event handling and state transition logic.
//!
//! [`handle_event`] is the only place where user interaction mutates [`AppState`].
//! It returns whether the view needs to be recomputed plus the side effects to run.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. The host turns user input into an [`Event`]
//! 2. [`handle_event`] pattern-matches the event and mutates state
//! 3. Side effects are collected as [`Action`]s
//! 4. The runtime executes the actions (persist, push query, copy link)
//!
//! # Event Types
//!
//! - **Mutation**: `AddContact`, `UpdateContact`, `DeleteContact`
//! - **Inline edit**: `StartEditing`, `EditName`, `EditCity`, `SaveEditing`, `CancelEditing`
//! - **View**: `SetSearchTerm`, `ClearSearch`, `SetSortField`, `ResetSorting`,
//!   `SetPage`, `NextPage`, `PreviousPage`
//! - **System**: `ApplyQuery`, `ContactsLoaded`, `Share`
//!
//! # Example
//!
//! ```rust
//! use contactbook::{handle_event, Action, AppState, Event};
//! use std::num::NonZeroUsize;
//!
//! let mut state = AppState::new(vec![], NonZeroUsize::new(9).unwrap());
//! let (should_render, actions) = handle_event(
//!     &mut state,
//!     &Event::AddContact { name: "Alice".into(), city: "Berlin".into() },
//! );
//! assert!(should_render);
//! assert_eq!(actions, vec![Action::PersistContacts]);
//! ```

use super::modes::CardMode;
use super::query::query_to_state;
use crate::app::{Action, AppState};
use crate::domain::{Contact, ContactId, SortField};

/// Events triggered by user input or by the host environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Submits the add-contact form.
    AddContact { name: String, city: String },

    /// Replaces name and city of an existing contact.
    UpdateContact {
        id: ContactId,
        name: String,
        city: String,
    },

    /// Deletes a contact.
    DeleteContact { id: ContactId },

    /// Switches a card into edit mode.
    StartEditing { id: ContactId },

    /// Updates the name input of the card being edited.
    EditName(String),

    /// Updates the city input of the card being edited.
    EditCity(String),

    /// Saves the card being edited. Invalid input keeps the card in edit mode.
    SaveEditing,

    /// Leaves edit mode without saving.
    CancelEditing,

    /// Replaces the search text.
    SetSearchTerm(String),

    /// Clears the search text.
    ClearSearch,

    /// Selects a sort field; selecting the active field flips direction.
    SetSortField(SortField),

    /// Returns to collection order.
    ResetSorting,

    /// Jumps to a 1-based page.
    SetPage(usize),

    /// Advances one page.
    NextPage,

    /// Goes back one page.
    PreviousPage,

    /// Adopts view parameters from a URL query string.
    ///
    /// Does not echo a `PushQuery` back; the query already reflects the state.
    ApplyQuery(String),

    /// Replaces the collection with contacts loaded from storage.
    ///
    /// Like `DeleteContact`, pulls the current page back if the list shrank below it.
    ContactsLoaded(Vec<Contact>),

    /// Requests a shareable link to the current view.
    Share,
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// # Returns
///
/// A tuple of `(should_render, actions)`. `should_render` is `false` when the event
/// changed nothing visible, e.g. a rejected add or a `NextPage` on the last page.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> (bool, Vec<Action>) {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::AddContact { name, city } => {
            if state.contacts.add(name, city).is_some() {
                (true, vec![Action::PersistContacts])
            } else {
                (false, vec![])
            }
        }
        Event::UpdateContact { id, name, city } => {
            if !state.contacts.update(id, name, city) {
                return (false, vec![]);
            }
            if state.card_mode.is_editing(id) {
                tracing::debug!(contact_id = %id, "refreshing draft of edited contact");
                state.start_editing(id);
            }
            (true, vec![Action::PersistContacts])
        }
        Event::DeleteContact { id } => {
            if !state.contacts.delete(id) {
                return (false, vec![]);
            }
            if state.card_mode.is_editing(id) {
                tracing::debug!(contact_id = %id, "deleted contact was being edited");
                state.card_mode = CardMode::Viewing;
            }

            let mut actions = vec![Action::PersistContacts];
            if state.clamp_page() {
                actions.push(Action::PushQuery(state.query()));
            }
            (true, actions)
        }
        Event::StartEditing { id } => {
            let started = state.start_editing(id);
            if !started {
                tracing::debug!(contact_id = %id, "cannot edit unknown contact");
            }
            (started, vec![])
        }
        Event::EditName(value) => match &mut state.card_mode {
            CardMode::Editing(draft) => {
                value.clone_into(&mut draft.name);
                (true, vec![])
            }
            CardMode::Viewing => (false, vec![]),
        },
        Event::EditCity(value) => match &mut state.card_mode {
            CardMode::Editing(draft) => {
                value.clone_into(&mut draft.city);
                (true, vec![])
            }
            CardMode::Viewing => (false, vec![]),
        },
        Event::SaveEditing => {
            let CardMode::Editing(draft) = &state.card_mode else {
                return (false, vec![]);
            };

            if draft.name.trim().is_empty() || draft.city.trim().is_empty() {
                tracing::debug!(contact_id = %draft.id, "edit not saved, empty name or city");
                return (false, vec![]);
            }

            let changed = state.contacts.update(&draft.id, &draft.name, &draft.city);
            state.card_mode = CardMode::Viewing;

            if changed {
                (true, vec![Action::PersistContacts])
            } else {
                (true, vec![])
            }
        }
        Event::CancelEditing => {
            let was_editing = matches!(state.card_mode, CardMode::Editing(_));
            state.card_mode = CardMode::Viewing;
            (was_editing, vec![])
        }
        Event::SetSearchTerm(term) => {
            if state.set_search_term(term) {
                tracing::trace!(query = %state.search_term, "search term updated");
                (true, vec![Action::PushQuery(state.query())])
            } else {
                (false, vec![])
            }
        }
        Event::ClearSearch => {
            if state.set_search_term("") {
                (true, vec![Action::PushQuery(state.query())])
            } else {
                (false, vec![])
            }
        }
        Event::SetSortField(field) => {
            state.set_sort_field(*field);
            tracing::debug!(sort = ?state.sort, "sort changed");
            (true, vec![Action::PushQuery(state.query())])
        }
        Event::ResetSorting => {
            if state.reset_sorting() {
                (true, vec![Action::PushQuery(state.query())])
            } else {
                (false, vec![])
            }
        }
        Event::SetPage(page) => {
            let moved = state.set_page(*page);
            page_changed(state, moved)
        }
        Event::NextPage => {
            let moved = state.next_page();
            page_changed(state, moved)
        }
        Event::PreviousPage => {
            let moved = state.previous_page();
            page_changed(state, moved)
        }
        Event::ApplyQuery(query) => {
            let params = query_to_state(query);
            if params == state.view_params() {
                tracing::debug!("query matches current view, nothing to apply");
                return (false, vec![]);
            }
            state.apply_view_params(params);
            tracing::debug!(
                sort = ?state.sort,
                page = state.current_page,
                "view parameters applied from query"
            );
            (true, vec![])
        }
        Event::ContactsLoaded(contacts) => {
            let before = state.contacts.clone();
            state.contacts.replace_all(contacts.clone());

            if let CardMode::Editing(draft) = &state.card_mode {
                if state.contacts.get(&draft.id).is_none() {
                    state.card_mode = CardMode::Viewing;
                }
            }

            let changed = state.contacts != before;
            tracing::debug!(count = state.contacts.len(), changed, "contacts loaded");

            if changed && state.clamp_page() {
                (true, vec![Action::PushQuery(state.query())])
            } else {
                (changed, vec![])
            }
        }
        Event::Share => {
            let query = state.query();
            tracing::debug!(query = %query, "share link requested");
            (false, vec![Action::CopyLink(query)])
        }
    }
}

fn page_changed(state: &AppState, moved: bool) -> (bool, Vec<Action>) {
    if moved {
        tracing::debug!(page = state.current_page, "page changed");
        (true, vec![Action::PushQuery(state.query())])
    } else {
        (false, vec![])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{SortDirection, SortSpec};
    use std::num::NonZeroUsize;

    fn state() -> AppState {
        AppState::new(
            vec![
                Contact::with_id("1", "Alice", "Mexico"),
                Contact::with_id("2", "Bob", "Glasgow"),
            ],
            NonZeroUsize::new(9).unwrap(),
        )
    }

    fn numbered(count: usize) -> AppState {
        let contacts = (1..=count)
            .map(|i| Contact::with_id(i.to_string(), format!("Name {i:02}"), "City"))
            .collect();
        AppState::new(contacts, NonZeroUsize::new(9).unwrap())
    }

    fn visible_names(state: &AppState) -> Vec<String> {
        state.projection().visible.iter().map(|c| c.name.clone()).collect()
    }

    #[test]
    fn sorts_by_name_ascending_by_default() {
        let state = state();
        assert_eq!(state.sort, Some(SortSpec::ascending(SortField::Name)));
        assert_eq!(visible_names(&state), ["Alice", "Bob"]);
    }

    #[test]
    fn selecting_active_sort_field_flips_direction() {
        let mut state = state();
        let (render, actions) = handle_event(&mut state, &Event::SetSortField(SortField::Name));

        assert!(render);
        assert_eq!(
            state.sort,
            Some(SortSpec::new(SortField::Name, SortDirection::Desc))
        );
        assert_eq!(visible_names(&state), ["Bob", "Alice"]);
        assert_eq!(
            actions,
            vec![Action::PushQuery("sort=name&dir=desc&sorting=true&page=1".to_string())]
        );
    }

    #[test]
    fn reset_sorting_clears_sort() {
        let mut state = state();
        handle_event(&mut state, &Event::ResetSorting);
        assert_eq!(state.sort, None);

        let (render, actions) = handle_event(&mut state, &Event::ResetSorting);
        assert!(!render);
        assert!(actions.is_empty());
    }

    #[test]
    fn rejected_add_leaves_collection_unchanged() {
        let mut state = state();
        let before = state.contacts.clone();
        let (render, actions) = handle_event(
            &mut state,
            &Event::AddContact { name: String::new(), city: "City".into() },
        );

        assert!(!render);
        assert!(actions.is_empty());
        assert_eq!(state.contacts, before);
    }

    #[test]
    fn mutations_request_persistence() {
        let mut state = state();
        let id = ContactId::from("1");

        let (_, actions) = handle_event(
            &mut state,
            &Event::UpdateContact { id: id.clone(), name: "Alicia".into(), city: "Lima".into() },
        );
        assert_eq!(actions, vec![Action::PersistContacts]);

        let (_, actions) = handle_event(&mut state, &Event::DeleteContact { id: id.clone() });
        assert_eq!(actions, vec![Action::PersistContacts]);

        let (render, actions) = handle_event(&mut state, &Event::DeleteContact { id });
        assert!(!render);
        assert!(actions.is_empty());
    }

    #[test]
    fn search_resets_page_and_pushes_query() {
        let mut state = numbered(30);
        handle_event(&mut state, &Event::SetPage(3));
        assert_eq!(state.current_page, 3);

        let (render, actions) = handle_event(&mut state, &Event::SetSearchTerm("name 1".into()));
        assert!(render);
        assert_eq!(state.current_page, 1);
        assert_eq!(
            actions,
            vec![Action::PushQuery(
                "search=name+1&sort=name&dir=asc&sorting=true&page=1".to_string()
            )]
        );
    }

    #[test]
    fn sort_change_resets_page() {
        let mut state = numbered(30);
        handle_event(&mut state, &Event::NextPage);
        assert_eq!(state.current_page, 2);

        handle_event(&mut state, &Event::SetSortField(SortField::City));
        assert_eq!(state.current_page, 1);
    }

    #[test]
    fn paging_stops_at_bounds() {
        let mut state = numbered(10);
        let (render, _) = handle_event(&mut state, &Event::PreviousPage);
        assert!(!render);

        handle_event(&mut state, &Event::NextPage);
        let (render, actions) = handle_event(&mut state, &Event::NextPage);
        assert!(!render);
        assert!(actions.is_empty());
        assert_eq!(state.current_page, 2);

        let (render, _) = handle_event(&mut state, &Event::SetPage(0));
        assert!(!render);
    }

    #[test]
    fn inline_edit_round_trip() {
        let mut state = state();
        let id = ContactId::from("2");

        handle_event(&mut state, &Event::StartEditing { id: id.clone() });
        handle_event(&mut state, &Event::EditName("  Robert ".into()));
        handle_event(&mut state, &Event::EditCity("Edinburgh".into()));
        let (render, actions) = handle_event(&mut state, &Event::SaveEditing);

        assert!(render);
        assert_eq!(actions, vec![Action::PersistContacts]);
        assert_eq!(state.card_mode, CardMode::Viewing);
        let updated = state.contacts.get(&id).unwrap();
        assert_eq!(updated.name, "Robert");
        assert_eq!(updated.city, "Edinburgh");
    }

    #[test]
    fn invalid_edit_stays_in_edit_mode() {
        let mut state = state();
        let id = ContactId::from("2");

        handle_event(&mut state, &Event::StartEditing { id: id.clone() });
        handle_event(&mut state, &Event::EditCity("   ".into()));
        let (render, actions) = handle_event(&mut state, &Event::SaveEditing);

        assert!(!render);
        assert!(actions.is_empty());
        assert!(state.card_mode.is_editing(&id));
        assert_eq!(state.contacts.get(&id).unwrap().city, "Glasgow");

        handle_event(&mut state, &Event::CancelEditing);
        assert_eq!(state.card_mode, CardMode::Viewing);
    }

    #[test]
    fn update_of_edited_card_refreshes_draft() {
        let mut state = state();
        let id = ContactId::from("2");

        handle_event(&mut state, &Event::StartEditing { id: id.clone() });
        handle_event(
            &mut state,
            &Event::UpdateContact { id: id.clone(), name: "Robert".into(), city: "Leeds".into() },
        );

        let draft = state.card_mode.draft_for(&id).unwrap();
        assert_eq!((draft.name.as_str(), draft.city.as_str()), ("Robert", "Leeds"));

        handle_event(&mut state, &Event::SaveEditing);
        let saved = state.contacts.get(&id).unwrap();
        assert_eq!((saved.name.as_str(), saved.city.as_str()), ("Robert", "Leeds"));
    }

    #[test]
    fn deleting_last_contact_on_final_page_moves_back() {
        let mut state = numbered(10);
        handle_event(&mut state, &Event::SetPage(2));
        let last_id = state.projection().visible[0].id.clone();

        let (render, actions) = handle_event(&mut state, &Event::DeleteContact { id: last_id });

        assert!(render);
        assert_eq!(state.current_page, 1);
        assert_eq!(
            actions,
            vec![
                Action::PersistContacts,
                Action::PushQuery("sort=name&dir=asc&sorting=true&page=1".to_string()),
            ]
        );
        let view = state.compute_viewmodel();
        assert_eq!(view.cards.len(), 9);
        assert!(view.summary.is_some());
    }

    #[test]
    fn shrinking_reload_moves_back_to_last_page() {
        let mut state = numbered(30);
        handle_event(&mut state, &Event::SetPage(4));

        let (render, actions) = handle_event(
            &mut state,
            &Event::ContactsLoaded(vec![Contact::with_id("1", "Alice", "Mexico")]),
        );

        assert!(render);
        assert_eq!(state.current_page, 1);
        assert_eq!(
            actions,
            vec![Action::PushQuery("sort=name&dir=asc&sorting=true&page=1".to_string())]
        );
    }

    #[test]
    fn deleting_edited_card_leaves_edit_mode() {
        let mut state = state();
        let id = ContactId::from("1");
        handle_event(&mut state, &Event::StartEditing { id: id.clone() });
        handle_event(&mut state, &Event::DeleteContact { id });
        assert_eq!(state.card_mode, CardMode::Viewing);
    }

    #[test]
    fn apply_query_adopts_page_without_echo() {
        let mut state = numbered(30);
        let (render, actions) = handle_event(
            &mut state,
            &Event::ApplyQuery("?search=name&sort=city&dir=desc&sorting=true&page=2".into()),
        );

        assert!(render);
        assert!(actions.is_empty());
        assert_eq!(state.search_term, "name");
        assert_eq!(state.current_page, 2);
        assert_eq!(
            state.sort,
            Some(SortSpec::new(SortField::City, SortDirection::Desc))
        );
    }

    #[test]
    fn share_copies_current_query() {
        let mut state = state();
        handle_event(&mut state, &Event::ResetSorting);
        let (render, actions) = handle_event(&mut state, &Event::Share);

        assert!(!render);
        assert_eq!(actions, vec![Action::CopyLink("sorting=false&page=1".to_string())]);
    }

    #[test]
    fn loading_contacts_replaces_collection() {
        let mut state = state();
        handle_event(&mut state, &Event::StartEditing { id: ContactId::from("1") });

        let (render, _) = handle_event(
            &mut state,
            &Event::ContactsLoaded(vec![Contact::with_id("9", "Zed", "Zagreb")]),
        );

        assert!(render);
        assert_eq!(state.contacts.len(), 1);
        assert_eq!(state.card_mode, CardMode::Viewing);
    }
}
