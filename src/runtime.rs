//! Runtime that owns state, storage and the host, and executes actions.
//!
//! [`ContactBook`] is what an embedding UI talks to. It feeds [`Event`]s through
//! [`handle_event`], then runs the returned [`Action`]s against the storage backend
//! and the [`Host`].
//!
//! # Example
//!
//! ```rust
//! use contactbook::runtime::{ContactBook, RecordingHost};
//! use contactbook::storage::MemoryStorage;
//! use contactbook::{Config, Event};
//!
//! let config = Config { seed_demo_data: false, ..Default::default() };
//! let mut book = ContactBook::open(&config, MemoryStorage::default(), RecordingHost::default())?;
//!
//! book.dispatch(Event::AddContact { name: "Alice".into(), city: "Berlin".into() })?;
//! book.dispatch(Event::Share)?;
//!
//! assert_eq!(book.view().cards.len(), 1);
//! assert_eq!(
//!     book.host().clipboard.as_deref(),
//!     Some("http://localhost:3000/?sort=name&dir=asc&sorting=true&page=1")
//! );
//! # Ok::<(), contactbook::ContactbookError>(())
//! ```

use crate::app::{handle_event, Action, AppState, ContactListView, Event};
use crate::domain::{demo_contacts, Result};
use crate::storage::ContactStorage;
use crate::Config;
use url::Url;

/// The environment the contact book is embedded in.
pub trait Host {
    /// Replaces the current location's query string with `query`.
    fn push_query(&mut self, query: &str);

    /// Places `text` on the clipboard.
    fn copy_to_clipboard(&mut self, text: &str);
}

/// Host that only remembers what it was asked to do.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingHost {
    /// Every pushed query, oldest first.
    pub queries: Vec<String>,

    /// Last copied text.
    pub clipboard: Option<String>,
}

impl Host for RecordingHost {
    fn push_query(&mut self, query: &str) {
        self.queries.push(query.to_string());
    }

    fn copy_to_clipboard(&mut self, text: &str) {
        self.clipboard = Some(text.to_string());
    }
}

/// A running contact book.
#[derive(Debug)]
pub struct ContactBook<S, H> {
    state: AppState,
    storage: S,
    host: H,
    share_base: Url,
}

impl<S: ContactStorage, H: Host> ContactBook<S, H> {
    /// Loads contacts from `storage` and starts with the default view.
    ///
    /// When storage is empty and `config.seed_demo_data` is set, the demo contacts
    /// are written to storage first.
    ///
    /// # Errors
    ///
    /// Returns an error if the share base URL is invalid or storage fails.
    pub fn open(config: &Config, mut storage: S, host: H) -> Result<Self> {
        let _span = tracing::debug_span!("open_contact_book").entered();

        let share_base = config.share_url()?;
        let mut contacts = storage.load_contacts()?;

        if contacts.is_empty() && config.seed_demo_data {
            contacts = demo_contacts();
            storage.save_contacts(&contacts)?;
            tracing::debug!(count = contacts.len(), "seeded demo contacts");
        }

        tracing::debug!(count = contacts.len(), "contact book opened");

        Ok(Self {
            state: AppState::new(contacts, config.page_size),
            storage,
            host,
            share_base,
        })
    }

    /// Handles one event and runs its actions.
    ///
    /// Returns whether the view should be re-rendered.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting the collection fails. The in-memory state
    /// already reflects the event at that point.
    pub fn dispatch(&mut self, event: Event) -> Result<bool> {
        let (should_render, actions) = handle_event(&mut self.state, &event);

        for action in actions {
            self.execute(action)?;
        }

        Ok(should_render)
    }

    /// Reloads contacts from storage, e.g. after another process changed the file.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be read.
    pub fn reload(&mut self) -> Result<bool> {
        let contacts = self.storage.load_contacts()?;
        self.dispatch(Event::ContactsLoaded(contacts))
    }

    /// Computes the view model for the current state.
    #[must_use]
    pub fn view(&self) -> ContactListView {
        self.state.compute_viewmodel()
    }

    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    #[must_use]
    pub const fn host(&self) -> &H {
        &self.host
    }

    /// Shareable link for the current view.
    #[must_use]
    pub fn share_link(&self) -> String {
        self.link_for(&self.state.query())
    }

    fn link_for(&self, query: &str) -> String {
        let mut link = self.share_base.clone();
        link.set_query(Some(query));
        link.into()
    }

    fn execute(&mut self, action: Action) -> Result<()> {
        tracing::trace!(?action, "executing action");
        match action {
            Action::PersistContacts => {
                self.storage.save_contacts(self.state.contacts.as_slice())?;
            }
            Action::PushQuery(query) => self.host.push_query(&query),
            Action::CopyLink(query) => {
                let link = self.link_for(&query);
                self.host.copy_to_clipboard(&link);
            }
        }
        Ok(())
    }
}
