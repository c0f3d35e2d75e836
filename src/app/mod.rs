//! Application layer coordinating state, events, and actions.
//!
//! Sits between the host (through [`ContactBook`](crate::runtime::ContactBook)) and
//! the domain and storage layers.
//!
//! # Architecture
//!
//! ```text
//! User Input → Events → Event Handler → State Mutations → Actions → Side Effects
//!                           ↑                                  ↓
//!                           └──────── Loaded Contacts ─────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`modes`]: Card edit mode
//! - [`query`]: Pure mapping between view parameters and query strings
//! - [`state`]: Central application state container and view model computation
//! - [`viewmodel`]: Display-ready view model types
//!
//! # Example
//!
//! ```rust
//! use contactbook::app::{handle_event, AppState, Event};
//! use std::num::NonZeroUsize;
//!
//! let mut state = AppState::new(vec![], NonZeroUsize::new(9).unwrap());
//! let (should_render, actions) = handle_event(&mut state, &Event::NextPage);
//! assert!(!should_render);
//! assert!(actions.is_empty());
//! ```

pub mod actions;
pub mod handler;
pub mod modes;
pub mod query;
pub mod state;
pub mod viewmodel;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::{CardMode, EditDraft};
pub use query::{query_to_state, state_to_query, ViewParams};
pub use state::AppState;
pub use viewmodel::{ContactCard, ContactListView, EmptyState, PagerInfo, SearchBarInfo, SortControls};
