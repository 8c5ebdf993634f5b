//! Client side of codenote.
//!
//! - [`store`]: the [`NoteStore`](store::NoteStore) seam with HTTP and
//!   in-memory implementations.
//! - [`editor`]: the edit buffer and debounced autosave controller.
//! - [`home`] and [`access`]: the list view and the code-entry gate.
//! - [`identity`]: the anonymous owner id persisted per client profile.
//! - [`notify`]: transient success/error toasts.
//! - [`route`]: client-side navigation targets.

pub mod access;
pub mod buffer;
pub mod config;
pub mod debounce;
pub mod editor;
pub mod error;
pub mod home;
pub mod identity;
pub mod model;
pub mod notify;
pub mod route;
pub mod store;

pub use error::ClientError;
pub use store::{NoteStore, SharedStore};
