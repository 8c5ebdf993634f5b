//! Domain types shared by the codenote server and client.
//!
//! Nothing in this crate performs I/O: it holds the access-code and owner
//! identifiers, note field validation, the write conflict policy and the
//! common error type.

pub mod conflict;
pub mod error;
pub mod note_code;
pub mod notes;
pub mod owner;
pub mod types;
