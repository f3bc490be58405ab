//! Domain logic for track shares.
//!
//! Pure validation and payload handling with no I/O, shared by the store
//! and API crates.

pub mod error;
pub mod share;
pub mod track;
