//! Presentation observers.
//!
//! # Responsibility
//! - Derive one view artifact per published snapshot.
//! - Keep the last artifact available to the front end.
//!
//! # Invariants
//! - Views share no state with each other or with the store.
//! - Views never fail an update.

pub mod list_view;
pub mod share_view;
pub mod summary_view;
