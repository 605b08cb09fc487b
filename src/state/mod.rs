//! State - Catalog State Modules
//!
//! Plain state records mutated only through their merge functions, so a UI
//! layer can decide what to re-render from the slice a merge reports.

pub mod catalog_state;

pub use catalog_state::*;
