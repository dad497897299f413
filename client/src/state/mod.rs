//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by domain (`gallery`, `upload`) so the form and the
//! gallery can react to each other without sharing one monolithic model.

pub mod gallery;
pub mod upload;
