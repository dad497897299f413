//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render individual gallery pieces while the page owns fetching
//! and shared state.

pub mod record_card;
