//! Networking modules for the image REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` handles the HTTP calls, `types` defines the shared wire schema.

pub mod api;
pub mod types;
