//! Message template engine for the AFUED portal.
//!
//! Templates are free-text bodies (one per delivery channel) containing
//! `{{variable}}` placeholders. This crate provides the variable
//! registry, placeholder extraction and validation, the substitution
//! engine used at send time, the editing session state machine, and the
//! asynchronous boundary to the template store.

// Supporting modules
pub mod config;

// Engine
pub mod editor;
pub mod registry;
pub mod template;

// Persistence boundary
pub mod store;
