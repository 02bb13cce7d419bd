//! User identity as seen by the task lifecycle engine.
//!
//! Registration, authentication and session issuance live outside this
//! crate. The engine only needs an explicit [`domain::Actor`] on every call
//! and a [`ports::UserDirectory`] to resolve user identifiers into display
//! profiles.

pub mod adapters;
pub mod domain;
pub mod ports;
