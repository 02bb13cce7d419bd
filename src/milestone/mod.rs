//! Organisation-wide milestone notes.
//!
//! Milestones are flat records with no lifecycle. Only staff may post them;
//! anyone may list them.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
