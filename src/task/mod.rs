//! Task lifecycle engine.
//!
//! Tasks move between `pending`, `inProgress`, `completed` and `approved`
//! under the control of two actors: the assigner who created the task and
//! the receiver responsible for it. Transitions are gated by who the actor
//! is, not by the current status. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
