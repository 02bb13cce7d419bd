//! Taskflow: task lifecycle engine for assigner/receiver workflows.
//!
//! This crate owns the rules for how a task moves between `pending`,
//! `inProgress`, `completed` and `approved`, who may trigger each move, and
//! how reassignment and commenting interact with the lifecycle. Persistence,
//! identity lookup and time are consumed through ports so the engine can be
//! embedded behind any transport.
//!
//! # Architecture
//!
//! Taskflow follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory stores)
//!
//! # Modules
//!
//! - [`task`]: Task state machine, authorization guard and comments
//! - [`milestone`]: Staff-posted milestone notes
//! - [`identity`]: Actors, roles and the user directory port
//! - [`config`]: Layered engine configuration
//! - [`error`]: Transport-agnostic error classification

pub mod config;
pub mod error;
pub mod identity;
pub mod milestone;
pub mod task;
