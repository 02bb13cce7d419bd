//! Adapter implementations for milestone ports.

pub mod memory;
