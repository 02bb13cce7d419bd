//! Unit tests for the milestone module.
