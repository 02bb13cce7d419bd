//! Application services for milestones.

mod board;

pub use board::{MilestoneService, MilestoneServiceError, MilestoneView};
