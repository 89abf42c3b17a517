//! Progression systems

pub mod messages;
pub mod tracker;

pub use messages::{MessageQueue, TimedMessage};
pub use tracker::{ProgressionEvent, ProgressionState, ProgressionTracker};
pub use tracker::{BANNER_DURATION, UNLOCK_MESSAGE_DURATION};
