//! Feedback events for audio and animation consumers.

mod dispatcher;

pub use dispatcher::{FeedbackDispatcher, FeedbackEvent, PlaybackFailure};
