//! Protocol types and messages.

mod messages;
mod types;

pub use messages::{RoundFeedback, SessionSnapshot};
pub use types::{Outcome, RoundRecord, Selection, SessionId, SoundKey};
