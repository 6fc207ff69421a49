//! Audio playback abstraction.

mod log;
mod mock;
mod traits;

pub use log::LogAudio;
pub use mock::MockAudio;
pub use traits::{AudioBackend, PlaybackError};
