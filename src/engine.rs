//! Audio engine: a dedicated thread owning the rodio output stream.
//!
//! Exclusivity means at most one track ever plays, so the engine holds at
//! most one sink and swaps it on demand.

mod handle;
mod sink;
mod thread;
mod types;

pub use handle::AudioEngine;
pub use types::{EngineCmd, EngineEvent, ProgressHandle, ProgressInfo};
