//! Emotion source adapters.

mod scripted;
mod simulated;

pub use scripted::ScriptedEmotionSource;
pub use simulated::SimulatedEmotionSource;
