//! Host-capability seams.
//!
//! Audio output and speech synthesis are platform services; the session
//! code talks to them through these traits so every service in this crate
//! can be exercised with in-memory fakes. Production implementations live
//! in the `app` crate.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use sadhana_core::model::AmbientTrack;

#[derive(Debug, Error, Clone)]
#[non_exhaustive]
pub enum AudioHostError {
    #[error("could not load ambient track {track}: {reason}")]
    Load { track: AmbientTrack, reason: String },
    #[error("audio control failed: {reason}")]
    Control { reason: String },
}

#[derive(Debug, Error, Clone)]
#[non_exhaustive]
pub enum SpeechHostError {
    #[error("speech synthesis failed: {reason}")]
    Synthesis { reason: String },
}

/// Hook fired once when a handle's playback finishes naturally. Each play
/// consumes the armed hook; looping re-arms a fresh one.
pub type CompletionHook = Box<dyn FnOnce() + Send + 'static>;

/// A loaded, playable ambient loop.
///
/// `play` always restarts from the beginning of the loop file. Both calls
/// must be non-blocking; the ambient service invokes them while holding a
/// per-track lock.
pub trait AudioHandle: Send + Sync {
    /// Start playback from the start of the loop.
    ///
    /// # Errors
    ///
    /// Returns `AudioHostError::Control` when the backend rejects playback.
    fn play(&self) -> Result<(), AudioHostError>;

    /// Stop playback.
    ///
    /// # Errors
    ///
    /// Returns `AudioHostError::Control` when the backend rejects the stop.
    fn stop(&self) -> Result<(), AudioHostError>;

    /// Arm a completion hook for the current playback.
    fn on_completion(&self, hook: CompletionHook);
}

/// Creates playable handles for ambient tracks.
#[async_trait]
pub trait AudioHost: Send + Sync {
    /// Load one track's asset and return a handle for it.
    ///
    /// # Errors
    ///
    /// Returns `AudioHostError::Load` when the asset cannot be opened or
    /// decoded.
    async fn load(&self, track: AmbientTrack) -> Result<Arc<dyn AudioHandle>, AudioHostError>;
}

/// State-change callbacks for one narration request.
pub struct NarrationEvents {
    pub on_start: Box<dyn Fn() + Send + Sync>,
    pub on_done: Box<dyn Fn() + Send + Sync>,
}

/// Text-to-speech backend.
pub trait SpeechHost: Send + Sync {
    /// Submit one utterance at the given rate. `events.on_start` fires when
    /// speech begins, `events.on_done` when it finishes naturally.
    ///
    /// # Errors
    ///
    /// Returns `SpeechHostError` when the synthesizer rejects the request.
    fn speak(&self, text: &str, rate: f32, events: NarrationEvents) -> Result<(), SpeechHostError>;

    /// Cancel any in-flight utterance.
    ///
    /// # Errors
    ///
    /// Returns `SpeechHostError` when cancellation fails.
    fn stop(&self) -> Result<(), SpeechHostError>;
}
