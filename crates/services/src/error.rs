//! Shared error types for the services crate.

use thiserror::Error;

use sadhana_core::model::{AmbientTrack, SessionSummaryError};
use sadhana_core::timing::TimingError;

use crate::hosts::{AudioHostError, SpeechHostError};

/// Errors emitted by `AmbientSoundService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AmbientError {
    /// A toggle arrived for a track whose handle is not loaded, either
    /// because loading has not finished or because it failed for good.
    #[error("ambient track {track} is not loaded")]
    NotLoaded { track: AmbientTrack },
    #[error(transparent)]
    Host(#[from] AudioHostError),
}

/// Errors emitted by `NarrationService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum NarrationError {
    #[error(transparent)]
    Host(#[from] SpeechHostError),
}

/// Errors emitted by session services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("session requires a practice title")]
    EmptyTitle,
    #[error("session is already concluded")]
    Concluded,
    #[error(transparent)]
    Timing(#[from] TimingError),
    #[error(transparent)]
    Summary(#[from] SessionSummaryError),
}
