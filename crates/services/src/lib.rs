#![forbid(unsafe_code)]

pub mod ambient_service;
pub mod error;
pub mod hosts;
pub mod narration_service;
pub mod navigation;
pub mod sessions;

pub use sadhana_core::Clock;

pub use ambient_service::{AmbientSoundService, TrackState};
pub use error::{AmbientError, NarrationError, SessionError};
pub use hosts::{
    AudioHandle, AudioHost, AudioHostError, CompletionHook, NarrationEvents, SpeechHost,
    SpeechHostError,
};
pub use narration_service::NarrationService;
pub use navigation::{
    ChannelNavigator, ConcludePayload, GuidePayload, NavigationRequest, Navigator,
    SessionPayload, create_navigation_channel,
};
pub use sessions::{SessionRuntime, SessionService, SessionState};
