use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use sadhana_core::Clock;
use sadhana_core::model::{AmbientTrack, SessionSummary};

use crate::ambient_service::{AmbientSoundService, TrackState};
use crate::error::{AmbientError, NarrationError, SessionError};
use crate::hosts::{AudioHost, SpeechHost};
use crate::narration_service::NarrationService;
use crate::navigation::{ConcludePayload, NavigationRequest, Navigator, SessionPayload};
use crate::sessions::SessionService;

/// Orchestrates one session at a time over the host collaborators: ambient
/// sound, narration, and navigation.
///
/// The loaded sound handles belong to the session being run; `conclude`
/// and `tear_down` always release them, so nothing keeps playing after the
/// screen is gone.
pub struct SessionRuntime {
    clock: Clock,
    ambient: AmbientSoundService,
    narration: NarrationService,
    navigator: Arc<dyn Navigator>,
}

impl SessionRuntime {
    #[must_use]
    pub fn new(
        clock: Clock,
        audio_host: Arc<dyn AudioHost>,
        speech_host: Arc<dyn SpeechHost>,
        navigator: Arc<dyn Navigator>,
        narration_rate: f32,
    ) -> Self {
        Self {
            clock,
            ambient: AmbientSoundService::new(audio_host),
            narration: NarrationService::new(speech_host, narration_rate),
            navigator,
        }
    }

    /// Start a session for the given entry payload and load the ambient
    /// assets. Toggles issued before loading finishes are rejected by the
    /// ambient service, never crashed on.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` when the payload cannot start a session
    /// (blank title, missing proficiency for a tiered practice).
    pub async fn start_session(
        &self,
        payload: &SessionPayload,
    ) -> Result<SessionService, SessionError> {
        let session =
            SessionService::start(&payload.title, payload.proficiency, self.clock.now())?;
        self.ambient.load_all().await;
        Ok(session)
    }

    /// Flip one ambient track between playing and silent.
    ///
    /// # Errors
    ///
    /// Returns `AmbientError::NotLoaded` for a track with no usable handle.
    pub fn toggle_sound(&self, track: AmbientTrack) -> Result<TrackState, AmbientError> {
        self.ambient.toggle(track)
    }

    #[must_use]
    pub fn sound_state(&self, track: AmbientTrack) -> TrackState {
        self.ambient.state(track)
    }

    #[must_use]
    pub fn active_sounds(&self) -> Vec<AmbientTrack> {
        self.ambient.active_tracks()
    }

    /// Start narrating the session's guide, or stop the narration already
    /// in flight. Returns whether narration is running afterwards.
    ///
    /// # Errors
    ///
    /// Returns `NarrationError::Host` when the synthesizer rejects a new
    /// utterance.
    pub fn toggle_narration(&self, session: &SessionService) -> Result<bool, NarrationError> {
        if self.narration.is_speaking() {
            self.narration.stop();
            return Ok(false);
        }
        let steps = session.practice().steps();
        if steps.is_empty() {
            return Ok(false);
        }
        self.narration.speak(steps)?;
        Ok(true)
    }

    #[must_use]
    pub fn is_narrating(&self) -> bool {
        self.narration.is_speaking()
    }

    /// Feed the widget's elapsed-time callback into the session.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Concluded` for ticks arriving after the
    /// session froze.
    pub fn record_tick(
        &self,
        session: &mut SessionService,
        elapsed: Duration,
    ) -> Result<(), SessionError> {
        session.record_tick(elapsed)
    }

    /// Conclude the session. In order: stop all ambient sound, stop any
    /// narration, freeze the session, then hand the summary to the
    /// navigation collaborator (pop to root, push summary). The stop steps
    /// are best-effort; conclusion always completes.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Concluded` when the session already left
    /// `Active`; the hand-off is not repeated.
    pub fn conclude(&self, session: &mut SessionService) -> Result<SessionSummary, SessionError> {
        session.begin_concluding()?;

        self.ambient.stop_all();
        self.narration.stop();

        let summary = session.finish_concluding(self.clock.now())?;
        self.navigator
            .navigate(NavigationRequest::Conclude(ConcludePayload {
                summary: summary.clone(),
            }));
        Ok(summary)
    }

    /// Cleanup hook for leaving the session screen without concluding
    /// (abnormal navigation away). Releases every audio and speech side
    /// effect and freezes the session; no navigation is issued.
    pub fn tear_down(&self, session: &mut SessionService) {
        self.ambient.stop_all();
        self.narration.stop();

        if session.is_active() && session.begin_concluding().is_ok() {
            if let Err(err) = session.finish_concluding(self.clock.now()) {
                warn!(error = %err, "session teardown could not freeze the session");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hosts::{
        AudioHandle, AudioHostError, CompletionHook, NarrationEvents, SpeechHostError,
    };
    use async_trait::async_trait;
    use sadhana_core::model::Proficiency;
    use sadhana_core::time::fixed_clock;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Shared call journal so tests can assert cross-collaborator ordering.
    type Journal = Arc<Mutex<Vec<&'static str>>>;

    struct JournalingHandle {
        journal: Journal,
        fail_stop: bool,
    }

    impl AudioHandle for JournalingHandle {
        fn play(&self) -> Result<(), AudioHostError> {
            self.journal.lock().unwrap().push("audio.play");
            Ok(())
        }

        fn stop(&self) -> Result<(), AudioHostError> {
            self.journal.lock().unwrap().push("audio.stop");
            if self.fail_stop {
                return Err(AudioHostError::Control {
                    reason: "stop rejected".into(),
                });
            }
            Ok(())
        }

        fn on_completion(&self, _hook: CompletionHook) {}
    }

    struct JournalingAudioHost {
        journal: Journal,
        fail_stop: bool,
    }

    #[async_trait]
    impl AudioHost for JournalingAudioHost {
        async fn load(
            &self,
            _track: AmbientTrack,
        ) -> Result<Arc<dyn AudioHandle>, AudioHostError> {
            Ok(Arc::new(JournalingHandle {
                journal: Arc::clone(&self.journal),
                fail_stop: self.fail_stop,
            }))
        }
    }

    struct JournalingSpeechHost {
        journal: Journal,
        fail_stop: bool,
    }

    impl SpeechHost for JournalingSpeechHost {
        fn speak(
            &self,
            _text: &str,
            _rate: f32,
            events: NarrationEvents,
        ) -> Result<(), SpeechHostError> {
            self.journal.lock().unwrap().push("speech.speak");
            (events.on_start)();
            Ok(())
        }

        fn stop(&self) -> Result<(), SpeechHostError> {
            self.journal.lock().unwrap().push("speech.stop");
            if self.fail_stop {
                return Err(SpeechHostError::Synthesis {
                    reason: "stop rejected".into(),
                });
            }
            Ok(())
        }
    }

    struct JournalingNavigator {
        journal: Journal,
        requests: Mutex<Vec<NavigationRequest>>,
    }

    impl Navigator for JournalingNavigator {
        fn navigate(&self, request: NavigationRequest) {
            self.journal.lock().unwrap().push("navigate");
            self.requests.lock().unwrap().push(request);
        }
    }

    struct Fixture {
        journal: Journal,
        navigator: Arc<JournalingNavigator>,
        runtime: SessionRuntime,
    }

    fn fixture(fail_stops: bool) -> Fixture {
        let journal: Journal = Arc::new(Mutex::new(Vec::new()));
        let navigator = Arc::new(JournalingNavigator {
            journal: Arc::clone(&journal),
            requests: Mutex::new(Vec::new()),
        });
        let runtime = SessionRuntime::new(
            fixed_clock(),
            Arc::new(JournalingAudioHost {
                journal: Arc::clone(&journal),
                fail_stop: fail_stops,
            }),
            Arc::new(JournalingSpeechHost {
                journal: Arc::clone(&journal),
                fail_stop: fail_stops,
            }),
            Arc::clone(&navigator) as Arc<dyn Navigator>,
            0.9,
        );
        Fixture {
            journal,
            navigator,
            runtime,
        }
    }

    fn payload(title: &str, proficiency: Option<Proficiency>) -> SessionPayload {
        SessionPayload {
            title: title.into(),
            proficiency,
        }
    }

    #[tokio::test]
    async fn conclude_orders_stops_before_navigation() {
        let fx = fixture(false);
        let mut session = fx
            .runtime
            .start_session(&payload("Breath", None))
            .await
            .unwrap();
        fx.runtime.toggle_sound(AmbientTrack::Rain).unwrap();
        fx.runtime.toggle_narration(&session).unwrap();
        fx.runtime
            .record_tick(&mut session, Duration::from_secs(42))
            .unwrap();

        let summary = fx.runtime.conclude(&mut session).unwrap();

        assert_eq!(summary.practice_title(), "Breath");
        assert_eq!(summary.elapsed(), Duration::from_secs(42));

        let journal = fx.journal.lock().unwrap();
        let stop_audio = journal.iter().position(|e| *e == "audio.stop").unwrap();
        let stop_speech = journal.iter().position(|e| *e == "speech.stop").unwrap();
        let navigate = journal.iter().position(|e| *e == "navigate").unwrap();
        assert!(stop_audio < stop_speech);
        assert!(stop_speech < navigate);
    }

    #[tokio::test]
    async fn conclude_completes_even_when_stops_fail() {
        let fx = fixture(true);
        let mut session = fx
            .runtime
            .start_session(&payload("Breath", None))
            .await
            .unwrap();
        fx.runtime.toggle_sound(AmbientTrack::Waves).unwrap();
        fx.runtime.toggle_narration(&session).unwrap();
        fx.runtime
            .record_tick(&mut session, Duration::from_secs(7))
            .unwrap();

        let summary = fx.runtime.conclude(&mut session).unwrap();

        assert!(!session.is_active());
        let requests = fx.navigator.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        match &requests[0] {
            NavigationRequest::Conclude(concluded) => {
                assert_eq!(concluded.summary.practice_title(), "Breath");
                assert_eq!(concluded.summary.elapsed(), Duration::from_secs(7));
                assert_eq!(concluded.summary, summary);
            }
            other => panic!("unexpected request: {other:?}"),
        }
    }

    #[tokio::test]
    async fn conclude_twice_hands_off_once() {
        let fx = fixture(false);
        let mut session = fx
            .runtime
            .start_session(&payload("Breath", None))
            .await
            .unwrap();

        fx.runtime.conclude(&mut session).unwrap();
        assert!(matches!(
            fx.runtime.conclude(&mut session),
            Err(SessionError::Concluded)
        ));
        assert_eq!(fx.navigator.requests.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn conclude_silences_active_sounds() {
        let fx = fixture(false);
        let mut session = fx
            .runtime
            .start_session(&payload("Metta", Some(Proficiency::Beginner)))
            .await
            .unwrap();
        fx.runtime.toggle_sound(AmbientTrack::Campfire).unwrap();
        fx.runtime.toggle_sound(AmbientTrack::Night).unwrap();

        fx.runtime.conclude(&mut session).unwrap();

        assert!(fx.runtime.active_sounds().is_empty());
        assert!(matches!(
            fx.runtime.toggle_sound(AmbientTrack::Campfire),
            Err(AmbientError::NotLoaded { .. })
        ));
    }

    #[tokio::test]
    async fn narration_toggle_flips_between_speak_and_stop() {
        let fx = fixture(false);
        let session = fx
            .runtime
            .start_session(&payload("Breath", None))
            .await
            .unwrap();

        assert!(fx.runtime.toggle_narration(&session).unwrap());
        assert!(fx.runtime.is_narrating());
        assert!(!fx.runtime.toggle_narration(&session).unwrap());
        assert!(!fx.runtime.is_narrating());
    }

    #[tokio::test]
    async fn tear_down_releases_side_effects_without_navigating() {
        let fx = fixture(false);
        let mut session = fx
            .runtime
            .start_session(&payload("Breath", None))
            .await
            .unwrap();
        fx.runtime.toggle_sound(AmbientTrack::Rain).unwrap();
        fx.runtime.toggle_narration(&session).unwrap();

        fx.runtime.tear_down(&mut session);

        assert!(!session.is_active());
        assert!(fx.runtime.active_sounds().is_empty());
        assert!(!fx.runtime.is_narrating());
        assert!(fx.navigator.requests.lock().unwrap().is_empty());
    }
}
