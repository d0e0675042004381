//! Spoken narration of a practice's step guide.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::warn;

use sadhana_core::model::{GuideStep, narration_text};

use crate::error::NarrationError;
use crate::hosts::{NarrationEvents, SpeechHost};

/// Drives text-to-speech over guide steps and tracks whether anything is
/// currently being spoken.
///
/// The speaking flag is two-sided on purpose: a narration that finishes
/// naturally flips it back exactly the way a manual [`stop`](Self::stop)
/// does, so the screen's speak/stop affordance never needs a third state.
pub struct NarrationService {
    host: Arc<dyn SpeechHost>,
    rate: f32,
    speaking: Arc<AtomicBool>,
}

impl NarrationService {
    #[must_use]
    pub fn new(host: Arc<dyn SpeechHost>, rate: f32) -> Self {
        Self {
            host,
            rate,
            speaking: Arc::new(AtomicBool::new(false)),
        }
    }

    #[must_use]
    pub fn is_speaking(&self) -> bool {
        self.speaking.load(Ordering::SeqCst)
    }

    /// Concatenate the step detail texts, in order, and submit them as one
    /// utterance. A guide with no steps is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `NarrationError::Host` when the synthesizer rejects the
    /// request; the speaking flag is left cleared.
    pub fn speak(&self, steps: &[GuideStep]) -> Result<(), NarrationError> {
        if steps.is_empty() {
            return Ok(());
        }
        let text = narration_text(steps);

        let started = Arc::clone(&self.speaking);
        let done = Arc::clone(&self.speaking);
        let events = NarrationEvents {
            on_start: Box::new(move || started.store(true, Ordering::SeqCst)),
            on_done: Box::new(move || done.store(false, Ordering::SeqCst)),
        };

        if let Err(err) = self.host.speak(&text, self.rate, events) {
            self.speaking.store(false, Ordering::SeqCst);
            return Err(err.into());
        }
        Ok(())
    }

    /// Cancel any in-flight narration. Calling with nothing speaking is a
    /// no-op; a host rejection is logged and the flag is cleared anyway.
    pub fn stop(&self) {
        if !self.speaking.swap(false, Ordering::SeqCst) {
            return;
        }
        if let Err(err) = self.host.stop() {
            warn!(error = %err, "failed to cancel narration");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hosts::SpeechHostError;
    use sadhana_core::model::GuideStep;
    use std::sync::Mutex;
    use std::sync::atomic::AtomicUsize;

    #[derive(Default)]
    struct FakeSpeech {
        spoken: Mutex<Vec<(String, String)>>,
        stops: AtomicUsize,
        fail_speak: AtomicBool,
        events: Mutex<Option<NarrationEvents>>,
    }

    impl FakeSpeech {
        fn fire_start(&self) {
            if let Some(events) = self.events.lock().unwrap().as_ref() {
                (events.on_start)();
            }
        }

        fn fire_done(&self) {
            if let Some(events) = self.events.lock().unwrap().as_ref() {
                (events.on_done)();
            }
        }
    }

    impl SpeechHost for FakeSpeech {
        fn speak(
            &self,
            text: &str,
            rate: f32,
            events: NarrationEvents,
        ) -> Result<(), SpeechHostError> {
            if self.fail_speak.load(Ordering::SeqCst) {
                return Err(SpeechHostError::Synthesis {
                    reason: "voice unavailable".into(),
                });
            }
            self.spoken
                .lock()
                .unwrap()
                .push((text.to_string(), format!("{rate}")));
            *self.events.lock().unwrap() = Some(events);
            Ok(())
        }

        fn stop(&self) -> Result<(), SpeechHostError> {
            self.stops.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    const STEPS: [GuideStep; 2] = [
        GuideStep::new("Settle", "Sit comfortably."),
        GuideStep::new("Breathe", "Follow the breath."),
    ];

    fn service() -> (Arc<FakeSpeech>, NarrationService) {
        let host = Arc::new(FakeSpeech::default());
        let narration = NarrationService::new(Arc::clone(&host) as Arc<dyn SpeechHost>, 0.9);
        (host, narration)
    }

    #[test]
    fn speak_submits_one_concatenated_utterance() {
        let (host, narration) = service();
        narration.speak(&STEPS).unwrap();

        let spoken = host.spoken.lock().unwrap();
        assert_eq!(spoken.len(), 1);
        assert_eq!(spoken[0].0, "Sit comfortably. Follow the breath.");
        assert_eq!(spoken[0].1, "0.9");
    }

    #[test]
    fn speaking_flag_follows_start_and_done() {
        let (host, narration) = service();
        narration.speak(&STEPS).unwrap();
        assert!(!narration.is_speaking());

        host.fire_start();
        assert!(narration.is_speaking());

        host.fire_done();
        assert!(!narration.is_speaking());
    }

    #[test]
    fn manual_stop_matches_natural_finish() {
        let (host, narration) = service();
        narration.speak(&STEPS).unwrap();
        host.fire_start();

        narration.stop();
        assert!(!narration.is_speaking());
        assert_eq!(host.stops.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn stop_when_idle_is_a_no_op() {
        let (host, narration) = service();
        narration.stop();
        assert_eq!(host.stops.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn empty_guide_is_not_submitted() {
        let (host, narration) = service();
        narration.speak(&[]).unwrap();
        assert!(host.spoken.lock().unwrap().is_empty());
    }

    #[test]
    fn rejected_speak_leaves_flag_cleared() {
        let (host, narration) = service();
        host.fail_speak.store(true, Ordering::SeqCst);

        let err = narration.speak(&STEPS).unwrap_err();
        assert!(matches!(err, NarrationError::Host(_)));
        assert!(!narration.is_speaking());
    }
}
