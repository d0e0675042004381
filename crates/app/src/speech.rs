//! Guide narration over the system text-to-speech engine.
//!
//! The engine is optional: if it fails to initialize (headless machines,
//! missing speech services), narration requests are rejected and the rest
//! of the app keeps working. Natural-finish detection polls the engine,
//! since not every backend delivers utterance callbacks.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tracing::warn;

use services::{NarrationEvents, SpeechHost, SpeechHostError};

const FINISH_POLL_INTERVAL: Duration = Duration::from_millis(200);

pub struct TtsSpeechHost {
    engine: Arc<Mutex<Option<tts::Tts>>>,
}

impl TtsSpeechHost {
    #[must_use]
    pub fn new() -> Self {
        let engine = match tts::Tts::default() {
            Ok(engine) => Some(engine),
            Err(err) => {
                warn!(error = %err, "text-to-speech unavailable; narration disabled");
                None
            }
        };
        Self {
            engine: Arc::new(Mutex::new(engine)),
        }
    }

    fn lock_engine(&self) -> MutexGuard<'_, Option<tts::Tts>> {
        self.engine.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for TtsSpeechHost {
    fn default() -> Self {
        Self::new()
    }
}

impl SpeechHost for TtsSpeechHost {
    fn speak(&self, text: &str, rate: f32, events: NarrationEvents) -> Result<(), SpeechHostError> {
        {
            let mut guard = self.lock_engine();
            let Some(engine) = guard.as_mut() else {
                return Err(SpeechHostError::Synthesis {
                    reason: "speech engine unavailable".into(),
                });
            };

            // `rate` is a multiplier on the engine's normal rate, kept
            // inside the backend's supported range.
            let scaled = (engine.normal_rate() * rate)
                .clamp(engine.min_rate(), engine.max_rate());
            if let Err(err) = engine.set_rate(scaled) {
                warn!(error = %err, "could not set narration rate");
            }

            engine
                .speak(text, true)
                .map_err(|err| SpeechHostError::Synthesis {
                    reason: err.to_string(),
                })?;
        }
        (events.on_start)();

        // Watch for the natural end of the utterance.
        let engine = Arc::clone(&self.engine);
        std::thread::spawn(move || {
            loop {
                std::thread::sleep(FINISH_POLL_INTERVAL);
                let speaking = {
                    let mut guard = engine.lock().unwrap_or_else(PoisonError::into_inner);
                    match guard.as_mut() {
                        Some(engine) => engine.is_speaking().unwrap_or(false),
                        None => false,
                    }
                };
                if !speaking {
                    (events.on_done)();
                    return;
                }
            }
        });

        Ok(())
    }

    fn stop(&self) -> Result<(), SpeechHostError> {
        let mut guard = self.lock_engine();
        let Some(engine) = guard.as_mut() else {
            return Ok(());
        };
        engine
            .stop()
            .map(|_| ())
            .map_err(|err| SpeechHostError::Synthesis {
                reason: err.to_string(),
            })
    }
}
