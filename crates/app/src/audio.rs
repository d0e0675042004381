//! Ambient audio over rodio.
//!
//! Playback runs on short-lived worker threads: each play opens the
//! default output stream, decodes the loop file into a sink, and waits for
//! it to drain. The session layer's completion hook fires only when the
//! sink drained naturally, not when it was stopped.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use rodio::{Decoder, OutputStream, Sink};
use tracing::warn;

use sadhana_core::model::AmbientTrack;
use services::{AudioHandle, AudioHost, AudioHostError, CompletionHook};

pub struct RodioAudioHost {
    sounds_dir: PathBuf,
}

impl RodioAudioHost {
    #[must_use]
    pub fn new(sounds_dir: PathBuf) -> Self {
        Self { sounds_dir }
    }
}

#[async_trait]
impl AudioHost for RodioAudioHost {
    async fn load(&self, track: AmbientTrack) -> Result<Arc<dyn AudioHandle>, AudioHostError> {
        let path = self.sounds_dir.join(track.file_name());

        // Decode once up front so a missing or corrupt asset fails the
        // load, not the first play.
        let file = File::open(&path).map_err(|err| AudioHostError::Load {
            track,
            reason: err.to_string(),
        })?;
        Decoder::new(BufReader::new(file)).map_err(|err| AudioHostError::Load {
            track,
            reason: err.to_string(),
        })?;

        Ok(Arc::new(RodioHandle {
            path,
            shared: Arc::new(PlaybackShared {
                sink: Mutex::new(None),
                stopped: AtomicBool::new(false),
                hook: Mutex::new(None),
            }),
        }))
    }
}

/// State shared between the handle and its playback worker thread.
struct PlaybackShared {
    sink: Mutex<Option<Arc<Sink>>>,
    stopped: AtomicBool,
    hook: Mutex<Option<CompletionHook>>,
}

impl PlaybackShared {
    fn lock_sink(&self) -> MutexGuard<'_, Option<Arc<Sink>>> {
        self.sink.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_hook(&self) -> MutexGuard<'_, Option<CompletionHook>> {
        self.hook.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

struct RodioHandle {
    path: PathBuf,
    shared: Arc<PlaybackShared>,
}

impl AudioHandle for RodioHandle {
    fn play(&self) -> Result<(), AudioHostError> {
        if !self.path.exists() {
            return Err(AudioHostError::Control {
                reason: format!("asset vanished: {}", self.path.display()),
            });
        }
        self.shared.stopped.store(false, Ordering::SeqCst);
        *self.shared.lock_sink() = None;

        let path = self.path.clone();
        let shared = Arc::clone(&self.shared);
        std::thread::spawn(move || {
            let Ok((_stream, stream_handle)) = OutputStream::try_default() else {
                warn!(path = %path.display(), "no audio output device");
                return;
            };
            let Ok(file) = File::open(&path) else {
                warn!(path = %path.display(), "loop file unreadable");
                return;
            };
            let Ok(source) = Decoder::new(BufReader::new(file)) else {
                warn!(path = %path.display(), "loop file undecodable");
                return;
            };
            let Ok(sink) = Sink::try_new(&stream_handle) else {
                warn!(path = %path.display(), "could not open audio sink");
                return;
            };

            let sink = Arc::new(sink);
            *shared.lock_sink() = Some(Arc::clone(&sink));
            sink.append(source);
            sink.sleep_until_end();

            // Fire the completion hook only for a natural drain; a stop
            // also wakes sleep_until_end but must stay silent.
            if !shared.stopped.load(Ordering::SeqCst) {
                let hook = shared.lock_hook().take();
                if let Some(hook) = hook {
                    hook();
                }
            }
        });

        Ok(())
    }

    fn stop(&self) -> Result<(), AudioHostError> {
        self.shared.stopped.store(true, Ordering::SeqCst);
        let sink = self.shared.lock_sink().clone();
        if let Some(sink) = sink {
            sink.stop();
        }
        Ok(())
    }

    fn on_completion(&self, hook: CompletionHook) {
        *self.shared.lock_hook() = Some(hook);
    }
}
