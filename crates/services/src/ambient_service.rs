//! Ambient sound loops for a running session.
//!
//! Each track walks `Unloaded -> Loading -> Loaded{inactive|active}`. Track
//! state machines are independent of one another; there is no cross-track
//! ordering guarantee. Same-track requests are serialized by the caller
//! (the UI issues one toggle per tap of a rendered control).

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::warn;

use sadhana_core::model::AmbientTrack;

use crate::error::AmbientError;
use crate::hosts::{AudioHandle, AudioHost};

/// Externally observable state of one track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackState {
    Unloaded,
    Loading,
    Inactive,
    Active,
}

enum Phase {
    Unloaded,
    Loading,
    Loaded {
        handle: Arc<dyn AudioHandle>,
        active: bool,
    },
}

/// Invariant: `generation` changes on every play/stop transition, so a
/// completion hook armed for an earlier playback can recognize that the
/// track has moved on and must not restart it.
struct Slot {
    phase: Phase,
    generation: u64,
}

impl Slot {
    fn state(&self) -> TrackState {
        match &self.phase {
            Phase::Unloaded => TrackState::Unloaded,
            Phase::Loading => TrackState::Loading,
            Phase::Loaded { active: false, .. } => TrackState::Inactive,
            Phase::Loaded { active: true, .. } => TrackState::Active,
        }
    }

    fn set_active(&mut self, value: bool) {
        if let Phase::Loaded { active, .. } = &mut self.phase {
            *active = value;
        }
    }
}

fn lock(slot: &Mutex<Slot>) -> MutexGuard<'_, Slot> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Owns the loaded sound handles for one session.
///
/// `load_all` must have run before any toggle is honored; `stop_all` tears
/// everything down and the service is unusable until `load_all` runs again.
pub struct AmbientSoundService {
    host: Arc<dyn AudioHost>,
    slots: Vec<Arc<Mutex<Slot>>>,
}

impl AmbientSoundService {
    #[must_use]
    pub fn new(host: Arc<dyn AudioHost>) -> Self {
        let slots = AmbientTrack::ALL
            .iter()
            .map(|_| {
                Arc::new(Mutex::new(Slot {
                    phase: Phase::Unloaded,
                    generation: 0,
                }))
            })
            .collect();
        Self { host, slots }
    }

    fn slot(&self, track: AmbientTrack) -> &Arc<Mutex<Slot>> {
        &self.slots[track.index()]
    }

    /// Load every track's handle. A track whose load fails is logged and
    /// stays `Unloaded` for the rest of the session; there is no retry.
    pub async fn load_all(&self) {
        for track in AmbientTrack::ALL {
            {
                let mut guard = lock(self.slot(track));
                guard.phase = Phase::Loading;
            }
            match self.host.load(track).await {
                Ok(handle) => {
                    let mut guard = lock(self.slot(track));
                    guard.phase = Phase::Loaded {
                        handle,
                        active: false,
                    };
                }
                Err(err) => {
                    warn!(track = %track, error = %err, "failed to load ambient track");
                    let mut guard = lock(self.slot(track));
                    guard.phase = Phase::Unloaded;
                }
            }
        }
    }

    #[must_use]
    pub fn state(&self, track: AmbientTrack) -> TrackState {
        lock(self.slot(track)).state()
    }

    #[must_use]
    pub fn is_active(&self, track: AmbientTrack) -> bool {
        self.state(track) == TrackState::Active
    }

    /// Tracks currently playing, in picker order.
    #[must_use]
    pub fn active_tracks(&self) -> Vec<AmbientTrack> {
        AmbientTrack::ALL
            .into_iter()
            .filter(|track| self.is_active(*track))
            .collect()
    }

    /// Flip one track between playing and silent.
    ///
    /// # Errors
    ///
    /// Returns `AmbientError::NotLoaded` when the track's handle is not
    /// loaded; premature toggles are rejected rather than queued.
    pub fn toggle(&self, track: AmbientTrack) -> Result<TrackState, AmbientError> {
        match self.state(track) {
            TrackState::Active => {
                self.stop(track);
                Ok(self.state(track))
            }
            TrackState::Inactive => {
                self.play(track);
                Ok(self.state(track))
            }
            TrackState::Unloaded | TrackState::Loading => {
                Err(AmbientError::NotLoaded { track })
            }
        }
    }

    /// Start a track and arm its seamless loop. A play rejection is logged
    /// and leaves the track inactive; nothing is surfaced to the screen.
    fn play(&self, track: AmbientTrack) {
        let slot = Arc::clone(self.slot(track));
        let mut guard = lock(&slot);
        let Phase::Loaded { handle, .. } = &guard.phase else {
            return;
        };
        let handle = Arc::clone(handle);
        guard.generation += 1;
        let generation = guard.generation;
        guard.set_active(true);

        arm_loop(Arc::clone(&slot), Arc::clone(&handle), track, generation);
        if let Err(err) = handle.play() {
            warn!(track = %track, error = %err, "failed to start ambient track");
            guard.generation += 1;
            guard.set_active(false);
        }
    }

    /// Stop a track. Best-effort: a stop rejection is logged, but the
    /// active flag is cleared regardless.
    pub fn stop(&self, track: AmbientTrack) {
        let mut guard = lock(self.slot(track));
        guard.generation += 1;
        guard.set_active(false);
        if let Phase::Loaded { handle, .. } = &guard.phase {
            if let Err(err) = handle.stop() {
                warn!(track = %track, error = %err, "failed to stop ambient track");
            }
        }
    }

    /// Stop every track and drop every handle. Runs unconditionally at
    /// session teardown, including abnormal navigation away, and never
    /// fails; the service needs another `load_all` before it can play
    /// again.
    pub fn stop_all(&self) {
        for track in AmbientTrack::ALL {
            let mut guard = lock(self.slot(track));
            guard.generation += 1;
            if let Phase::Loaded { handle, active } = &guard.phase {
                if *active {
                    if let Err(err) = handle.stop() {
                        warn!(track = %track, error = %err, "failed to stop ambient track");
                    }
                }
            }
            guard.phase = Phase::Unloaded;
        }
    }
}

/// Arm the completion hook that keeps a track looping: when playback ends
/// naturally and the slot is still in the same activation (generation
/// match), reissue play and re-arm. A stop issued while the completion is
/// in flight bumps the generation, so the stale hook does nothing.
fn arm_loop(
    slot: Arc<Mutex<Slot>>,
    handle: Arc<dyn AudioHandle>,
    track: AmbientTrack,
    generation: u64,
) {
    let hook_slot = Arc::clone(&slot);
    let hook_handle = Arc::clone(&handle);
    handle.on_completion(Box::new(move || {
        {
            let mut guard = lock(&hook_slot);
            if guard.generation != generation || guard.state() != TrackState::Active {
                return;
            }
            if let Err(err) = hook_handle.play() {
                warn!(track = %track, error = %err, "ambient loop restart failed");
                guard.generation += 1;
                guard.set_active(false);
                return;
            }
        }
        arm_loop(hook_slot, hook_handle, track, generation);
    }));
}
