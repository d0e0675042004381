use std::sync::Arc;
use std::time::Duration;

use sadhana_core::model::{AmbientTrack, GuideStep, SessionSummary};
use sadhana_core::timing::TimerMode;
use services::{AmbientError, NarrationError, SessionError};
use services::sessions::{SessionRuntime, SessionService};

use crate::vm::time_fmt::format_clock;

/// User interactions the session screen can issue. Every mutation goes
/// through [`SessionVm::apply`] or one of the named transitions below;
/// nothing on the screen writes session state directly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionIntent {
    ToggleSound(AmbientTrack),
    ToggleNarration,
    FlipGuide,
    Conclude,
}

/// Screen controller for one running session.
pub struct SessionVm {
    runtime: Arc<SessionRuntime>,
    session: SessionService,
}

impl SessionVm {
    #[must_use]
    pub fn new(runtime: Arc<SessionRuntime>, session: SessionService) -> Self {
        Self { runtime, session }
    }

    //
    // ─── Queries ───────────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn title(&self) -> &str {
        self.session.practice().title()
    }

    #[must_use]
    pub fn description(&self) -> &'static str {
        self.session.practice().description()
    }

    #[must_use]
    pub fn steps(&self) -> &'static [GuideStep] {
        self.session.practice().steps()
    }

    #[must_use]
    pub fn timer_mode(&self) -> TimerMode {
        self.session.timer_mode()
    }

    /// The clock readout: counting down for fixed durations, up otherwise.
    #[must_use]
    pub fn clock_text(&self) -> String {
        match self.session.timer_mode() {
            TimerMode::Countdown(total) => {
                format_clock(total.saturating_sub(self.session.elapsed()))
            }
            TimerMode::Stopwatch => format_clock(self.session.elapsed()),
        }
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.session.elapsed()
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.session.is_active()
    }

    #[must_use]
    pub fn guide_flipped(&self) -> bool {
        self.session.guide_flipped()
    }

    #[must_use]
    pub fn is_narrating(&self) -> bool {
        self.runtime.is_narrating()
    }

    #[must_use]
    pub fn sound_active(&self, track: AmbientTrack) -> bool {
        self.runtime.sound_state(track) == services::TrackState::Active
    }

    //
    // ─── Transitions ───────────────────────────────────────────────────────
    //

    /// Dispatch one screen interaction.
    pub fn apply(&mut self, intent: SessionIntent) {
        match intent {
            SessionIntent::ToggleSound(track) => {
                let _ = self.toggle_sound(track);
            }
            SessionIntent::ToggleNarration => {
                let _ = self.toggle_narration();
            }
            SessionIntent::FlipGuide => {
                let _ = self.flip_guide();
            }
            SessionIntent::Conclude => {
                let _ = self.conclude();
            }
        }
    }

    /// # Errors
    ///
    /// Returns `AmbientError::NotLoaded` for a track that is not ready; a
    /// tap that lands before loading finishes simply does nothing.
    pub fn toggle_sound(&mut self, track: AmbientTrack) -> Result<(), AmbientError> {
        self.runtime.toggle_sound(track)?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `NarrationError` when the synthesizer rejects the utterance.
    pub fn toggle_narration(&mut self) -> Result<bool, NarrationError> {
        self.runtime.toggle_narration(&self.session)
    }

    /// # Errors
    ///
    /// Returns `SessionError::Concluded` after conclusion.
    pub fn flip_guide(&mut self) -> Result<bool, SessionError> {
        self.session.flip_guide()
    }

    /// Feed one tick interval from the screen's clock loop. Returns whether
    /// the session is still running, so the loop knows when to stop.
    pub fn tick(&mut self, delta: Duration) -> bool {
        let total = self.session.elapsed().saturating_add(delta);
        self.runtime.record_tick(&mut self.session, total).is_ok()
    }

    /// # Errors
    ///
    /// Returns `SessionError::Concluded` when already concluded; the
    /// navigation hand-off is never repeated.
    pub fn conclude(&mut self) -> Result<SessionSummary, SessionError> {
        self.runtime.conclude(&mut self.session)
    }

    /// Mandatory cleanup when the screen goes away without a conclusion.
    pub fn tear_down(&mut self) {
        self.runtime.tear_down(&mut self.session);
    }
}
