use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};

use sadhana_core::catalog;
use sadhana_core::model::{Practice, Proficiency, SessionSummary};
use sadhana_core::timing::{self, SessionTiming, TimerMode};

use crate::error::SessionError;

//
// ─── SESSION STATE ─────────────────────────────────────────────────────────────
//

/// Lifecycle of one session. `Concluded` is terminal; only `Active`
/// accepts user interactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Active,
    Concluding,
    Concluded,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// In-memory state for one running session.
///
/// Holds the resolved practice, the selected timing, and the elapsed-time
/// accumulator. Elapsed time is fed from the timer widget's tick callback;
/// this type never reads a clock on its own.
pub struct SessionService {
    practice: Practice,
    proficiency: Option<Proficiency>,
    timing: SessionTiming,
    started_at: DateTime<Utc>,
    state: SessionState,
    elapsed: Duration,
    guide_flipped: bool,
}

impl SessionService {
    /// Create a session for the given practice title.
    ///
    /// `started_at` should come from the services layer clock to keep time
    /// deterministic.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EmptyTitle` for a blank title, and
    /// `SessionError::Timing` when a tiered practice is entered without a
    /// proficiency.
    pub fn start(
        title: &str,
        proficiency: Option<Proficiency>,
        started_at: DateTime<Utc>,
    ) -> Result<Self, SessionError> {
        if title.trim().is_empty() {
            return Err(SessionError::EmptyTitle);
        }
        let timing = timing::timing_for(title, proficiency)?;
        let practice = catalog::resolve(title);

        Ok(Self {
            practice,
            proficiency,
            timing,
            started_at,
            state: SessionState::Active,
            elapsed: Duration::ZERO,
            guide_flipped: false,
        })
    }

    #[must_use]
    pub fn practice(&self) -> &Practice {
        &self.practice
    }

    #[must_use]
    pub fn proficiency(&self) -> Option<Proficiency> {
        self.proficiency
    }

    #[must_use]
    pub fn timing(&self) -> SessionTiming {
        self.timing
    }

    /// How the screen's clock widget runs for this session.
    #[must_use]
    pub fn timer_mode(&self) -> TimerMode {
        self.timing.timer_mode()
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state == SessionState::Active
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    #[must_use]
    pub fn guide_flipped(&self) -> bool {
        self.guide_flipped
    }

    /// Feed the elapsed-time accumulator from the timer widget's tick
    /// callback.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Concluded` once the session has left
    /// `Active`; late ticks no longer move the accumulator.
    pub fn record_tick(&mut self, elapsed: Duration) -> Result<(), SessionError> {
        if !self.is_active() {
            return Err(SessionError::Concluded);
        }
        self.elapsed = elapsed;
        Ok(())
    }

    /// Flip the guide card and return the new orientation.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Concluded` once the session has left `Active`.
    pub fn flip_guide(&mut self) -> Result<bool, SessionError> {
        if !self.is_active() {
            return Err(SessionError::Concluded);
        }
        self.guide_flipped = !self.guide_flipped;
        Ok(self.guide_flipped)
    }

    /// The single transition out of `Active`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Concluded` when the session already left
    /// `Active`.
    pub(crate) fn begin_concluding(&mut self) -> Result<(), SessionError> {
        if !self.is_active() {
            return Err(SessionError::Concluded);
        }
        self.state = SessionState::Concluding;
        Ok(())
    }

    /// Freeze the session and build the summary hand-off record.
    ///
    /// # Errors
    ///
    /// Propagates summary validation; unreachable for sessions created
    /// through [`SessionService::start`], which rejects blank titles.
    pub(crate) fn finish_concluding(
        &mut self,
        concluded_at: DateTime<Utc>,
    ) -> Result<SessionSummary, SessionError> {
        let summary =
            SessionSummary::new(self.practice.title(), self.elapsed, concluded_at)?;
        self.state = SessionState::Concluded;
        Ok(summary)
    }
}

impl fmt::Debug for SessionService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionService")
            .field("practice", &self.practice.title())
            .field("proficiency", &self.proficiency)
            .field("timing", &self.timing)
            .field("state", &self.state)
            .field("elapsed", &self.elapsed)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
