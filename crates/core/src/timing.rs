//! Session timing selection.
//!
//! Three disjoint duration tables decide how a session is clocked. The
//! lookup order is fixed and must not change: single-duration wins over
//! tiered, tiered over untimed, and anything unlisted runs open-ended.
//! A title appearing in more than one table is a data bug in the tables,
//! not something the selector tries to repair.

use std::time::Duration;

use phf::{phf_map, phf_set};
use thiserror::Error;

use crate::model::Proficiency;

/// Which duration table a practice falls under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimingClass {
    /// One fixed session length for everyone.
    Single,
    /// Fixed length per proficiency tier.
    Tiered,
    /// Listed with an explicit zero length; clocked as a stopwatch.
    Untimed,
    /// Not listed anywhere; elapsed time counts up.
    OpenEnded,
}

/// Resolved timing for one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionTiming {
    Fixed(Duration),
    OpenEnded,
}

/// How the session screen's clock widget runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerMode {
    Countdown(Duration),
    Stopwatch,
}

impl SessionTiming {
    /// A fixed zero duration means "time it yourself": the screen shows a
    /// stopwatch, exactly as it does for open-ended practices.
    #[must_use]
    pub fn timer_mode(self) -> TimerMode {
        match self {
            SessionTiming::Fixed(duration) if !duration.is_zero() => {
                TimerMode::Countdown(duration)
            }
            _ => TimerMode::Stopwatch,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TimingError {
    /// A tiered practice was asked for a duration without saying which tier.
    /// This is a programming error in the caller, not a runtime condition.
    #[error("practice \"{title}\" has tiered durations; a proficiency is required")]
    ProficiencyRequired { title: String },
}

static SINGLE_DURATIONS: phf::Map<&'static str, u32> = phf_map! {
    "Lectio Divina" => 900,
    "Christian Meditation" => 1200,
    "Examen" => 900,
    "Rosary" => 1500,
    "Taffakur" => 600,
    "Sufi Breathing" => 480,
    "Kriya Yoga" => 1800,
    "Chakra" => 1260,
    "Hitbodedut" => 900,
};

/// Seconds per tier, indexed Beginner / Intermediate / Advanced.
static TIERED_DURATIONS: phf::Map<&'static str, [u32; 3]> = phf_map! {
    "Dhikr" => [300, 600, 900],
    "Muraqaba" => [600, 1200, 2400],
    "Hatha Yoga" => [600, 1200, 1800],
    "Walk" => [300, 600, 1200],
    "Tonglen" => [300, 600, 900],
    "Metta" => [300, 600, 1200],
    "Body Scan" => [600, 900, 1800],
    "Kabbalistic/Chassidic" => [300, 900, 1500],
    "Shema" => [180, 360, 600],
};

static UNTIMED: phf::Set<&'static str> = phf_set! {
    "Breath",
};

/// Duration-table membership for a title, honoring the lookup priority.
#[must_use]
pub fn classify(title: &str) -> TimingClass {
    if SINGLE_DURATIONS.contains_key(title) {
        TimingClass::Single
    } else if TIERED_DURATIONS.contains_key(title) {
        TimingClass::Tiered
    } else if UNTIMED.contains(title) {
        TimingClass::Untimed
    } else {
        TimingClass::OpenEnded
    }
}

/// Resolve the session timing for a practice.
///
/// Single-duration titles ignore the proficiency argument entirely. Untimed
/// titles yield `Fixed(0)`, which [`SessionTiming::timer_mode`] renders as a
/// stopwatch. Unlisted titles are open-ended.
///
/// # Errors
///
/// Returns [`TimingError::ProficiencyRequired`] when the title has tiered
/// durations and no proficiency was given.
pub fn timing_for(
    title: &str,
    proficiency: Option<Proficiency>,
) -> Result<SessionTiming, TimingError> {
    if let Some(seconds) = SINGLE_DURATIONS.get(title) {
        return Ok(SessionTiming::Fixed(Duration::from_secs(u64::from(
            *seconds,
        ))));
    }
    if let Some(tiers) = TIERED_DURATIONS.get(title) {
        let tier = proficiency.ok_or_else(|| TimingError::ProficiencyRequired {
            title: title.to_string(),
        })?;
        let seconds = tiers[tier.index()];
        return Ok(SessionTiming::Fixed(Duration::from_secs(u64::from(
            seconds,
        ))));
    }
    if UNTIMED.contains(title) {
        return Ok(SessionTiming::Fixed(Duration::ZERO));
    }
    Ok(SessionTiming::OpenEnded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_duration_ignores_proficiency() {
        let plain = timing_for("Rosary", None).unwrap();
        let tiered = timing_for("Rosary", Some(Proficiency::Advanced)).unwrap();
        assert_eq!(plain, SessionTiming::Fixed(Duration::from_secs(1500)));
        assert_eq!(plain, tiered);
    }

    #[test]
    fn tiered_durations_resolve_per_proficiency() {
        assert_eq!(
            timing_for("Hatha Yoga", Some(Proficiency::Beginner)).unwrap(),
            SessionTiming::Fixed(Duration::from_secs(600))
        );
        assert_eq!(
            timing_for("Hatha Yoga", Some(Proficiency::Intermediate)).unwrap(),
            SessionTiming::Fixed(Duration::from_secs(1200))
        );
        assert_eq!(
            timing_for("Hatha Yoga", Some(Proficiency::Advanced)).unwrap(),
            SessionTiming::Fixed(Duration::from_secs(1800))
        );
    }

    #[test]
    fn tiered_without_proficiency_is_a_caller_error() {
        let err = timing_for("Metta", None).unwrap_err();
        assert!(matches!(err, TimingError::ProficiencyRequired { .. }));
    }

    #[test]
    fn untimed_yields_fixed_zero_clocked_as_stopwatch() {
        let timing = timing_for("Breath", None).unwrap();
        assert_eq!(timing, SessionTiming::Fixed(Duration::ZERO));
        assert_eq!(timing.timer_mode(), TimerMode::Stopwatch);
    }

    #[test]
    fn unlisted_titles_are_open_ended() {
        let timing = timing_for("Unlisted Practice", None).unwrap();
        assert_eq!(timing, SessionTiming::OpenEnded);
        assert_eq!(timing.timer_mode(), TimerMode::Stopwatch);
    }

    #[test]
    fn fixed_nonzero_runs_as_countdown() {
        let timing = timing_for("Taffakur", None).unwrap();
        assert_eq!(
            timing.timer_mode(),
            TimerMode::Countdown(Duration::from_secs(600))
        );
    }

    #[test]
    fn every_tier_row_is_ascending() {
        for (title, tiers) in TIERED_DURATIONS.entries() {
            assert!(
                tiers[0] <= tiers[1] && tiers[1] <= tiers[2],
                "tier row for {title} is not ascending"
            );
        }
    }

    #[test]
    fn duration_tables_are_disjoint() {
        for title in SINGLE_DURATIONS.keys() {
            assert!(!TIERED_DURATIONS.contains_key(title), "{title} in two tables");
            assert!(!UNTIMED.contains(title), "{title} in two tables");
        }
        for title in TIERED_DURATIONS.keys() {
            assert!(!UNTIMED.contains(title), "{title} in two tables");
        }
    }

    #[test]
    fn classify_follows_table_priority() {
        assert_eq!(classify("Rosary"), TimingClass::Single);
        assert_eq!(classify("Shema"), TimingClass::Tiered);
        assert_eq!(classify("Breath"), TimingClass::Untimed);
        assert_eq!(classify("Unlisted Practice"), TimingClass::OpenEnded);
    }
}
