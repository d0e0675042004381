use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::GuideStep;
use crate::timing::TimingClass;

/// Tradition a practice belongs to.
///
/// `Unknown` is the sentinel for titles missing from the religion table;
/// screens still render with it rather than failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Religion {
    Christianity,
    Islam,
    Hinduism,
    Buddhism,
    Judaism,
    Unknown,
}

impl Religion {
    /// Library display order (the order practices are grouped on screen).
    pub const ALL: [Religion; 5] = [
        Religion::Christianity,
        Religion::Islam,
        Religion::Hinduism,
        Religion::Buddhism,
        Religion::Judaism,
    ];

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Religion::Christianity => "Christianity",
            Religion::Islam => "Islam",
            Religion::Hinduism => "Hinduism",
            Religion::Buddhism => "Buddhism",
            Religion::Judaism => "Judaism",
            Religion::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Religion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Skill tier for practices whose session length depends on experience.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Proficiency {
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("proficiency index {index} is out of range (expected 0..=2)")]
pub struct ProficiencyError {
    pub index: usize,
}

impl Proficiency {
    pub const ALL: [Proficiency; 3] = [
        Proficiency::Beginner,
        Proficiency::Intermediate,
        Proficiency::Advanced,
    ];

    /// Convert a raw tier index (0/1/2) into a `Proficiency`.
    ///
    /// This is the only place raw indices enter the domain; anything outside
    /// the range is a caller bug, surfaced as an error here instead of a
    /// panic deeper down.
    ///
    /// # Errors
    ///
    /// Returns `ProficiencyError` when `index` is not 0, 1 or 2.
    pub fn from_index(index: usize) -> Result<Self, ProficiencyError> {
        match index {
            0 => Ok(Proficiency::Beginner),
            1 => Ok(Proficiency::Intermediate),
            2 => Ok(Proficiency::Advanced),
            _ => Err(ProficiencyError { index }),
        }
    }

    /// Position of this tier in per-tier duration rows.
    #[must_use]
    pub fn index(&self) -> usize {
        match self {
            Proficiency::Beginner => 0,
            Proficiency::Intermediate => 1,
            Proficiency::Advanced => 2,
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Proficiency::Beginner => "Beginner",
            Proficiency::Intermediate => "Intermediate",
            Proficiency::Advanced => "Advanced",
        }
    }
}

impl fmt::Display for Proficiency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Everything the session screen needs to know about one practice,
/// assembled by `catalog::resolve`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Practice {
    title: String,
    religion: Religion,
    description: &'static str,
    type_label: &'static str,
    steps: &'static [GuideStep],
    timing_class: TimingClass,
}

impl Practice {
    pub(crate) fn new(
        title: impl Into<String>,
        religion: Religion,
        description: &'static str,
        type_label: &'static str,
        steps: &'static [GuideStep],
        timing_class: TimingClass,
    ) -> Self {
        Self {
            title: title.into(),
            religion,
            description,
            type_label,
            steps,
            timing_class,
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn religion(&self) -> Religion {
        self.religion
    }

    #[must_use]
    pub fn description(&self) -> &'static str {
        self.description
    }

    /// Comma-separated practice-type label, e.g. `"Mantra, Devotional"`.
    #[must_use]
    pub fn type_label(&self) -> &'static str {
        self.type_label
    }

    #[must_use]
    pub fn steps(&self) -> &'static [GuideStep] {
        self.steps
    }

    #[must_use]
    pub fn timing_class(&self) -> TimingClass {
        self.timing_class
    }

    /// Whether the guide screen should offer Beginner/Intermediate/Advanced
    /// entry points instead of a single Start action.
    #[must_use]
    pub fn offers_proficiency(&self) -> bool {
        self.timing_class == TimingClass::Tiered
    }
}
