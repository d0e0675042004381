mod app_settings;
mod guide;
mod practice;
mod session;
mod sound;

pub use app_settings::AppSettings;
pub use guide::{GuideStep, narration_text};
pub use practice::{Practice, Proficiency, ProficiencyError, Religion};
pub use session::{SessionSummary, SessionSummaryError};
pub use sound::AmbientTrack;
