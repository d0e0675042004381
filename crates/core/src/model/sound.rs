use std::fmt;

use serde::{Deserialize, Serialize};

/// The fixed set of ambient loops available during a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AmbientTrack {
    Campfire,
    Night,
    Rain,
    Waves,
}

impl AmbientTrack {
    /// Picker display order.
    pub const ALL: [AmbientTrack; 4] = [
        AmbientTrack::Campfire,
        AmbientTrack::Night,
        AmbientTrack::Rain,
        AmbientTrack::Waves,
    ];

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            AmbientTrack::Campfire => "Campfire",
            AmbientTrack::Night => "Night",
            AmbientTrack::Rain => "Rain",
            AmbientTrack::Waves => "Waves",
        }
    }

    /// Position of this track in [`AmbientTrack::ALL`].
    #[must_use]
    pub fn index(&self) -> usize {
        match self {
            AmbientTrack::Campfire => 0,
            AmbientTrack::Night => 1,
            AmbientTrack::Rain => 2,
            AmbientTrack::Waves => 3,
        }
    }

    /// Asset file name under the configured sounds directory.
    #[must_use]
    pub fn file_name(&self) -> &'static str {
        match self {
            AmbientTrack::Campfire => "campfire.wav",
            AmbientTrack::Night => "night.wav",
            AmbientTrack::Rain => "rain.wav",
            AmbientTrack::Waves => "waves.wav",
        }
    }
}

impl fmt::Display for AmbientTrack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
