//! Sound cue selection for decisions

use decision_engine::Decision;
use serde::{Deserialize, Serialize};

/// Audible cue a client should play alongside a decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoundCue {
    /// Alert is being sent now
    Alert,
    /// Alert was held back for later
    Reminder,
}

impl SoundCue {
    /// Cue for a decision, given the caller's sound toggle
    pub fn for_decision(decision: Decision, sound_enabled: bool) -> Option<Self> {
        if !sound_enabled {
            return None;
        }
        match decision {
            Decision::Send => Some(SoundCue::Alert),
            Decision::Delay => Some(SoundCue::Reminder),
            Decision::Suppress => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SoundCue::Alert => "alert",
            SoundCue::Reminder => "reminder",
        }
    }
}
