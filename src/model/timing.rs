use serde::{Deserialize, Serialize};

/// Fallback resolution when the source header uses SMPTE timing.
pub const DEFAULT_TICKS_PER_BEAT: u16 = 480;

/// Fallback tempo when the source has no tempo event: 120 BPM.
pub const DEFAULT_TEMPO: u32 = 500_000;

/// Timing metadata read from the source file and forwarded untouched to the
/// output. `tempo` is in microseconds per quarter note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timing {
    pub ticks_per_beat: u16,
    pub tempo: u32,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            ticks_per_beat: DEFAULT_TICKS_PER_BEAT,
            tempo: DEFAULT_TEMPO,
        }
    }
}
