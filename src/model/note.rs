use serde::{Deserialize, Serialize};

/// A single note-on or note-off observation taken from a MIDI track.
///
/// `delta` is the tick count since the previous event in the same track,
/// exactly as stored in the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NoteEvent {
    pub pitch: u8,
    pub velocity: u8,
    pub delta: u32,
}

impl NoteEvent {
    pub fn new(pitch: u8, velocity: u8, delta: u32) -> Self {
        Self { pitch, velocity, delta }
    }
}

/// A note-on bundled with its matching note-off.
///
/// This is the atomic symbol the Markov chain operates on; the raw on/off
/// events are never modeled individually.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NotePair {
    pub on: NoteEvent,
    pub off: NoteEvent,
}

impl NotePair {
    pub fn new(on: NoteEvent, off: NoteEvent) -> Self {
        Self { on, off }
    }
}
