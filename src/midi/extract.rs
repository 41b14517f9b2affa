use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use midly::{MetaMessage, MidiMessage, Smf, TrackEventKind};

use crate::model::note::{NoteEvent, NotePair};
use crate::model::timing::{Timing, DEFAULT_TEMPO, DEFAULT_TICKS_PER_BEAT};

/// Gap given to a note-on that never sees a matching note-off.
const UNMATCHED_OFF_DELTA: u32 = 480;

/// Read a MIDI file into a flat list of note pairs plus its timing metadata.
///
/// Tracks are scanned in file order and concatenated into one list. Deltas
/// are the raw per-event tick counts as stored in the file.
pub fn read_pairs(path: impl AsRef<Path>) -> Result<(Vec<NotePair>, Timing)> {
    let path = path.as_ref();
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let smf = Smf::parse(&bytes).with_context(|| format!("parsing {}", path.display()))?;
    Ok((pairs_from_smf(&smf), timing_from_smf(&smf)))
}

/// Pair every note-on with the first following note-off for the same pitch
/// in the same track. First-match lookahead keeps pairing correct when notes
/// of different pitches overlap.
fn pairs_from_smf(smf: &Smf) -> Vec<NotePair> {
    let mut pairs = Vec::new();

    for track in &smf.tracks {
        // Flatten to note events first. A NoteOn with velocity 0 is a
        // note-off in disguise and is normalized here.
        let notes: Vec<(bool, NoteEvent)> = track
            .iter()
            .filter_map(|ev| {
                let delta = ev.delta.as_int();
                match ev.kind {
                    TrackEventKind::Midi { message, .. } => match message {
                        MidiMessage::NoteOn { key, vel } if vel.as_int() > 0 => {
                            Some((true, NoteEvent::new(key.as_int(), vel.as_int(), delta)))
                        }
                        MidiMessage::NoteOn { key, .. } => {
                            Some((false, NoteEvent::new(key.as_int(), 0, delta)))
                        }
                        MidiMessage::NoteOff { key, vel } => {
                            Some((false, NoteEvent::new(key.as_int(), vel.as_int(), delta)))
                        }
                        _ => None,
                    },
                    _ => None,
                }
            })
            .collect();

        for (i, &(is_on, on)) in notes.iter().enumerate() {
            if !is_on {
                continue;
            }
            let off = notes[i + 1..]
                .iter()
                .find(|&&(later_is_on, later)| !later_is_on && later.pitch == on.pitch)
                .map(|&(_, later)| later)
                .unwrap_or_else(|| NoteEvent::new(on.pitch, 0, UNMATCHED_OFF_DELTA));
            pairs.push(NotePair::new(on, off));
        }
    }

    pairs
}

/// Resolution from the header, tempo from the first Tempo meta event found
/// anywhere in the file. Both fall back to the common defaults.
fn timing_from_smf(smf: &Smf) -> Timing {
    let ticks_per_beat = match smf.header.timing {
        midly::Timing::Metrical(t) => t.as_int(),
        _ => DEFAULT_TICKS_PER_BEAT,
    };

    let tempo = smf
        .tracks
        .iter()
        .flat_map(|track| track.iter())
        .find_map(|ev| match ev.kind {
            TrackEventKind::Meta(MetaMessage::Tempo(t)) => Some(t.as_int()),
            _ => None,
        })
        .unwrap_or(DEFAULT_TEMPO);

    Timing { ticks_per_beat, tempo }
}
