use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use midly::num::{u15, u24, u28, u4, u7};
use midly::{Format, Header, MetaMessage, MidiMessage, Smf, TrackEvent, TrackEventKind};

use crate::model::note::NotePair;
use crate::model::timing::Timing;

/// Serialize generated note pairs into a single-track MIDI file, replaying
/// each pair's recorded deltas and carrying the source timing over verbatim.
pub fn write_pairs(pairs: &[NotePair], timing: Timing, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let smf = pairs_to_smf(pairs, timing);

    let mut buf = Vec::new();
    smf.write_std(&mut buf).context("encoding MIDI")?;
    fs::write(path, &buf).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

fn pairs_to_smf(pairs: &[NotePair], timing: Timing) -> Smf<'static> {
    let mut smf = Smf::new(Header::new(
        Format::SingleTrack,
        midly::Timing::Metrical(u15::new(timing.ticks_per_beat)),
    ));

    let channel = u4::new(0);
    let mut track: Vec<TrackEvent<'static>> = Vec::new();

    track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(MetaMessage::Tempo(u24::new(timing.tempo))),
    });

    for pair in pairs {
        track.push(TrackEvent {
            delta: u28::new(pair.on.delta),
            kind: TrackEventKind::Midi {
                channel,
                message: MidiMessage::NoteOn {
                    key: u7::new(pair.on.pitch),
                    vel: u7::new(pair.on.velocity),
                },
            },
        });
        track.push(TrackEvent {
            delta: u28::new(pair.off.delta),
            kind: TrackEventKind::Midi {
                channel,
                message: MidiMessage::NoteOff {
                    key: u7::new(pair.off.pitch),
                    vel: u7::new(pair.off.velocity),
                },
            },
        });
    }

    track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
    });

    smf.tracks.push(track);
    smf
}
