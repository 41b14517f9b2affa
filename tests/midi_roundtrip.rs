use melomark_cli::markov::MarkovChain;
use melomark_cli::midi::{emit, extract};
use melomark_cli::model::note::{NoteEvent, NotePair};
use melomark_cli::model::timing::Timing;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn melody() -> Vec<NotePair> {
    [60u8, 62, 64, 62, 60, 67, 65, 64]
        .iter()
        .map(|&pitch| {
            NotePair::new(
                NoteEvent::new(pitch, 96, 60),
                NoteEvent::new(pitch, 0, 180),
            )
        })
        .collect()
}

#[test]
fn written_pairs_read_back_unchanged() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("melody.mid");
    let timing = Timing { ticks_per_beat: 96, tempo: 600_000 };

    emit::write_pairs(&melody(), timing, &path).expect("write");
    let (pairs, read_timing) = extract::read_pairs(&path).expect("read");

    assert_eq!(pairs, melody());
    assert_eq!(read_timing, timing);
}

#[test]
fn timing_survives_the_whole_pipeline() {
    let dir = tempfile::tempdir().expect("tempdir");
    let source = dir.path().join("source.mid");
    let output = dir.path().join("output.mid");
    let timing = Timing { ticks_per_beat: 192, tempo: 375_000 };

    emit::write_pairs(&melody(), timing, &source).expect("write source");

    let (pairs, source_timing) = extract::read_pairs(&source).expect("read source");
    let chain = MarkovChain::train(&pairs, 2, source_timing).expect("train");
    let generated = chain
        .generate(20, &mut StdRng::seed_from_u64(11))
        .expect("generate");
    emit::write_pairs(&generated, chain.timing(), &output).expect("write output");

    let (_, output_timing) = extract::read_pairs(&output).expect("read output");
    assert_eq!(output_timing, timing);
}

#[test]
fn unreadable_input_reports_the_path() {
    let err = extract::read_pairs("no-such-file.mid").unwrap_err();
    assert!(err.to_string().contains("no-such-file.mid"));
}

#[test]
fn garbage_input_is_a_parse_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("not-midi.mid");
    std::fs::write(&path, b"definitely not a midi file").expect("write");

    let err = extract::read_pairs(&path).unwrap_err();
    assert!(err.to_string().contains("not-midi.mid"));
}
