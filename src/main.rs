use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use rand::rngs::StdRng;
use rand::SeedableRng;

use melomark_cli::markov::MarkovChain;
use melomark_cli::{midi, storage};

fn cli() -> Command {
    Command::new("melomark-cli")
        .about("Markov melody generator: learn a MIDI file, write a new one in its style")
        .arg(
            Arg::new("input")
                .value_name("FILE")
                .help("Source MIDI file to learn from (omit with --from-model)"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Where to write the generated MIDI (default: <input stem>-generated.mid)"),
        )
        .arg(
            Arg::new("length")
                .short('n')
                .long("length")
                .value_name("N")
                .value_parser(clap::value_parser!(usize))
                .default_value("100")
                .help("Number of note pairs to generate"),
        )
        .arg(
            Arg::new("order")
                .short('k')
                .long("order")
                .value_name("N")
                .value_parser(clap::value_parser!(usize))
                .default_value("2")
                .help("How many previous pairs condition the next one"),
        )
        .arg(
            Arg::new("seed")
                .short('s')
                .long("seed")
                .value_name("N")
                .value_parser(clap::value_parser!(u64))
                .help("RNG seed for reproducible output"),
        )
        .arg(
            Arg::new("export-model")
                .long("export-model")
                .value_name("FILE")
                .help("Save the trained chain as JSON for later runs"),
        )
        .arg(
            Arg::new("from-model")
                .long("from-model")
                .value_name("FILE")
                .conflicts_with("input")
                .help("Generate from a previously exported chain instead of training"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .action(ArgAction::SetTrue)
                .help("Suppress progress output"),
        )
}

fn main() -> Result<()> {
    let matches = cli().get_matches();
    let quiet = matches.get_flag("quiet");
    let length = *matches.get_one::<usize>("length").expect("defaulted");

    let chain = if let Some(model_path) = matches.get_one::<String>("from-model") {
        let chain = storage::chain::open(model_path)?;
        if !quiet {
            println!(
                "loaded model: order-{} chain with {} contexts",
                chain.order(),
                chain.context_count()
            );
        }
        chain
    } else {
        let input = matches
            .get_one::<String>("input")
            .context("an input MIDI file (or --from-model) is required")?;
        let order = *matches.get_one::<usize>("order").expect("defaulted");

        let (pairs, timing) = midi::extract::read_pairs(input)?;
        if !quiet {
            println!("extracted {} note pairs from {}", pairs.len(), input);
        }

        let chain = MarkovChain::train(&pairs, order, timing)?;
        if !quiet {
            println!("trained order-{} chain: {} contexts", order, chain.context_count());
        }
        chain
    };

    if let Some(path) = matches.get_one::<String>("export-model") {
        storage::chain::save(&chain, path)?;
        if !quiet {
            println!("exported model: {}", path);
        }
    }

    let mut rng = match matches.get_one::<u64>("seed") {
        Some(&seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let generated = chain.generate(length, &mut rng)?;

    let output = output_path(&matches);
    midi::emit::write_pairs(&generated, chain.timing(), &output)?;
    if !quiet {
        println!("wrote {} ({} note pairs)", output.display(), generated.len());
    }

    Ok(())
}

fn output_path(matches: &ArgMatches) -> PathBuf {
    if let Some(path) = matches.get_one::<String>("output") {
        return PathBuf::from(path);
    }
    match matches.get_one::<String>("input") {
        Some(input) => {
            let stem = Path::new(input)
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "melody".to_string());
            PathBuf::from(format!("{stem}-generated.mid"))
        }
        None => PathBuf::from("generated.mid"),
    }
}
