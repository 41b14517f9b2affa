use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::markov::MarkovChain;

/// Save a trained chain as JSON so later runs can skip extraction and
/// training. The stored form keeps the order, transition table, training
/// melody, and timing, so a reloaded chain generates exactly as the
/// original would for the same seed.
pub fn save(chain: &MarkovChain, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let data = serde_json::to_string_pretty(chain)?;
    fs::write(path, data).with_context(|| format!("writing {}", path.display()))
}

pub fn open(path: impl AsRef<Path>) -> Result<MarkovChain> {
    let path = path.as_ref();
    let data = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let chain: MarkovChain = serde_json::from_str(&data)?;
    Ok(chain)
}
