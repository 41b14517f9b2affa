use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::markov::ChainError;
use crate::model::note::NotePair;
use crate::model::timing::Timing;

/// An N-order Markov chain over note pairs.
///
/// Every window of `order` consecutive pairs in the training melody is a
/// context, mapped to the pairs observed immediately after it. Successor
/// lists keep duplicates in observation order: sampling uniformly from a
/// list reproduces the empirical transition frequencies, so no separate
/// counts are stored.
///
/// The chain is immutable once trained. Generation (see `generate.rs`) only
/// reads it, so independent walks over the same chain may run in parallel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkovChain {
    order: usize,
    transitions: BTreeMap<String, Vec<NotePair>>,
    training: Vec<NotePair>,
    timing: Timing,
}

impl MarkovChain {
    /// Build the transition table from a training melody.
    ///
    /// Needs at least `order + 1` pairs, otherwise there is not a single
    /// observable transition. The final window of the melody has no
    /// successor and gets no entry, so no entry ever maps to an empty list.
    pub fn train(pairs: &[NotePair], order: usize, timing: Timing) -> Result<Self, ChainError> {
        if order == 0 {
            return Err(ChainError::OrderZero);
        }
        if pairs.is_empty() {
            return Err(ChainError::EmptyTraining);
        }
        if pairs.len() < order + 1 {
            return Err(ChainError::TrainingTooShort {
                order,
                available: pairs.len(),
            });
        }

        let mut transitions: BTreeMap<String, Vec<NotePair>> = BTreeMap::new();
        for window in pairs.windows(order + 1) {
            let (context, successor) = window.split_at(order);
            transitions
                .entry(context_key(context))
                .or_default()
                .push(successor[0]);
        }

        Ok(Self {
            order,
            transitions,
            training: pairs.to_vec(),
            timing,
        })
    }

    pub fn order(&self) -> usize {
        self.order
    }

    /// Timing metadata carried over from the source file.
    pub fn timing(&self) -> Timing {
        self.timing
    }

    /// The full training melody, kept for picking starting contexts.
    pub fn training(&self) -> &[NotePair] {
        &self.training
    }

    /// Number of distinct contexts in the transition table.
    pub fn context_count(&self) -> usize {
        self.transitions.len()
    }

    /// Successors recorded for a context window, in observation order, or
    /// `None` if the window was never observed with a successor.
    pub fn successors(&self, context: &[NotePair]) -> Option<&[NotePair]> {
        self.transitions.get(&context_key(context)).map(Vec::as_slice)
    }
}

/// Encode a context window as a table key.
///
/// The per-field separators keep the encoding unambiguous: two windows share
/// a key exactly when their pairs are element-wise equal.
fn context_key(context: &[NotePair]) -> String {
    let mut key = String::new();
    for (i, pair) in context.iter().enumerate() {
        if i > 0 {
            key.push('|');
        }
        key.push_str(&format!(
            "{}.{}.{}-{}.{}.{}",
            pair.on.pitch,
            pair.on.velocity,
            pair.on.delta,
            pair.off.pitch,
            pair.off.velocity,
            pair.off.delta
        ));
    }
    key
}
