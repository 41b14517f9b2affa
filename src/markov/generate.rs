use rand::Rng;

use crate::markov::chain::MarkovChain;
use crate::markov::ChainError;
use crate::model::note::NotePair;

impl MarkovChain {
    /// Walk the chain and produce exactly `length` note pairs.
    ///
    /// The walk starts from a random window of the training melody and
    /// follows recorded transitions; a context with no recorded successor is
    /// not an error — the walk silently jumps to a fresh random window and
    /// keeps going. All randomness comes from the caller's `rng`, so a
    /// seeded generator makes the output reproducible.
    pub fn generate<R: Rng>(&self, length: usize, rng: &mut R) -> Result<Vec<NotePair>, ChainError> {
        if length == 0 {
            return Err(ChainError::LengthZero);
        }
        if self.order() == 0 {
            return Err(ChainError::OrderZero);
        }
        // `train` guarantees the melody outlasts the order, but a persisted
        // model edited by hand may not.
        if self.training().len() < self.order() {
            return Err(ChainError::TrainingTooShort {
                order: self.order(),
                available: self.training().len(),
            });
        }

        let mut out = Vec::with_capacity(length);
        let mut context = self.reseed(&mut out, length, rng);

        while out.len() < length {
            match self.successors(&context) {
                Some(successors) if !successors.is_empty() => {
                    // Duplicates in the list weight the uniform draw.
                    let next = successors[rng.gen_range(0..successors.len())];
                    out.push(next);
                    context.remove(0);
                    context.push(next);
                }
                _ => context = self.reseed(&mut out, length, rng),
            }
        }

        Ok(out)
    }

    /// Jump to a uniformly random training window: emit its pairs (capped at
    /// `length` total) and return it as the new context.
    fn reseed<R: Rng>(&self, out: &mut Vec<NotePair>, length: usize, rng: &mut R) -> Vec<NotePair> {
        let last_offset = self.training().len() - self.order();
        let start = rng.gen_range(0..=last_offset);
        let window = &self.training()[start..start + self.order()];

        for &pair in window {
            if out.len() == length {
                break;
            }
            out.push(pair);
        }
        window.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::model::note::NoteEvent;
    use crate::model::timing::Timing;

    fn pair(pitch: u8) -> NotePair {
        NotePair::new(
            NoteEvent::new(pitch, 100, 120),
            NoteEvent::new(pitch, 0, 240),
        )
    }

    fn chain(notes: &[NotePair], order: usize) -> MarkovChain {
        MarkovChain::train(notes, order, Timing::default()).expect("train")
    }

    #[test]
    fn zero_length_is_rejected() {
        let c = chain(&[pair(60), pair(62)], 1);
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(c.generate(0, &mut rng).unwrap_err(), ChainError::LengthZero);
    }

    #[test]
    fn init_alone_satisfies_short_lengths() {
        // length <= order: the starting window is truncated and no chain
        // step ever runs.
        let c = chain(&[pair(60), pair(62), pair(64)], 2);
        let mut rng = StepRng::new(0, 0);
        let out = c.generate(1, &mut rng).expect("generate");
        assert_eq!(out, vec![pair(60)]);
    }

    #[test]
    fn walk_follows_recorded_transitions() {
        let notes = [pair(60), pair(62), pair(64), pair(65), pair(67)];
        let c = chain(&notes, 2);
        // An all-zeros rng starts at offset 0 and always picks successor 0.
        let mut rng = StepRng::new(0, 0);
        let out = c.generate(5, &mut rng).expect("generate");
        assert_eq!(out, notes);
    }

    #[test]
    fn exact_length_even_through_dead_ends() {
        // Two pairs, order 1: the only transition is p60 -> p62, and p62 is
        // the successor-less tail. Every other step dead-ends and re-seeds,
        // yet the walk still fills the requested length.
        let notes = [pair(60), pair(62)];
        let c = chain(&notes, 1);
        let mut rng = StepRng::new(0, 0);
        let out = c.generate(7, &mut rng).expect("generate");
        assert_eq!(
            out,
            vec![pair(60), pair(62), pair(60), pair(62), pair(60), pair(62), pair(60)]
        );
    }

    #[test]
    fn fixed_seed_reproduces_the_walk() {
        let notes = [pair(60), pair(62), pair(60), pair(64), pair(62), pair(67)];
        let c = chain(&notes, 2);

        let a = c.generate(40, &mut StdRng::seed_from_u64(7)).expect("generate");
        let b = c.generate(40, &mut StdRng::seed_from_u64(7)).expect("generate");
        assert_eq!(a, b);
    }
}
