use std::collections::HashSet;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::vocab::entry::VocabEntry;

/// Maximum number of wrong options shown next to the correct one.
pub const DISTRACTOR_COUNT: usize = 4;

/// Multiple-choice options for `correct`, drawn from `pool`.
///
/// Distractors never share the correct translation, and no two distractors
/// share a translation with each other. With a small pool the result simply
/// has fewer options.
pub fn build_options<R: Rng + ?Sized>(
    correct: &VocabEntry,
    pool: &[VocabEntry],
    rng: &mut R,
) -> Vec<VocabEntry> {
    let mut candidates: Vec<&VocabEntry> = pool
        .iter()
        .filter(|entry| entry.translation != correct.translation)
        .collect();
    candidates.shuffle(rng);

    let mut seen: HashSet<&str> = HashSet::with_capacity(DISTRACTOR_COUNT);
    let mut options: Vec<VocabEntry> = candidates
        .into_iter()
        .filter(|entry| seen.insert(entry.translation.as_str()))
        .take(DISTRACTOR_COUNT)
        .cloned()
        .collect();

    options.push(correct.clone());
    options.shuffle(rng);
    options
}
