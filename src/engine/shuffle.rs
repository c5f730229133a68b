use rand::Rng;
use rand::seq::SliceRandom;

/// How a collection's questions are sequenced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OrderMode {
    #[default]
    Shuffled,
    /// Identity order; entries are asked as they appear in the source.
    Sequential,
}

/// A uniform random permutation of `0..len` (Fisher–Yates).
pub fn shuffled_indices<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..len).collect();
    indices.shuffle(rng);
    indices
}

/// Permutation applied to a collection's natural index order.
///
/// Its length always matches the collection it was last built for; callers
/// check with [`PresentationOrder::ensure`] before indexing.
#[derive(Clone, Debug, Default)]
pub struct PresentationOrder {
    indices: Vec<usize>,
    mode: OrderMode,
}

impl PresentationOrder {
    pub fn new(mode: OrderMode) -> Self {
        Self {
            indices: Vec::new(),
            mode,
        }
    }

    pub fn is_stale(&self, len: usize) -> bool {
        self.indices.len() != len
    }

    /// Rebuild if the collection size changed. Returns true when a rebuild happened.
    pub fn ensure<R: Rng + ?Sized>(&mut self, len: usize, rng: &mut R) -> bool {
        if self.is_stale(len) {
            self.reshuffle(len, rng);
            true
        } else {
            false
        }
    }

    pub fn reshuffle<R: Rng + ?Sized>(&mut self, len: usize, rng: &mut R) {
        self.indices = match self.mode {
            OrderMode::Shuffled => shuffled_indices(len, rng),
            OrderMode::Sequential => (0..len).collect(),
        };
    }

    /// Collection index presented at position `i`, wrapping around.
    pub fn index_at(&self, i: usize) -> Option<usize> {
        if self.indices.is_empty() {
            return None;
        }
        Some(self.indices[i % self.indices.len()])
    }
}
