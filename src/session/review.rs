use rand::rngs::SmallRng;

use crate::engine::shuffle::{OrderMode, PresentationOrder};
use crate::session::question::{AnswerOutcome, Phase, QuestionCard};
use crate::store::persistence::Persistence;
use crate::store::schema::WrongEntry;
use crate::vocab::word_store::WordStore;

/// Endless review loop over the wrong notebook.
///
/// The notebook is read-only here: answers never add or remove entries, and
/// no cursor is persisted.
pub struct ReviewSession {
    index: usize,
    order: PresentationOrder,
    current: Option<WrongEntry>,
    card: Option<QuestionCard>,
    rng: SmallRng,
}

impl ReviewSession {
    pub fn new(order_mode: OrderMode, rng: SmallRng) -> Self {
        Self {
            index: 0,
            order: PresentationOrder::new(order_mode),
            current: None,
            card: None,
            rng,
        }
    }

    pub fn phase(&self) -> Phase {
        self.card.as_ref().map_or(Phase::Idle, QuestionCard::phase)
    }

    pub fn question(&self) -> Option<&QuestionCard> {
        self.card.as_ref()
    }

    /// Notebook record behind the current question, with its level tag.
    pub fn current_entry(&self) -> Option<&WrongEntry> {
        self.current.as_ref()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Start from the first position. Returns false (and stays idle) for an empty notebook.
    pub fn start(&mut self, words: &WordStore, storage: &Persistence) -> bool {
        let notebook = storage.read_wrong_notebook();
        if notebook.is_empty() {
            self.stop();
            return false;
        }
        self.order.ensure(notebook.len(), &mut self.rng);
        self.index = 0;
        tracing::debug!(size = notebook.len(), "starting review");
        self.show_question(words, notebook.entries())
    }

    /// Nothing changes in the notebook, whatever the answer.
    pub fn submit_answer(&mut self, choice: usize) -> Option<AnswerOutcome> {
        self.card.as_mut()?.answer(choice)
    }

    /// Next question; after the last one the order is reshuffled and review wraps to the start.
    pub fn advance(&mut self, words: &WordStore, storage: &Persistence) -> bool {
        if self.phase() != Phase::AnswerRevealed {
            return false;
        }
        let notebook = storage.read_wrong_notebook();
        if notebook.is_empty() {
            self.stop();
            return false;
        }

        if self.order.ensure(notebook.len(), &mut self.rng) {
            self.index = 0;
        } else {
            self.index += 1;
            if self.index >= notebook.len() {
                self.order.reshuffle(notebook.len(), &mut self.rng);
                self.index = 0;
            }
        }
        self.show_question(words, notebook.entries())
    }

    pub fn stop(&mut self) {
        self.index = 0;
        self.current = None;
        self.card = None;
    }

    fn show_question(&mut self, words: &WordStore, entries: &[WrongEntry]) -> bool {
        let Some(entry) = self.order.index_at(self.index).and_then(|i| entries.get(i)) else {
            self.stop();
            return false;
        };
        self.card = Some(QuestionCard::new(
            &entry.to_vocab(),
            words.combined_pool(),
            self.index,
            entries.len(),
            &mut self.rng,
        ));
        self.current = Some(entry.clone());
        true
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;
    use crate::session::notebook::{add_to_notebook, clear_notebook};
    use crate::store::memory::MemoryStore;
    use crate::vocab::entry::{LevelDef, LevelId, VocabEntry};

    fn words() -> WordStore {
        WordStore::from_levels(vec![(
            LevelDef::new("level1", "Level 1", "builtin:level1.csv"),
            vec![
                VocabEntry::new("cat", "猫"),
                VocabEntry::new("dog", "狗"),
                VocabEntry::new("bird", "鳥"),
                VocabEntry::new("fish", "魚"),
            ],
        )])
    }

    fn storage() -> Persistence {
        Persistence::new(Box::new(MemoryStore::new()))
    }

    fn session() -> ReviewSession {
        ReviewSession::new(OrderMode::Sequential, SmallRng::seed_from_u64(4))
    }

    fn answer_wrong(review: &mut ReviewSession) {
        let card = review.question().unwrap();
        let correct = card.correct_option().unwrap();
        let wrong = (correct + 1) % card.options.len();
        review.submit_answer(wrong).unwrap();
    }

    #[test]
    fn empty_notebook_does_not_start() {
        let (words, storage) = (words(), storage());
        let mut review = session();
        assert!(!review.start(&words, &storage));
        assert_eq!(review.phase(), Phase::Idle);
    }

    #[test]
    fn cleared_notebook_does_not_start() {
        let (words, storage) = (words(), storage());
        add_to_notebook(&storage, &VocabEntry::new("cat", "猫"), None);
        clear_notebook(&storage);
        let mut review = session();
        assert!(!review.start(&words, &storage));
        assert!(review.question().is_none());
    }

    #[test]
    fn single_entry_wraps_to_itself() {
        let (words, storage) = (words(), storage());
        let level = LevelId::new("level1");
        add_to_notebook(&storage, &VocabEntry::new("dog", "狗"), Some(&level));

        let mut review = session();
        assert!(review.start(&words, &storage));
        assert_eq!(review.index(), 0);
        answer_wrong(&mut review);
        assert!(review.advance(&words, &storage));
        assert_eq!(review.index(), 0);
        assert_eq!(review.question().unwrap().entry.term, "dog");
        assert_eq!(review.current_entry().unwrap().level, Some(level));
    }

    #[test]
    fn answers_do_not_touch_the_notebook() {
        let (words, storage) = (words(), storage());
        add_to_notebook(&storage, &VocabEntry::new("cat", "猫"), None);
        add_to_notebook(&storage, &VocabEntry::new("dog", "狗"), None);

        let mut review = session();
        review.start(&words, &storage);
        answer_wrong(&mut review);
        review.advance(&words, &storage);
        let correct = review.question().unwrap().correct_option().unwrap();
        assert!(review.submit_answer(correct).unwrap().correct);
        assert_eq!(storage.read_wrong_notebook().len(), 2);
    }

    #[test]
    fn passes_loop_endlessly() {
        let (words, storage) = (words(), storage());
        for (term, translation) in [("cat", "猫"), ("dog", "狗"), ("bird", "鳥")] {
            add_to_notebook(&storage, &VocabEntry::new(term, translation), None);
        }

        let mut review = session();
        review.start(&words, &storage);
        let mut terms = Vec::new();
        for _ in 0..6 {
            terms.push(review.question().unwrap().entry.term.clone());
            answer_wrong(&mut review);
            assert!(review.advance(&words, &storage));
        }
        assert_eq!(terms, vec!["cat", "dog", "bird", "cat", "dog", "bird"]);
    }

    #[test]
    fn start_always_restarts_at_zero() {
        let (words, storage) = (words(), storage());
        add_to_notebook(&storage, &VocabEntry::new("cat", "猫"), None);
        add_to_notebook(&storage, &VocabEntry::new("dog", "狗"), None);

        let mut review = session();
        review.start(&words, &storage);
        answer_wrong(&mut review);
        review.advance(&words, &storage);
        assert_eq!(review.index(), 1);
        review.start(&words, &storage);
        assert_eq!(review.index(), 0);
    }

    #[test]
    fn notebook_change_restarts_the_pass() {
        let (words, storage) = (words(), storage());
        add_to_notebook(&storage, &VocabEntry::new("cat", "猫"), None);
        add_to_notebook(&storage, &VocabEntry::new("dog", "狗"), None);

        let mut review = session();
        review.start(&words, &storage);
        add_to_notebook(&storage, &VocabEntry::new("fish", "魚"), None);
        answer_wrong(&mut review);
        review.advance(&words, &storage);
        assert_eq!(review.index(), 0);
        assert_eq!(review.question().unwrap().total, 3);
    }

    #[test]
    fn emptied_notebook_ends_review_on_advance() {
        let (words, storage) = (words(), storage());
        add_to_notebook(&storage, &VocabEntry::new("cat", "猫"), None);

        let mut review = session();
        review.start(&words, &storage);
        clear_notebook(&storage);
        answer_wrong(&mut review);
        assert!(!review.advance(&words, &storage));
        assert_eq!(review.phase(), Phase::Idle);
    }
}
