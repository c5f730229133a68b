use std::collections::HashMap;

use rand::rngs::SmallRng;

use crate::engine::shuffle::{OrderMode, PresentationOrder};
use crate::session::notebook::add_to_notebook;
use crate::session::question::{AnswerOutcome, Phase, QuestionCard};
use crate::store::persistence::Persistence;
use crate::vocab::entry::LevelId;
use crate::vocab::word_store::WordStore;

/// Level practice: resume at the stored cursor, answer, advance, persist.
pub struct QuizSession {
    level: Option<LevelId>,
    index: usize,
    resumed_from: usize,
    card: Option<QuestionCard>,
    /// Kept per level for the whole process so repeated visits keep their order.
    orders: HashMap<LevelId, PresentationOrder>,
    order_mode: OrderMode,
    rng: SmallRng,
}

impl QuizSession {
    pub fn new(order_mode: OrderMode, rng: SmallRng) -> Self {
        Self {
            level: None,
            index: 0,
            resumed_from: 0,
            card: None,
            orders: HashMap::new(),
            order_mode,
            rng,
        }
    }

    pub fn phase(&self) -> Phase {
        self.card.as_ref().map_or(Phase::Idle, QuestionCard::phase)
    }

    pub fn question(&self) -> Option<&QuestionCard> {
        self.card.as_ref()
    }

    pub fn level(&self) -> Option<&LevelId> {
        self.level.as_ref()
    }

    /// Index into the presentation order of the current question.
    pub fn index(&self) -> usize {
        self.index
    }

    /// One-based position this session resumed from.
    pub fn resumed_from(&self) -> usize {
        self.resumed_from + 1
    }

    /// Begin (or resume) practice on `level`. An unknown or empty level stays idle.
    pub fn start_level(&mut self, words: &WordStore, storage: &Persistence, level: &LevelId) -> bool {
        let len = words.entries(level).len();
        if words.level(level).is_none() || len == 0 {
            tracing::warn!(%level, "cannot start level without entries");
            self.stop();
            return false;
        }

        let cursor = storage.read_progress().cursor(level);
        self.level = Some(level.clone());
        self.index = cursor % len;
        self.resumed_from = self.index;
        tracing::debug!(%level, index = self.index, "starting level");
        self.show_question(words)
    }

    /// Returns `None` when no question is open or it was already answered.
    pub fn submit_answer(&mut self, storage: &Persistence, choice: usize) -> Option<AnswerOutcome> {
        let card = self.card.as_mut()?;
        let outcome = card.answer(choice)?;
        if !outcome.correct {
            add_to_notebook(storage, &card.entry, self.level.as_ref());
            card.mark_saved();
        }
        Some(outcome)
    }

    /// True once the open question was answered correctly and not yet saved.
    pub fn can_mark_for_review(&self) -> bool {
        self.card
            .as_ref()
            .is_some_and(|card| card.outcome().is_some_and(|o| o.correct) && !card.saved_to_notebook())
    }

    /// "I guessed": keep a correctly answered question for review anyway.
    pub fn mark_for_review(&mut self, storage: &Persistence) -> bool {
        if !self.can_mark_for_review() {
            return false;
        }
        let Some(card) = self.card.as_mut() else {
            return false;
        };
        add_to_notebook(storage, &card.entry, self.level.as_ref());
        card.mark_saved();
        true
    }

    /// Move to the next question, persisting the new cursor first.
    pub fn advance(&mut self, words: &WordStore, storage: &Persistence) -> bool {
        if self.phase() != Phase::AnswerRevealed {
            return false;
        }
        let Some(level) = self.level.clone() else {
            return false;
        };
        let len = words.entries(&level).len();
        if len == 0 {
            self.stop();
            return false;
        }

        self.index = (self.index + 1) % len;
        let mut progress = storage.read_progress();
        progress.set_cursor(&level, self.index);
        if let Err(err) = storage.write_progress(&progress) {
            tracing::warn!(%err, %level, "failed to save progress");
        }
        self.show_question(words)
    }

    pub fn stop(&mut self) {
        self.level = None;
        self.card = None;
        self.index = 0;
        self.resumed_from = 0;
    }

    fn show_question(&mut self, words: &WordStore) -> bool {
        let Some(level) = self.level.as_ref() else {
            return false;
        };
        let entries = words.entries(level);
        let order_mode = self.order_mode;
        let order = self
            .orders
            .entry(level.clone())
            .or_insert_with(|| PresentationOrder::new(order_mode));
        order.ensure(entries.len(), &mut self.rng);

        let Some(entry) = order.index_at(self.index).and_then(|i| entries.get(i)) else {
            self.card = None;
            return false;
        };
        self.card = Some(QuestionCard::new(
            entry,
            words.combined_pool(),
            self.index % entries.len(),
            entries.len(),
            &mut self.rng,
        ));
        true
    }
}
