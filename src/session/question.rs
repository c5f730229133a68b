use rand::Rng;

use crate::engine::options::build_options;
use crate::vocab::entry::VocabEntry;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    QuestionShown,
    AnswerRevealed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub selected: usize,
    pub correct: bool,
}

/// One multiple-choice question and the learner's answer to it, if any.
#[derive(Clone, Debug)]
pub struct QuestionCard {
    pub entry: VocabEntry,
    pub options: Vec<VocabEntry>,
    /// Zero-based position within the current pass.
    pub position: usize,
    pub total: usize,
    outcome: Option<AnswerOutcome>,
    saved_to_notebook: bool,
}

impl QuestionCard {
    pub fn new<R: Rng + ?Sized>(
        entry: &VocabEntry,
        pool: &[VocabEntry],
        position: usize,
        total: usize,
        rng: &mut R,
    ) -> Self {
        Self {
            entry: entry.clone(),
            options: build_options(entry, pool, rng),
            position,
            total,
            outcome: None,
            saved_to_notebook: false,
        }
    }

    pub fn phase(&self) -> Phase {
        if self.outcome.is_some() {
            Phase::AnswerRevealed
        } else {
            Phase::QuestionShown
        }
    }

    pub fn outcome(&self) -> Option<AnswerOutcome> {
        self.outcome
    }

    pub fn is_answered(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn saved_to_notebook(&self) -> bool {
        self.saved_to_notebook
    }

    pub(crate) fn mark_saved(&mut self) {
        self.saved_to_notebook = true;
    }

    pub fn correct_option(&self) -> Option<usize> {
        self.options
            .iter()
            .position(|o| o.translation == self.entry.translation)
    }

    /// Lock in an answer. Ignored once answered or when `choice` is out of range.
    pub(crate) fn answer(&mut self, choice: usize) -> Option<AnswerOutcome> {
        if self.outcome.is_some() {
            return None;
        }
        let selected = self.options.get(choice)?;
        let outcome = AnswerOutcome {
            selected: choice,
            correct: selected.translation == self.entry.translation,
        };
        self.outcome = Some(outcome);
        Some(outcome)
    }

    pub fn feedback(&self) -> Option<String> {
        self.outcome.map(|o| {
            if o.correct {
                "Correct!".to_string()
            } else {
                format!("Wrong! Correct answer: {}", self.entry.translation)
            }
        })
    }
}
