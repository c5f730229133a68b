use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};

use crate::config::Config;
use crate::session::notebook::{clear_notebook, remove_from_notebook};
use crate::session::question::{AnswerOutcome, Phase, QuestionCard};
use crate::session::quiz::QuizSession;
use crate::session::review::ReviewSession;
use crate::session::summary::{LevelProgress, progress_summary};
use crate::store::persistence::Persistence;
use crate::store::schema::WrongNotebook;
use crate::ui::components::menu::{Menu, MenuAction};
use crate::ui::theme::Theme;
use crate::vocab::entry::LevelId;
use crate::vocab::word_store::WordStore;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Menu,
    Quiz,
    Review,
    Notebook,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfirmAction {
    ClearNotebook,
    RemoveEntry(usize),
}

pub struct App {
    pub screen: AppScreen,
    pub words: WordStore,
    pub storage: Persistence,
    pub quiz: QuizSession,
    pub review: ReviewSession,
    pub menu: Menu<'static>,
    pub theme: &'static Theme,
    pub config: Config,
    pub should_quit: bool,
    pub notebook_selected: usize,
    pub confirm: Option<ConfirmAction>,
    pub status: Option<String>,
    progress: Vec<LevelProgress>,
    notebook: WrongNotebook,
}

impl App {
    pub fn new(
        config: Config,
        words: WordStore,
        storage: Persistence,
        theme: &'static Theme,
        mut rng: SmallRng,
    ) -> Self {
        let order_mode = config.order_mode();
        let quiz = QuizSession::new(order_mode, SmallRng::seed_from_u64(rng.next_u64()));
        let review = ReviewSession::new(order_mode, SmallRng::seed_from_u64(rng.next_u64()));
        let progress = progress_summary(&words, &storage);
        let notebook = storage.read_wrong_notebook();
        let menu = Menu::new(theme, &progress);

        Self {
            screen: AppScreen::Menu,
            words,
            storage,
            quiz,
            review,
            menu,
            theme,
            config,
            should_quit: false,
            notebook_selected: 0,
            confirm: None,
            status: None,
            progress,
            notebook,
        }
    }

    pub fn progress(&self) -> &[LevelProgress] {
        &self.progress
    }

    pub fn notebook(&self) -> &WrongNotebook {
        &self.notebook
    }

    /// The question open on the current screen, if any.
    pub fn current_question(&self) -> Option<&QuestionCard> {
        match self.screen {
            AppScreen::Quiz => self.quiz.question(),
            AppScreen::Review => self.review.question(),
            _ => None,
        }
    }

    pub fn run_menu_action(&mut self, action: MenuAction) {
        match action {
            MenuAction::StartLevel(level) => self.start_level(&level),
            MenuAction::Review => self.start_review(),
            MenuAction::Notebook => self.go_to_notebook(),
            MenuAction::Quit => self.should_quit = true,
        }
    }

    pub fn start_level(&mut self, level: &LevelId) {
        self.review.stop();
        if self.quiz.start_level(&self.words, &self.storage, level) {
            self.status = None;
            self.screen = AppScreen::Quiz;
        } else {
            self.status = Some(format!("{} has no words to practice.", self.words.level_name(level)));
            self.screen = AppScreen::Menu;
        }
    }

    pub fn start_review(&mut self) {
        self.quiz.stop();
        if self.review.start(&self.words, &self.storage) {
            self.status = None;
            self.screen = AppScreen::Review;
        } else {
            self.status = Some("No wrong items to review.".to_string());
            self.screen = AppScreen::Menu;
        }
    }

    /// Answer the open question with the zero-based option `choice`.
    pub fn submit_answer(&mut self, choice: usize) -> Option<AnswerOutcome> {
        let outcome = match self.screen {
            AppScreen::Quiz => self.quiz.submit_answer(&self.storage, choice),
            AppScreen::Review => self.review.submit_answer(choice),
            _ => None,
        };
        if outcome.is_some() {
            self.refresh();
        }
        outcome
    }

    /// Whether "I guessed" would save the open quiz question.
    pub fn can_mark_guessed(&self) -> bool {
        self.screen == AppScreen::Quiz && self.quiz.can_mark_for_review()
    }

    pub fn mark_for_review(&mut self) {
        if self.screen != AppScreen::Quiz {
            return;
        }
        if self.quiz.mark_for_review(&self.storage) {
            self.refresh();
        }
    }

    pub fn advance(&mut self) {
        match self.screen {
            AppScreen::Quiz => {
                if self.quiz.advance(&self.words, &self.storage) {
                    self.refresh();
                }
            }
            AppScreen::Review => {
                if self.review.phase() != Phase::AnswerRevealed {
                    return;
                }
                if !self.review.advance(&self.words, &self.storage) {
                    self.status = Some("No wrong items to review.".to_string());
                    self.go_to_menu();
                }
            }
            _ => {}
        }
    }

    pub fn go_to_menu(&mut self) {
        self.quiz.stop();
        self.review.stop();
        self.confirm = None;
        self.refresh();
        self.screen = AppScreen::Menu;
    }

    pub fn go_to_notebook(&mut self) {
        self.quiz.stop();
        self.review.stop();
        self.refresh();
        self.notebook_selected = 0;
        self.screen = AppScreen::Notebook;
    }

    pub fn notebook_next(&mut self) {
        if self.notebook_selected + 1 < self.notebook.len() {
            self.notebook_selected += 1;
        }
    }

    pub fn notebook_prev(&mut self) {
        self.notebook_selected = self.notebook_selected.saturating_sub(1);
    }

    pub fn request_remove(&mut self) {
        if self.notebook_selected < self.notebook.len() {
            self.confirm = Some(ConfirmAction::RemoveEntry(self.notebook_selected));
        }
    }

    pub fn request_clear(&mut self) {
        if !self.notebook.is_empty() {
            self.confirm = Some(ConfirmAction::ClearNotebook);
        }
    }

    pub fn confirm_message(&self) -> Option<String> {
        match self.confirm? {
            ConfirmAction::ClearNotebook => Some("Clear all wrong items?".to_string()),
            ConfirmAction::RemoveEntry(index) => self
                .notebook
                .get(index)
                .map(|e| format!("Remove #{} \"{}\"?", index + 1, e.term)),
        }
    }

    /// Carry out the pending confirmation, if any.
    pub fn confirm_yes(&mut self) {
        match self.confirm.take() {
            Some(ConfirmAction::ClearNotebook) => self.clear_notebook(),
            Some(ConfirmAction::RemoveEntry(index)) => self.remove_entry(index),
            None => {}
        }
    }

    pub fn confirm_no(&mut self) {
        self.confirm = None;
    }

    fn clear_notebook(&mut self) {
        clear_notebook(&self.storage);
        self.review.stop();
        self.notebook_selected = 0;
        self.status = Some("Wrong notebook cleared.".to_string());
        self.refresh();
    }

    fn remove_entry(&mut self, index: usize) {
        let Some(entry) = self.notebook.get(index).map(|e| e.to_vocab()) else {
            return;
        };
        if remove_from_notebook(&self.storage, &entry) {
            self.status = Some(format!("Removed \"{}\".", entry.term));
        }
        self.refresh();
        if self.notebook_selected >= self.notebook.len() {
            self.notebook_selected = self.notebook.len().saturating_sub(1);
        }
    }

    fn refresh(&mut self) {
        self.progress = progress_summary(&self.words, &self.storage);
        self.notebook = self.storage.read_wrong_notebook();
        self.menu.update_progress(&self.progress);
    }
}
