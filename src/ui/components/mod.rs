pub mod confirm_dialog;
pub mod level_progress;
pub mod menu;
pub mod notebook_list;
pub mod question_card;
