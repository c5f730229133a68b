//! Vocabulary flashcard quiz: level word lists, a multiple-choice question
//! generator, resumable per-level practice and a wrong-answer notebook.
//!
//! The binary in `main.rs` owns the terminal; everything else lives here so
//! integration tests and benchmarks can drive the sessions directly.

pub mod app;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod logging;
pub mod session;
pub mod store;
pub mod ui;
pub mod vocab;
