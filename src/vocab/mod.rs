pub mod entry;
pub mod source;
pub mod word_store;
