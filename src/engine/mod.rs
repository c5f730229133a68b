pub mod options;
pub mod shuffle;
