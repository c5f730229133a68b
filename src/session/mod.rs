pub mod notebook;
pub mod question;
pub mod quiz;
pub mod review;
pub mod summary;
