pub mod champions;
pub mod indicators;
pub mod reviews;
