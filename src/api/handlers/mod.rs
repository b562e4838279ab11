// Thin handlers: validate input, call domain logic, map errors to HTTP

pub mod indicators;
pub mod rankings;
pub mod reviews;
