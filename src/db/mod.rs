pub mod connection;
pub mod errors;
pub mod queries;
pub mod tables;

pub use connection::*;
pub use errors::*;
