pub mod db;
pub mod models;
pub mod queries;
pub mod sql;
pub mod tables;

mod error;

pub use error::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;
