//! Document store persistence.

mod account_repository;
mod database;
mod log_repository;

pub use account_repository::*;
pub use database::*;
pub use log_repository::*;
