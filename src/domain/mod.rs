//! Business models and the use cases the application offers.

pub mod models;
pub mod usecases;

pub use models::*;
pub use usecases::*;
