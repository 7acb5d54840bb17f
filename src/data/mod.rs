//! Use case implementations and what they need from the outside world.

pub mod protocols;
pub mod usecases;
