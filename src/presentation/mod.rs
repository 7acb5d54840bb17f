//! HTTP-agnostic controllers and the values they exchange.

pub mod controllers;
pub mod errors;
pub mod helpers;
pub mod protocols;
