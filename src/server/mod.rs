//! Composition root: wires concrete adapters into controllers and exposes
//! them over HTTP.

pub mod adapter;
pub mod decorators;
pub mod factories;
pub mod middlewares;
pub mod routes;
