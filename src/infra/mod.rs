//! Outbound adapters.

pub mod cryptography;
pub mod db;
