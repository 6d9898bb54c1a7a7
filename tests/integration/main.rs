//! Integration tests module
//!
//! Report pipeline scenarios against in-memory containers, and the
//! `wirescope` binary against snapshot files.

pub mod cli;
pub mod common;
pub mod scenarios;
