//! `TaskDeck` task API server library.
//!
//! Exposes the in-memory task server for use in tests and embedding.
//! The server speaks the JSON task protocol from `taskdeck-proto` over
//! a small REST surface.

pub mod config;
pub mod server;
pub mod store;
