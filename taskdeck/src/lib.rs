//! `TaskDeck` — terminal task tracker library.

pub mod app;
pub mod config;
pub mod gateway;
pub mod modal;
pub mod store;
pub mod ui;
pub mod view;
