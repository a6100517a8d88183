//! lanchat server library.
//! This crate exposes internal modules for integration testing.
//! The binary entry point is in main.rs.

pub mod broadcast;
pub mod commands;
pub mod config;
pub mod history;
pub mod protocol;
pub mod registry;
pub mod session;
pub mod state;
