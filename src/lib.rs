// ABOUTME: Library root for berth - engine client, model, and CLI helpers.
// ABOUTME: The main binary is in main.rs.

pub mod config;
pub mod engine;
pub mod error;
pub mod http;
pub mod model;
pub mod output;
pub mod types;
