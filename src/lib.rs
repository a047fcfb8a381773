// src/lib.rs — Library root for roas-dash

pub mod cli;
pub mod client;
pub mod infra;
pub mod predict;
pub mod session;
pub mod tui;
