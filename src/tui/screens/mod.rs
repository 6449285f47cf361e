//! TUI screens

pub mod tags;
