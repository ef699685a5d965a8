// ABOUTME: Library crate for anonmode exposing the actions, TUI state and host boundary
// The binary and the integration tests both build on this

pub mod actions;
pub mod app;
pub mod components;
pub mod config;
pub mod headless;
pub mod host;
pub mod orchestrator;
pub mod session;
pub mod tools;
