// ABOUTME: Tool-presence probing for the external programs the actions depend on

pub mod probe;

pub use probe::{anonsurf_present, probe, ToolAvailability};
