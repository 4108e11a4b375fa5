// xregscan - platform/mod.rs
//
// Platform abstraction layer: stdio/file selection and config discovery.
// Must NOT depend on: app.

pub mod config;
pub mod fs;
