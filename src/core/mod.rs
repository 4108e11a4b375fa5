// xregscan - core/mod.rs
//
// Core business logic layer.
// Must NOT depend on: platform, app, or open files directly.

pub mod classify;
pub mod filter;
pub mod model;
pub mod report;
