//! Shelf application library
//!
//! Wires the project modules into the kernel registry and runs the HTTP server.

pub mod app;
pub mod modules;

pub use app::{build_registry, run};
