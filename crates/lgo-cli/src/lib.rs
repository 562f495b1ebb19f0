//! The solver driver: a line-oriented REPL (`r`/`h`/`i`) around
//! `lgo_engine::Searcher`, plus the startup-option parsing that picks the
//! root board size, initial window, and engine knobs.

pub mod command;
pub mod config;
pub mod engine;
pub mod error;

pub use command::Command;
pub use config::SolverConfig;
pub use engine::SolverEngine;
pub use error::DriverError;
