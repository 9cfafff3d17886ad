//! Shared utilities

pub mod terminal;

pub use terminal::{Logger, TerminalLogger};
