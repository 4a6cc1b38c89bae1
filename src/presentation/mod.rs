//! Presentation layer
//!
//! The non-interactive CLI surface over the application layer.

pub mod cli;
