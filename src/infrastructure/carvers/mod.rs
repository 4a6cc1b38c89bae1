//! File rebuilding

mod rebuilder;

pub use rebuilder::{RebuildError, Rebuilder};
