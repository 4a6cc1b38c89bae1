//! Console + file logging backend.

mod dual_sink;

pub use dual_sink::DualLogSink;
