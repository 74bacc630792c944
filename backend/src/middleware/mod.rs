//! Request middleware.
//!
//! Purpose: cross-cutting request lifecycle concerns; currently the trace
//! identifier scope shared by logs and error payloads.

pub mod trace;

pub use trace::Trace;
