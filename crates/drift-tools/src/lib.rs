//! Tooling primitives for drift behavior trees.
//!
//! Engine-agnostic. Inspectors and debug drawing should consume `TraceLog` rather than reach
//! into tree internals.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod trace;

pub use trace::{NullTraceSink, TraceEvent, TraceHost, TraceLog, TraceSink, VecTraceSink};
