//! Memory domain
//!
//! Stack frame, tracked globals and a summary for everything else, with the
//! load/store semantics and the call-boundary transforms over them.

pub mod domain;

pub use domain::{call_result, classify_call, AbstractMemoryState, BlockContent, CallKind, Cell};
