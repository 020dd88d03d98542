//! Tool contract for Troupe agents.
//!
//! A tool is a named callable described by a [`ToolSchema`] — a flat, ordered
//! map of coarse-typed parameters a model can fill in. Arguments proposed by
//! a model pass through [`coerce::coerce_arguments`] before invocation: a
//! best-effort normalization layer that warns about mismatches but never
//! blocks the call.

pub mod builtin;
pub mod coerce;
pub mod registry;
pub mod schema;

pub use coerce::coerce_arguments;
pub use registry::{FnTool, Tool, ToolRegistry};
pub use schema::{Param, ParamKind, ToolSchema};
