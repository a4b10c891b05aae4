//! Program execution
//!
//! This module drives a parsed program:
//! - [`engine`]: the [`engine::Machine`] and per-statement execution
//! - [`debug`]: comment-carried debug directives
//! - [`errors`]: runtime error types
//!
//! # Execution Model
//!
//! The machine walks the statement list in order, once. There is no main
//! entry point and no call stack: functions are expanded inline where they
//! are named, on the shared evaluation stack and the shared address space.
//! `QUIT` stops the walk early and still counts as success. The first
//! runtime error aborts the run; nothing already done is rolled back.

pub mod debug;
pub mod engine;
pub mod errors;
