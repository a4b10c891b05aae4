//! Memory model for the interpreter
//!
//! This module provides the two stores a running program can touch:
//! - [`stack`]: the shared evaluation stack every operation consumes from
//! - [`space`]: the linear address space built up by `VARIABLE` declarations
//!
//! # Cell Semantics
//!
//! The language has exactly one value type, the [`Cell`]: a 64-bit signed
//! integer with two's-complement wrapping on overflow. Division and modulus
//! truncate toward zero, and `i64::MIN / -1` wraps rather than trapping.
//!
//! # Addresses
//!
//! Addresses are ordinary cells. A variable's base address is the total cell
//! count of everything declared before it, so the whole space is one gapless
//! sequence starting at 0. Nothing is ever freed or moved; the space only
//! grows.

pub mod space;
pub mod stack;

/// One addressable unit of storage, and the only value type in the language.
pub type Cell = i64;
