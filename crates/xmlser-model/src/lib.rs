//! Host object model for xmlser.
//!
//! Templates only need an abstract lookup capability from the objects they
//! render. This crate provides a ready-made dynamic [`Value`] for callers that
//! build their data on the fly or receive it as JSON.

pub mod value;

pub use value::{Fields, Value};
