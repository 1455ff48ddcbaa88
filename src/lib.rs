//! MonoDiff library
//!
//! Turns the edit script of a two-sided text/JSON comparison into a
//! navigable presentation model: unified and side-by-side views, collapsible
//! unchanged context with stable line numbering, sentence-bounded windows for
//! inline diffs, and wrap-around change navigation.

pub mod config;
pub mod constant;
pub mod engine;
pub mod json;
pub mod render;
