//! Shared helpers for the runnable candela examples.

pub mod common;
