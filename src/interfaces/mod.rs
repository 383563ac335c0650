//! Operator-facing surfaces.

pub mod console;
