//! CLI library components for labrange.

pub mod logging;
pub mod render;
