//! Helpers shared across layers.

pub mod net;
