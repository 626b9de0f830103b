//! Shared utilities for the Hearth relay and its terminal client.

pub mod logger;
pub mod time;
