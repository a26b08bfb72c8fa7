//! Type-safe wrappers and enums for nflverse export parameters.

pub mod dataset;
pub mod levels;
pub mod time;
