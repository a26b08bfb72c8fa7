//! Core utilities for the nflverse exporter
//!
//! This module consolidates plumbing shared across commands:
//! - `http`: HTTP client construction
//! - `logging`: tracing subscriber setup

pub mod http;
pub mod logging;

pub use http::build_client;
pub use logging::init_logging;
