//! Foundation module - core utilities and types
//!
//! This module provides fundamental utilities used throughout the toolkit:
//! - Geometry value types (sizes, screen positions)
//! - Logging utilities

pub mod geometry;
pub mod logging;
