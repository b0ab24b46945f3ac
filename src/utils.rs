//! Utility functions for numeric casts and frame-to-tensor conversion.

pub mod image_conversion;
pub mod safe_cast;
