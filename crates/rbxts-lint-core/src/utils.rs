//! Utility functions for rule implementations.

pub mod truthiness;
pub mod types;

// Re-export commonly used utilities for rule implementations
#[doc(inline)]
pub use truthiness::truthiness_sites;
#[doc(inline)]
pub use types::{is_definitely, is_possibly};
