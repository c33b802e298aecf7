//! Query processing.
//!
//! - [`resolver`] - longest-prefix-match selection over a [`crate::registry::Registry`]

mod resolver;

// Re-export public functions
pub use resolver::{
    resolve, resolve_all, resolve_with, DefaultRoute, ResolutionResult, ResolutionSummary,
};
