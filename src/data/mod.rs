//! Input data handling: compatibility matrices and per-node attributes

pub mod attributes;
pub mod matrix;

pub use attributes::{load_attributes, parse_attributes};
pub use matrix::{load_compatibility_matrix, CompatibilityMatrix};
