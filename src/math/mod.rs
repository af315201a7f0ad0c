//! Mathematical utilities: simple returns and Pearson correlation.

pub mod stats;

pub use stats::*;
