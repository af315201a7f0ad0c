//! Market-data access: the Yahoo Finance daily-close client.

pub mod yahoo;

pub use yahoo::*;
