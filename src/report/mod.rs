//! Report rendering: the spreadsheet artifact sent back to the requester.

pub mod xlsx;

pub use xlsx::*;
