//! Data models

pub mod scan;
pub mod report;

pub use scan::*;
pub use report::*;
