//! Report export: placement table as CSV, scene summary as JSON.

pub mod csv;
pub mod json;
