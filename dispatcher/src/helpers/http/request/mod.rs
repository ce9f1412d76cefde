//! Helpers for splitting incoming request data.

pub mod path;
