//! Helpers for processing raw request data before and after routing.

pub mod http;
