//! Defines helper functions for processing the request path

/// Holder for `Request` URI path segments that have been split into individual raw segments.
///
/// Used internally by the `Router` when traversing its internal `Tree`. Segments are **not**
/// percent decoded here: literal segments are compared against the raw text and parameter values
/// are decoded only once a complete match has been found, so an encoded `%2F` can never introduce
/// an extra segment.
#[derive(Clone, Debug, PartialEq)]
pub struct RequestPathSegments<'a> {
    segments: Vec<&'a str>,
    custom_method_allowed: bool,
}

impl<'a> RequestPathSegments<'a> {
    /// Creates a new `RequestPathSegments` instance by splitting a `Request` URI path.
    ///
    /// A single leading `/` is ignored and the empty path has no segments at all. Empty segments
    /// elsewhere are kept, so a request path of `/some/path//handler` is split into:
    ///
    /// ```plain
    /// ["some", "path", "", "handler"]
    /// ```
    pub fn new(path: &'a str) -> Self {
        let path = path.strip_prefix('/').unwrap_or(path);

        let segments: Vec<&'a str> = if path.is_empty() {
            Vec::new()
        } else {
            path.split('/').collect()
        };

        // A custom method can only be addressed when the first colon of the path is found in the
        // final segment.
        let custom_method_allowed = match segments.split_last() {
            Some((_, init)) => !init.iter().any(|s| s.contains(':')),
            None => false,
        };

        RequestPathSegments {
            segments,
            custom_method_allowed,
        }
    }

    /// Provide the raw segments of the request path.
    pub fn segments(&self) -> &[&'a str] {
        &self.segments
    }

    /// True when a colon in the final segment may be treated as a custom method delimiter.
    pub fn custom_method_allowed(&self) -> bool {
        self.custom_method_allowed
    }
}
