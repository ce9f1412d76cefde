//! Errors reported while registering routes.
//!
//! Every error is raised synchronously by `RouterBuilder::add`; nothing is deferred until the
//! router is built or a request is resolved. Failing to find a route for a request is not an
//! error, see `Router::resolve`.
use hyper::Method;
use thiserror::Error;

/// A route could not be registered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// The pattern is not well formed.
    #[error("invalid path pattern `{pattern}`: {fault}")]
    InvalidPattern {
        /// The pattern as supplied to the builder.
        pattern: String,
        /// What is wrong with it.
        fault: PatternFault,
    },

    /// A structurally identical route is already registered for the same method.
    #[error("duplicate {method} route `{pattern}` conflicts with `{existing}`")]
    DuplicateRoute {
        /// HTTP method of both routes.
        method: Method,
        /// The pattern being registered.
        pattern: String,
        /// The pattern registered first.
        existing: String,
    },
}

/// The specific validation failure of a path pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternFault {
    /// Two consecutive `/`, or a trailing `/`.
    #[error("empty path segment")]
    EmptySegment,

    /// A segment starting with `{` which does not end with `}`.
    #[error("malformed parameter segment `{0}`")]
    MalformedParameter(String),

    /// A parameter name that is empty or uses a reserved character.
    #[error("invalid parameter name `{0}`")]
    InvalidParameterName(String),

    /// A literal segment containing one of `? # [ ] { }`.
    #[error("reserved character `{character}` in segment `{segment}`")]
    ReservedCharacter {
        /// The offending segment.
        segment: String,
        /// The reserved character found.
        character: char,
    },

    /// A custom method delimiter outside of the final segment.
    #[error("custom method in non-final segment `{0}`")]
    CustomMethodNotLast(String),

    /// More than one custom method delimiter in the final segment.
    #[error("more than one custom method in segment `{0}`")]
    MultipleCustomMethods(String),

    /// The same parameter name used twice in one pattern.
    #[error("parameter `{0}` bound more than once")]
    DuplicateParameterName(String),

    /// A custom method which is, or contains, a parameter.
    #[error("parameter in custom method `{0}`")]
    ParameterInCustomMethod(String),
}

impl RouteError {
    pub(crate) fn invalid(pattern: &str, fault: PatternFault) -> Self {
        RouteError::InvalidPattern {
            pattern: pattern.to_owned(),
            fault,
        }
    }
}
