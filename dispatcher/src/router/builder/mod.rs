//! Defines a builder API for constructing a `Router`.

use hyper::Method;
use log::debug;

use crate::config::{DuplicatePolicy, RouterConfig};
use crate::error::RouteError;
use crate::router::tree::segment::PathPattern;
use crate::router::tree::TreeBuilder;
use crate::router::Router;

/// Collects routes and builds an immutable `Router` from them.
///
/// Every pattern is validated as it is added, so all registration errors surface from `add`
/// and `build` cannot fail.
///
/// ```rust
/// use endpoints_dispatcher::{Method, RouteError, RouterBuilder};
///
/// # fn main() -> Result<(), RouteError> {
/// let builder = RouterBuilder::strict().add(Method::GET, "test/{a}/path", 1)?;
///
/// match builder.add(Method::GET, "test/{b}/path", 2) {
///     Err(RouteError::DuplicateRoute { existing, .. }) => assert_eq!(existing, "test/{a}/path"),
///     _ => panic!("duplicate route was accepted"),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct RouterBuilder<T> {
    tree_builder: TreeBuilder<T>,
}

impl<T> RouterBuilder<T> {
    /// Creates a builder which rejects structurally duplicate routes.
    pub fn strict() -> Self {
        Self::with_policy(DuplicatePolicy::Strict)
    }

    /// Creates a builder which accepts structurally duplicate routes.
    ///
    /// Which of the duplicates a request resolves to is unspecified.
    pub fn lax() -> Self {
        Self::with_policy(DuplicatePolicy::Lax)
    }

    /// Creates a builder from `RouterConfig`.
    pub fn with_config(config: &RouterConfig) -> Self {
        Self::with_policy(config.duplicates)
    }

    fn with_policy(policy: DuplicatePolicy) -> Self {
        RouterBuilder {
            tree_builder: TreeBuilder::new(policy),
        }
    }

    /// Registers `value` for `method` requests whose path matches `pattern`.
    ///
    /// Fails when the pattern is malformed or, under `DuplicatePolicy::Strict`, when a
    /// structurally identical route exists for the same method.
    pub fn add(mut self, method: Method, pattern: &str, value: T) -> Result<Self, RouteError> {
        let pattern = PathPattern::parse(pattern)?;
        self.tree_builder.insert(method.clone(), &pattern, value)?;

        debug!("added {} route `{}`", method, pattern);
        Ok(self)
    }

    /// Finalizes the routes into an immutable `Router`.
    pub fn build(self) -> Router<T> {
        Router::new(self.tree_builder.finalize())
    }
}

impl<T> Default for RouterBuilder<T> {
    fn default() -> Self {
        RouterBuilder::strict()
    }
}
