//! Defines the `Router` and supporting types.

pub mod builder;
pub mod tree;

use std::collections::HashMap;
use std::sync::Arc;

use hyper::Method;
use log::{debug, trace};

use crate::helpers::http::request::path::RequestPathSegments;
use crate::helpers::http::PercentDecoded;
use crate::router::builder::RouterBuilder;
use crate::router::tree::Tree;

/// Resolves an HTTP method and request path to the value registered for the best matching
/// route, extracting the path parameters on the way.
///
/// A `Router` is created by a `RouterBuilder` and is immutable from then on. Clones share the
/// same routes, and `resolve` takes no locks, so a `Router` can be used from any number of
/// threads at once.
///
/// # Examples
///
/// ```rust
/// use endpoints_dispatcher::{Method, Router};
///
/// # fn main() -> Result<(), endpoints_dispatcher::RouteError> {
/// let router = Router::builder()
///     .add(Method::GET, "discovery/{version}/rest", "rest")?
///     .add(Method::GET, "discovery/{version}/rest:batchGet", "batch")?
///     .build();
///
/// let found = router.resolve(&Method::GET, "discovery/v1/rest:batchGet").unwrap();
/// assert_eq!(*found.value(), "batch");
/// assert_eq!(found.raw_parameters()["version"], "v1");
///
/// assert!(router.resolve(&Method::PUT, "discovery/v1/rest").is_none());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Router<T> {
    tree: Arc<Tree<T>>,
}

impl<T> Clone for Router<T> {
    fn clone(&self) -> Self {
        Router {
            tree: Arc::clone(&self.tree),
        }
    }
}

impl<T> Router<T> {
    /// Creates a `RouterBuilder` which rejects duplicate routes.
    pub fn builder() -> RouterBuilder<T> {
        RouterBuilder::strict()
    }

    pub(crate) fn new(tree: Tree<T>) -> Self {
        Router {
            tree: Arc::new(tree),
        }
    }

    /// Finds the route for `method` and the raw, percent encoded, request path.
    ///
    /// Returns `None` when no route matches the whole path for this method. Parameter values
    /// are decoded only once a route has matched, and bytes which are not valid UTF-8 are
    /// replaced with `U+FFFD` rather than failing the match.
    pub fn resolve(&self, method: &Method, raw_path: &str) -> Option<RouteMatch<'_, T>> {
        let req_path_segments = RequestPathSegments::new(raw_path);

        let traversal = match self.tree.traverse(method, &req_path_segments) {
            Some(traversal) => traversal,
            None => {
                debug!("no {} route for `{}`", method, raw_path);
                return None;
            }
        };

        let terminal = traversal.terminal;
        debug_assert_eq!(terminal.parameter_names().len(), traversal.bindings.len());

        let raw_parameters: HashMap<String, String> = terminal
            .parameter_names()
            .iter()
            .zip(traversal.bindings)
            .map(|(name, raw)| (name.clone(), PercentDecoded::new(raw).into_string()))
            .collect();

        debug!(
            "{} `{}` resolved to `{}`",
            method,
            raw_path,
            terminal.pattern()
        );

        Some(RouteMatch {
            value: terminal.value(),
            raw_parameters,
        })
    }

    /// The methods for which `resolve` finds a route on this path, sorted by name.
    ///
    /// An empty list means that no route matches the path at all.
    pub fn allowed_methods(&self, raw_path: &str) -> Vec<Method> {
        let mut allow: Vec<Method> = self
            .tree
            .methods()
            .iter()
            .filter(|method| self.resolve(method, raw_path).is_some())
            .cloned()
            .collect();

        trace!(" `{}` allows {:?}", raw_path, allow);
        allow.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        allow
    }
}

/// A successful resolution: the registered value and the decoded path parameters.
#[derive(Debug, PartialEq, Eq)]
pub struct RouteMatch<'r, T> {
    value: &'r T,
    raw_parameters: HashMap<String, String>,
}

impl<'r, T> RouteMatch<'r, T> {
    /// The value registered for the matched route.
    pub fn value(&self) -> &'r T {
        self.value
    }

    /// Parameter names of the matched route mapped to their percent decoded values.
    pub fn raw_parameters(&self) -> &HashMap<String, String> {
        &self.raw_parameters
    }

    /// Splits the match into the registered value and the parameters.
    pub fn into_parts(self) -> (&'r T, HashMap<String, String>) {
        (self.value, self.raw_parameters)
    }
}
