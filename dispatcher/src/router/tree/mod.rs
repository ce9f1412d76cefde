//! Defines a hierarchial `Tree` with subtrees of `Node`.

use hyper::Method;
use log::trace;

use crate::config::DuplicatePolicy;
use crate::error::RouteError;
use crate::helpers::http::request::path::RequestPathSegments;
use crate::router::tree::node::{Node, NodeBuilder, Terminal};
use crate::router::tree::segment::{PathPattern, Segment};

pub mod node;
pub mod segment;
mod traverse;

pub(crate) use self::traverse::Traversal;

/// A hierarchical structure that provides a root `Node` and subtrees of linked nodes
/// that represent valid `Request` paths.
///
/// The `Tree` is created by a `TreeBuilder` and used internally by the `Router` to determine the
/// `Terminal` for a request path. It is never modified after construction.
#[derive(Debug)]
pub struct Tree<T> {
    root: Node<T>,
    methods: Vec<Method>,
}

impl<T> Tree<T> {
    /// Borrow the root `Node`.
    pub fn root(&self) -> &Node<T> {
        &self.root
    }

    /// Every HTTP method with at least one registered route, in registration order.
    pub fn methods(&self) -> &[Method] {
        &self.methods
    }

    /// Attempt to acquire a path from the `Tree` which matches the `Request` path and holds a
    /// `Terminal` for the requested method.
    pub(crate) fn traverse<'t, 'p>(
        &'t self,
        method: &Method,
        req_path_segments: &RequestPathSegments<'p>,
    ) -> Option<Traversal<'t, 'p, T>> {
        trace!(" starting tree traversal");
        traverse::traverse(&self.root, method, req_path_segments)
    }
}

/// Constructs a `Tree` which is immutable once finalized.
#[derive(Debug)]
pub struct TreeBuilder<T> {
    root: NodeBuilder<T>,
    methods: Vec<Method>,
    policy: DuplicatePolicy,
}

impl<T> TreeBuilder<T> {
    /// Creates a new `TreeBuilder` and root `NodeBuilder`.
    pub fn new(policy: DuplicatePolicy) -> Self {
        trace!(" creating new tree");
        TreeBuilder {
            root: NodeBuilder::new(),
            methods: Vec::new(),
            policy,
        }
    }

    /// Adds the route described by `pattern`, walking to or creating the nodes of its segments.
    pub fn insert(
        &mut self,
        method: Method,
        pattern: &PathPattern,
        value: T,
    ) -> Result<(), RouteError> {
        trace!("[walking to: {}]", pattern);

        let mut node = &mut self.root;
        for segment in pattern.segments() {
            node = match segment {
                Segment::Literal(text) => node.literal_child_mut(text),
                Segment::Parameter(_) => node.parameter_child_mut(),
            };
        }

        let terminal = Terminal::new(
            value,
            pattern.parameter_names().map(str::to_owned).collect(),
            pattern.as_str().to_owned(),
        );
        node.add_terminal(method.clone(), pattern.custom_method(), terminal, self.policy)?;

        if !self.methods.contains(&method) {
            self.methods.push(method);
        }

        Ok(())
    }

    /// Finalizes the root `NodeBuilder` and every node beneath it.
    pub fn finalize(self) -> Tree<T> {
        Tree {
            root: self.root.finalize(),
            methods: self.methods,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn insert(tree: &mut TreeBuilder<u32>, method: Method, pattern: &str, value: u32) {
        let pattern = PathPattern::parse(pattern).unwrap();
        tree.insert(method, &pattern, value).unwrap();
    }

    #[test]
    fn tree_traversal_tests() {
        let mut tree = TreeBuilder::new(DuplicatePolicy::Strict);
        insert(&mut tree, Method::GET, "activate/{thing}", 1);
        insert(&mut tree, Method::PUT, "activate/{thing}:run", 2);
        let tree = tree.finalize();

        let rps = RequestPathSegments::new("/activate/workflow5");
        match tree.traverse(&Method::GET, &rps) {
            Some(traversal) => {
                assert_eq!(*traversal.terminal.value(), 1);
                assert_eq!(traversal.terminal.parameter_names(), &["thing".to_owned()]);
                assert_eq!(traversal.bindings, vec!["workflow5"]);
            }
            None => panic!("traversal should have succeeded here"),
        }

        let rps = RequestPathSegments::new("/activate/workflow5:run");
        let traversal = tree.traverse(&Method::PUT, &rps).unwrap();
        assert_eq!(*traversal.terminal.value(), 2);
        assert_eq!(traversal.bindings, vec!["workflow5"]);

        assert!(tree
            .traverse(&Method::GET, &RequestPathSegments::new("/"))
            .is_none());
        assert!(tree
            .traverse(&Method::GET, &RequestPathSegments::new("/activate"))
            .is_none());
        assert!(tree
            .traverse(&Method::POST, &RequestPathSegments::new("/activate/workflow5"))
            .is_none());
    }

    #[test]
    fn records_methods_once() {
        let mut tree = TreeBuilder::new(DuplicatePolicy::Strict);
        insert(&mut tree, Method::GET, "a", 1);
        insert(&mut tree, Method::PUT, "a", 2);
        insert(&mut tree, Method::GET, "b", 3);

        assert_eq!(tree.finalize().methods(), &[Method::GET, Method::PUT]);
    }

    #[test]
    fn rejected_insert_leaves_routes_unchanged() {
        let mut tree = TreeBuilder::new(DuplicatePolicy::Strict);
        insert(&mut tree, Method::GET, "test/{a}/path", 1);

        let duplicate = PathPattern::parse("test/{b}/path").unwrap();
        assert!(tree.insert(Method::GET, &duplicate, 2).is_err());

        let tree = tree.finalize();
        let traversal = tree
            .traverse(&Method::GET, &RequestPathSegments::new("test/x/path"))
            .unwrap();
        assert_eq!(*traversal.terminal.value(), 1);
        assert_eq!(traversal.terminal.pattern(), "test/{a}/path");
    }

    #[test]
    fn root_routes() {
        let mut tree = TreeBuilder::new(DuplicatePolicy::Strict);
        insert(&mut tree, Method::GET, "/", 7);
        let tree = tree.finalize();

        assert!(tree.root().terminal(&Method::GET).is_some());
        let traversal = tree
            .traverse(&Method::GET, &RequestPathSegments::new(""))
            .unwrap();
        assert_eq!(*traversal.terminal.value(), 7);
        assert!(traversal.bindings.is_empty());
    }
}
