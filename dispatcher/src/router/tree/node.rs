//! Defines `Node` and `NodeBuilder` for `Tree`.

use std::collections::HashMap;

use hyper::Method;
use log::{trace, warn};

use crate::config::DuplicatePolicy;
use crate::error::RouteError;

/// The value stored for one HTTP method at the end of a route, together with the names of the
/// parameters bound on the way there.
#[derive(Debug)]
pub struct Terminal<T> {
    value: T,
    parameter_names: Vec<String>,
    pattern: String,
}

impl<T> Terminal<T> {
    /// Creates a new `Terminal` for the route registered as `pattern`.
    pub fn new(value: T, parameter_names: Vec<String>, pattern: String) -> Self {
        Terminal {
            value,
            parameter_names,
            pattern,
        }
    }

    /// The registered value.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Names of the parameters bound along the path, in path order.
    pub fn parameter_names(&self) -> &[String] {
        &self.parameter_names
    }

    /// The pattern this terminal was registered with.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

type Terminals<T> = HashMap<Method, Terminal<T>>;

/// An immutable member of `Tree`, representing one segment position of the routable paths.
///
/// Ultimately provides `0..n` `Terminal` instances, keyed by HTTP method, for paths ending at
/// this `Node`. Custom methods addressed through this `Node`'s segment hold their own terminals.
#[derive(Debug)]
pub struct Node<T> {
    literals: HashMap<String, Node<T>>,
    parameter: Option<Box<Node<T>>>,
    terminals: Terminals<T>,
    custom_methods: HashMap<String, Terminals<T>>,
}

impl<T> Node<T> {
    /// The child matching the exact literal text of a segment.
    pub fn literal_child(&self, segment: &str) -> Option<&Node<T>> {
        self.literals.get(segment)
    }

    /// The child shared by every parameter registered at this position.
    pub fn parameter_child(&self) -> Option<&Node<T>> {
        self.parameter.as_deref()
    }

    /// The terminal of a path ending at this `Node` for the given method.
    pub fn terminal(&self, method: &Method) -> Option<&Terminal<T>> {
        self.terminals.get(method)
    }

    /// The terminal of a path ending at this `Node` with the given custom method (including its
    /// colon) appended to the final segment.
    pub fn custom_method_terminal(
        &self,
        custom_method: &str,
        method: &Method,
    ) -> Option<&Terminal<T>> {
        self.custom_methods
            .get(custom_method)
            .and_then(|terminals| terminals.get(method))
    }
}

/// Constructs a `Node` which is immutable once finalized.
#[derive(Debug)]
pub struct NodeBuilder<T> {
    literals: HashMap<String, NodeBuilder<T>>,
    parameter: Option<Box<NodeBuilder<T>>>,
    terminals: Terminals<T>,
    custom_methods: HashMap<String, Terminals<T>>,
}

impl<T> NodeBuilder<T> {
    /// Creates a new, empty `NodeBuilder`.
    pub fn new() -> Self {
        NodeBuilder {
            literals: HashMap::new(),
            parameter: None,
            terminals: HashMap::new(),
            custom_methods: HashMap::new(),
        }
    }

    /// Mutably borrow the child for the literal provided, adding it when absent.
    pub fn literal_child_mut(&mut self, literal: &str) -> &mut NodeBuilder<T> {
        if !self.literals.contains_key(literal) {
            trace!(" adding literal child `{}`", literal);
        }

        self.literals
            .entry(literal.to_owned())
            .or_insert_with(NodeBuilder::new)
    }

    /// Mutably borrow the parameter child, adding it when absent.
    pub fn parameter_child_mut(&mut self) -> &mut NodeBuilder<T> {
        self.parameter.get_or_insert_with(|| {
            trace!(" adding parameter child");
            Box::new(NodeBuilder::new())
        })
    }

    /// Attaches a `Terminal` for `method`, optionally behind a custom method.
    ///
    /// An occupied slot holds a structurally identical route. Under `DuplicatePolicy::Strict` this
    /// is an error naming both patterns and the existing terminal is kept; under
    /// `DuplicatePolicy::Lax` the new terminal replaces the existing one.
    pub fn add_terminal(
        &mut self,
        method: Method,
        custom_method: Option<&str>,
        terminal: Terminal<T>,
        policy: DuplicatePolicy,
    ) -> Result<(), RouteError> {
        let terminals = match custom_method {
            Some(custom_method) => self
                .custom_methods
                .entry(custom_method.to_owned())
                .or_insert_with(HashMap::new),
            None => &mut self.terminals,
        };

        if let Some(existing) = terminals.get(&method) {
            match policy {
                DuplicatePolicy::Strict => {
                    return Err(RouteError::DuplicateRoute {
                        method,
                        pattern: terminal.pattern,
                        existing: existing.pattern.clone(),
                    });
                }
                DuplicatePolicy::Lax => warn!(
                    "{} route `{}` replaces duplicate `{}`",
                    method, terminal.pattern, existing.pattern
                ),
            }
        }

        trace!(" adding {} terminal for `{}`", method, terminal.pattern);
        terminals.insert(method, terminal);
        Ok(())
    }

    /// Finalizes all internal data, including all children.
    pub fn finalize(self) -> Node<T> {
        let mut literals = self
            .literals
            .into_iter()
            .map(|(segment, child)| (segment, child.finalize()))
            .collect::<HashMap<_, _>>();
        literals.shrink_to_fit();

        let mut terminals = self.terminals;
        terminals.shrink_to_fit();

        let mut custom_methods = self.custom_methods;
        for terminals in custom_methods.values_mut() {
            terminals.shrink_to_fit();
        }
        custom_methods.shrink_to_fit();

        Node {
            literals,
            parameter: self.parameter.map(|child| Box::new(child.finalize())),
            terminals,
            custom_methods,
        }
    }
}

impl<T> Default for NodeBuilder<T> {
    fn default() -> Self {
        NodeBuilder::new()
    }
}
