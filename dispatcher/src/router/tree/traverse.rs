//! Depth-first, backtracking search of a finalized `Tree`.
//!
//! The search is iterative: every visited `Node` is represented by a `Frame` on an explicit
//! stack, which records the next candidate to try at that `Node`. Candidates are tried from most
//! to least specific:
//!
//! 1. the literal child matching the raw segment exactly
//! 2. the parameter child, binding the raw segment
//!
//! The final segment has no children left to descend into, and is resolved directly against the
//! terminals reachable from its `Node`, see `match_final`. When a `Frame` runs out of candidates
//! it is popped and the search resumes at its parent, so an early choice which only proves
//! wrong several segments later is still revisited.

use hyper::Method;
use log::trace;

use crate::helpers::http::request::path::RequestPathSegments;
use crate::router::tree::node::{Node, Terminal};

/// A successful traversal: the terminal found and the raw (still percent encoded) values bound
/// to its parameters, in path order.
#[derive(Debug)]
pub(crate) struct Traversal<'t, 'p, T> {
    pub(crate) terminal: &'t Terminal<T>,
    pub(crate) bindings: Vec<&'p str>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Candidate {
    Literal,
    Parameter,
    Exhausted,
}

struct Frame<'t, T> {
    node: &'t Node<T>,
    depth: usize,
    // Number of bindings in place when this frame was entered.
    bound: usize,
    next: Candidate,
}

impl<'t, T> Frame<'t, T> {
    fn new(node: &'t Node<T>, depth: usize, bound: usize) -> Self {
        Frame {
            node,
            depth,
            bound,
            next: Candidate::Literal,
        }
    }
}

pub(super) fn traverse<'t, 'p, T>(
    root: &'t Node<T>,
    method: &Method,
    req_path_segments: &RequestPathSegments<'p>,
) -> Option<Traversal<'t, 'p, T>> {
    let segments = req_path_segments.segments();
    let last = match segments.len().checked_sub(1) {
        Some(last) => last,
        None => {
            return root.terminal(method).map(|terminal| Traversal {
                terminal,
                bindings: Vec::new(),
            })
        }
    };

    let custom_method_allowed = req_path_segments.custom_method_allowed();
    let mut bindings: Vec<&'p str> = Vec::with_capacity(segments.len());
    let mut stack = vec![Frame::new(root, 0, 0)];

    while let Some(frame) = stack.last_mut() {
        bindings.truncate(frame.bound);

        let node = frame.node;
        let depth = frame.depth;
        let segment = segments[depth];

        if depth == last {
            stack.pop();

            if let Some((terminal, binding)) =
                match_final(node, segment, method, custom_method_allowed)
            {
                trace!(" found terminal for `{}`", terminal.pattern());
                bindings.extend(binding);
                return Some(Traversal { terminal, bindings });
            }

            trace!(" no terminal for final segment `{}`, backtracking", segment);
            continue;
        }

        let candidate = frame.next;
        frame.next = match candidate {
            Candidate::Literal => Candidate::Parameter,
            Candidate::Parameter | Candidate::Exhausted => Candidate::Exhausted,
        };

        match candidate {
            Candidate::Literal => {
                if let Some(child) = node.literal_child(segment) {
                    trace!(" found literal node `{}`", segment);
                    stack.push(Frame::new(child, depth + 1, bindings.len()));
                }
            }
            Candidate::Parameter => {
                if let Some(child) = node.parameter_child().filter(|_| !segment.is_empty()) {
                    trace!(" binding `{}` to parameter node", segment);
                    bindings.push(segment);
                    stack.push(Frame::new(child, depth + 1, bindings.len()));
                }
            }
            Candidate::Exhausted => {
                trace!(" exhausted candidates for `{}`, backtracking", segment);
                stack.pop();
            }
        }
    }

    None
}

// Resolves the final segment against the terminals reachable from `node`. Returns the terminal
// and the value bound to a parameter in the final segment, if there is one.
fn match_final<'t, 'p, T>(
    node: &'t Node<T>,
    segment: &'p str,
    method: &Method,
    custom_method_allowed: bool,
) -> Option<(&'t Terminal<T>, Option<&'p str>)> {
    if let Some(terminal) = node
        .literal_child(segment)
        .and_then(|child| child.terminal(method))
    {
        return Some((terminal, None));
    }

    if custom_method_allowed {
        let splits = || segment.match_indices(':').map(move |(i, _)| segment.split_at(i));

        for (prefix, custom_method) in splits() {
            if let Some(terminal) = node
                .literal_child(prefix)
                .and_then(|child| child.custom_method_terminal(custom_method, method))
            {
                trace!(" matched custom method `{}` on literal", custom_method);
                return Some((terminal, None));
            }
        }

        if let Some(child) = node.parameter_child() {
            for (prefix, custom_method) in splits().filter(|(prefix, _)| !prefix.is_empty()) {
                if let Some(terminal) = child.custom_method_terminal(custom_method, method) {
                    trace!(" matched custom method `{}` on parameter", custom_method);
                    return Some((terminal, Some(prefix)));
                }
            }
        }
    }

    if segment.is_empty() {
        return None;
    }

    // Any colon is ordinary text here, the whole segment is the parameter value.
    node.parameter_child()
        .and_then(|child| child.terminal(method))
        .map(|terminal| (terminal, Some(segment)))
}
