//! Path trie routing for REST endpoints.
//!
//! Routes are registered as an HTTP method, a path pattern and an opaque value, usually a
//! handler. Patterns are made of literal segments and `{name}` parameters, and may end in an
//! RPC style custom method such as `rest:batchGet`. A `Router` resolves a method and raw request
//! path to the most specific registered route, backtracking over ambiguous literal and parameter
//! segments, and returns the registered value with the percent decoded path parameters.
//!
//! ```rust
//! use endpoints_dispatcher::{Method, Router};
//!
//! # fn main() -> Result<(), endpoints_dispatcher::RouteError> {
//! let router = Router::builder()
//!     .add(Method::GET, "discovery/{version}", "get")?
//!     .add(Method::GET, "discovery/{version}:batchGet", "batch")?
//!     .build();
//!
//! let found = router.resolve(&Method::GET, "discovery/v1:batchGet").unwrap();
//! assert_eq!(*found.value(), "batch");
//! assert_eq!(found.raw_parameters()["version"], "v1");
//!
//! // Without a matching custom method the colon is part of the parameter.
//! let found = router.resolve(&Method::GET, "discovery/v1:notMethod").unwrap();
//! assert_eq!(*found.value(), "get");
//! assert_eq!(found.raw_parameters()["version"], "v1:notMethod");
//! # Ok(())
//! # }
//! ```
#![doc(html_root_url = "https://docs.rs/endpoints-dispatcher/0.1.0")] // Update when changed in Cargo.toml
#![warn(missing_docs, deprecated)]
#![doc(test(no_crate_inject, attr(deny(warnings))))]

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod helpers;
pub mod router;

pub use hyper::Method;

pub use crate::config::{DuplicatePolicy, RouterConfig};
pub use crate::error::{PatternFault, RouteError};
pub use crate::router::builder::RouterBuilder;
pub use crate::router::{RouteMatch, Router};
