//! Dispatches requests to handlers registered by path pattern.
//!
//! A `PathDispatcher` stores one `DispatcherHandler` per method and pattern in a `Router`. The
//! surrounding HTTP layer owns the request, wraps whatever it needs in a context type, and calls
//! `PathDispatcher::dispatch` with it; the dispatcher hands the extracted path parameters to the
//! context and invokes the matching handler.
use std::collections::HashMap;

use hyper::Method;
use log::{debug, trace};

use crate::config::RouterConfig;
use crate::error::RouteError;
use crate::router::builder::RouterBuilder;
use crate::router::Router;

/// Handles requests routed to it by a `PathDispatcher`.
///
/// Implemented for every `Fn(&mut C) -> anyhow::Result<()>`, so plain functions can be
/// registered directly.
pub trait DispatcherHandler<C>: Send + Sync {
    /// Handles the request described by `context`.
    fn handle(&self, context: &mut C) -> anyhow::Result<()>;
}

impl<C, F> DispatcherHandler<C> for F
where
    F: Fn(&mut C) -> anyhow::Result<()> + Send + Sync,
{
    fn handle(&self, context: &mut C) -> anyhow::Result<()> {
        self(context)
    }
}

/// Receives the path parameters extracted for the request before its handler runs.
pub trait DispatcherContext {
    /// Stores the percent decoded path parameters of the matched route.
    fn set_raw_path_parameters(&mut self, raw_path_parameters: HashMap<String, String>);
}

/// The outcome of `PathDispatcher::dispatch`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Dispatch {
    /// A handler was found and completed successfully.
    Handled,

    /// No route matches the path.
    NotFound,

    /// Routes match the path, but only for the listed methods.
    MethodNotAllowed(Vec<Method>),
}

/// Routes requests to `DispatcherHandler` instances.
///
/// ```rust
/// use std::collections::HashMap;
///
/// use endpoints_dispatcher::dispatcher::{Dispatch, DispatcherContext, PathDispatcher};
/// use endpoints_dispatcher::Method;
///
/// #[derive(Default)]
/// struct Context {
///     params: HashMap<String, String>,
///     body: String,
/// }
///
/// impl DispatcherContext for Context {
///     fn set_raw_path_parameters(&mut self, params: HashMap<String, String>) {
///         self.params = params;
///     }
/// }
///
/// fn get_api(context: &mut Context) -> anyhow::Result<()> {
///     context.body = format!("api {}", context.params["api"]);
///     Ok(())
/// }
///
/// # fn main() -> anyhow::Result<()> {
/// let dispatcher = PathDispatcher::builder()
///     .add(Method::GET, "apis/{api}", get_api)?
///     .build();
///
/// let mut context = Context::default();
/// assert_eq!(
///     dispatcher.dispatch(&Method::GET, "apis/storage", &mut context)?,
///     Dispatch::Handled
/// );
/// assert_eq!(context.body, "api storage");
///
/// assert_eq!(
///     dispatcher.dispatch(&Method::DELETE, "apis/storage", &mut context)?,
///     Dispatch::MethodNotAllowed(vec![Method::GET])
/// );
/// # Ok(())
/// # }
/// ```
pub struct PathDispatcher<C> {
    router: Router<Box<dyn DispatcherHandler<C>>>,
}

impl<C> Clone for PathDispatcher<C> {
    fn clone(&self) -> Self {
        PathDispatcher {
            router: self.router.clone(),
        }
    }
}

impl<C> PathDispatcher<C>
where
    C: DispatcherContext,
{
    /// Creates a `PathDispatcherBuilder` which rejects duplicate routes.
    pub fn builder() -> PathDispatcherBuilder<C> {
        PathDispatcherBuilder {
            routes: RouterBuilder::strict(),
        }
    }

    /// Resolves `method` and the raw request `path`, then invokes the matching handler with
    /// `context`.
    ///
    /// Errors returned by the handler are passed through unchanged. Failing to find a handler is
    /// reported through `Dispatch`, not as an error.
    pub fn dispatch(
        &self,
        method: &Method,
        path: &str,
        context: &mut C,
    ) -> anyhow::Result<Dispatch> {
        match self.router.resolve(method, path) {
            Some(route_match) => {
                let (handler, raw_path_parameters) = route_match.into_parts();
                trace!(" dispatching {} `{}`", method, path);

                context.set_raw_path_parameters(raw_path_parameters);
                handler.handle(context)?;
                Ok(Dispatch::Handled)
            }
            None => {
                let allow = self.router.allowed_methods(path);
                if allow.is_empty() {
                    debug!("no handler for `{}`", path);
                    Ok(Dispatch::NotFound)
                } else {
                    debug!("{} not allowed for `{}`, allow: {:?}", method, path, allow);
                    Ok(Dispatch::MethodNotAllowed(allow))
                }
            }
        }
    }
}

/// Collects handlers for a `PathDispatcher`.
pub struct PathDispatcherBuilder<C> {
    routes: RouterBuilder<Box<dyn DispatcherHandler<C>>>,
}

impl<C> PathDispatcherBuilder<C>
where
    C: DispatcherContext,
{
    /// Creates a builder from `RouterConfig`.
    pub fn with_config(config: &RouterConfig) -> Self {
        PathDispatcherBuilder {
            routes: RouterBuilder::with_config(config),
        }
    }

    /// Registers `handler` for `method` requests whose path matches `pattern`.
    ///
    /// Patterns are validated exactly as by `RouterBuilder::add`.
    pub fn add<H>(self, method: Method, pattern: &str, handler: H) -> Result<Self, RouteError>
    where
        H: DispatcherHandler<C> + 'static,
    {
        let handler: Box<dyn DispatcherHandler<C>> = Box::new(handler);
        let routes = self.routes.add(method, pattern, handler)?;
        Ok(PathDispatcherBuilder { routes })
    }

    /// Finalizes the handlers into an immutable `PathDispatcher`.
    pub fn build(self) -> PathDispatcher<C> {
        PathDispatcher {
            router: self.routes.build(),
        }
    }
}
