//! Per-request resolution context.
//!
//! This module contains the ResolutionContext type which factories receive
//! to resolve their own dependencies, and which implements the caching,
//! decorator-depth, and provenance semantics of a single top-level request.

use std::any::type_name;
use std::sync::Arc;

use crate::error::{DiError, DiResult};
use crate::key::{key_of_trait, key_of_type, Key};
use crate::registration::{Handler, HandlerMap, Map};
use crate::result::{AnyArc, TrackedInstance};

/// Context passed to factory functions for resolving dependencies.
///
/// A ResolutionContext is created fresh for every top-level
/// [`ServiceRegistry::get`](crate::ServiceRegistry::get) call and discarded
/// afterwards. Within one context every distinct service type is constructed
/// at most once; repeated requests return the cached instance.
///
/// A decorator factory may call [`get`](Self::get) (or
/// [`get_trait`](Self::get_trait)) on its *own* declared service type to
/// receive the next resolver inward in the chain. The per-type decorator
/// depth counter, incremented around each nested call and restored on every
/// exit path, is what makes that self-request land one position further in
/// rather than recursing into the same decorator.
///
/// # Examples
///
/// ```rust
/// use compose_di::{DiResult, ServiceRegistry};
/// use std::sync::Arc;
///
/// struct Settings { retries: u32 }
/// struct Client { retries: u32 }
///
/// # fn main() -> DiResult<()> {
/// let mut registry = ServiceRegistry::new();
/// registry.register::<Settings, _>(|_| Ok(Settings { retries: 3 }))?;
/// registry.register::<Client, _>(|ctx| {
///     // ctx resolves dependencies through this same context
///     Ok(Client { retries: ctx.get::<Settings>()?.retries })
/// })?;
///
/// assert_eq!(registry.get::<Client>()?.instance().retries, 3);
/// # Ok(())
/// # }
/// ```
pub struct ResolutionContext<'r> {
    handlers: &'r HandlerMap,
    instances: Map<Key, AnyArc>,
    depth: Map<Key, usize>,
    sequence: u64,
    tracked: Vec<TrackedInstance>,
}

impl<'r> ResolutionContext<'r> {
    pub(crate) fn new(handlers: &'r HandlerMap) -> Self {
        Self {
            handlers,
            instances: Map::default(),
            depth: Map::default(),
            sequence: 0,
            tracked: Vec::new(),
        }
    }

    /// Resolves the concrete service type `T`, invoking its resolver chain
    /// on first request and returning the cached instance afterwards.
    pub fn get<T: 'static + Send + Sync>(&mut self) -> DiResult<Arc<T>> {
        let any = self.resolve(key_of_type::<T>())?;
        any.downcast::<T>()
            .map_err(|_| DiError::TypeMismatch(type_name::<T>()))
    }

    /// Resolves the trait contract `T` (typically `dyn SomeTrait`).
    pub fn get_trait<T: ?Sized + 'static + Send + Sync>(&mut self) -> DiResult<Arc<T>> {
        let any = self.resolve(key_of_trait::<T>())?;
        any.downcast::<Arc<T>>()
            .map(|shared| (*shared).clone())
            .map_err(|_| DiError::TypeMismatch(type_name::<T>()))
    }

    fn resolve(&mut self, key: Key) -> DiResult<AnyArc> {
        // Within-resolution singleton: cache hits re-invoke nothing and
        // leave no provenance entry.
        if let Some(instance) = self.instances.get(&key) {
            return Ok(instance.clone());
        }

        let Some(handler) = self.handlers.get(&key) else {
            return Err(DiError::NotRegistered(key.display_name()));
        };

        let depth = {
            let counter = self.depth.entry(key.clone()).or_insert(0);
            let depth = *counter;
            *counter += 1;
            depth
        };

        let outcome = self.invoke(handler, &key, depth);

        // Scoped decrement, on success and failure alike, so a decorator's
        // nested self-request always lands one position inward and a failed
        // resolve leaves the counters as it found them.
        if let Some(counter) = self.depth.get_mut(&key) {
            *counter -= 1;
            if *counter == 0 {
                self.depth.remove(&key);
            }
        }

        outcome
    }

    fn invoke(&mut self, handler: &Handler, key: &Key, depth: usize) -> DiResult<AnyArc> {
        let built = match handler.resolver_at(depth) {
            Some(resolver) => (resolver.ctor)(self),
            // A resolver requested its own type past the end of the chain.
            // Depth grows monotonically per nested call, so this terminates
            // instead of recursing forever.
            None => Err(DiError::DepthExceeded {
                service: key.display_name(),
                depth,
                resolvers: handler.chain_len(),
            }),
        };

        match built {
            Ok(resolved) => {
                let seq = self.sequence;
                self.sequence += 1;
                self.instances.insert(key.clone(), resolved.instance.clone());
                // Identity dedup: a pass-through decorator returning its
                // inner instance unchanged must not track it twice.
                if !self.tracked.iter().any(|t| t.identity == resolved.identity) {
                    self.tracked.push(TrackedInstance {
                        seq,
                        identity: resolved.identity,
                        instance: resolved.instance.clone(),
                    });
                }
                Ok(resolved.instance)
            }
            Err(source) => Err(DiError::ResolutionFailed {
                service: key.display_name(),
                depth,
                registrations: handler.describe(),
                source: Box::new(source),
            }),
        }
    }

    pub(crate) fn into_tracked(self) -> Vec<TrackedInstance> {
        self.tracked
    }
}
