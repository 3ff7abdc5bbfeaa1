//! Service registry: the registration surface and top-level resolution.

use std::any::type_name;
use std::sync::Arc;

use crate::context::ResolutionContext;
use crate::error::{DiError, DiResult};
use crate::key::{key_of_trait, key_of_type, Key};
use crate::registration::{HandlerMap, Resolved, Resolver, ResolverFn};
use crate::result::ResolutionResult;

/// Configuration-time service registry.
///
/// Factories are registered per service type during a single-threaded
/// composition phase; [`get`](Self::get) then builds a fresh instance graph
/// per call. Each type gets at most one *primary* factory and any number of
/// *decorator* factories; the most recently registered decorator wraps
/// outermost.
///
/// The registry is append-only and not thread-safe. It is meant to run once
/// per composition root, not on a hot path.
///
/// # Examples
///
/// ```rust
/// use compose_di::{DiResult, ServiceRegistry};
/// use std::sync::Arc;
///
/// struct Database { url: String }
/// struct UserService { db: Arc<Database> }
///
/// # fn main() -> DiResult<()> {
/// let mut registry = ServiceRegistry::new();
/// registry.register::<Database, _>(|_| Ok(Database {
///     url: "postgres://localhost".to_string(),
/// }))?;
/// registry.register::<UserService, _>(|ctx| Ok(UserService {
///     db: ctx.get::<Database>()?,
/// }))?;
///
/// let result = registry.get::<UserService>()?;
/// assert_eq!(result.instance().db.url, "postgres://localhost");
/// // Provenance: the Database was created while building the UserService.
/// assert_eq!(result.tracked_instances().len(), 2);
/// # Ok(())
/// # }
/// ```
pub struct ServiceRegistry {
    handlers: HandlerMap,
}

impl Default for ServiceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ServiceRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            handlers: HandlerMap::default(),
        }
    }

    // ----- Concrete type registrations -----

    /// Registers the primary factory for the concrete type `T`.
    ///
    /// Fails with [`DiError::DuplicateRegistration`] if a primary factory
    /// already exists for `T`. Registration order relative to
    /// [`decorate`](Self::decorate) calls for the same type is irrelevant.
    pub fn register<T, F>(&mut self, factory: F) -> DiResult<()>
    where
        T: 'static + Send + Sync,
        F: Fn(&mut ResolutionContext) -> DiResult<T> + 'static,
    {
        let factory_name = type_name::<F>();
        self.set_primary(key_of_type::<T>(), factory_name, concrete_ctor(factory))
    }

    /// Registers a decorator factory for the concrete type `T`.
    ///
    /// The factory is expected to call `ctx.get::<T>()` to obtain the
    /// instance it wraps. Decorator registration never fails; the most
    /// recently registered decorator runs outermost.
    pub fn decorate<T, F>(&mut self, factory: F)
    where
        T: 'static + Send + Sync,
        F: Fn(&mut ResolutionContext) -> DiResult<T> + 'static,
    {
        let factory_name = type_name::<F>();
        self.push_decorator(key_of_type::<T>(), factory_name, concrete_ctor(factory));
    }

    // ----- Trait contract registrations -----

    /// Registers the primary factory for the trait contract `T`
    /// (typically `dyn SomeTrait`). The factory returns `Arc<T>`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use compose_di::{DiResult, ServiceRegistry};
    /// use std::sync::Arc;
    ///
    /// trait Greeter: Send + Sync { fn greet(&self) -> String; }
    ///
    /// struct Plain;
    /// impl Greeter for Plain {
    ///     fn greet(&self) -> String { "hello".to_string() }
    /// }
    ///
    /// struct Shouting(Arc<dyn Greeter>);
    /// impl Greeter for Shouting {
    ///     fn greet(&self) -> String { self.0.greet().to_uppercase() }
    /// }
    ///
    /// # fn main() -> DiResult<()> {
    /// let mut registry = ServiceRegistry::new();
    /// registry.register_trait::<dyn Greeter, _>(|_| Ok(Arc::new(Plain)))?;
    /// registry.decorate_trait::<dyn Greeter, _>(|ctx| {
    ///     Ok(Arc::new(Shouting(ctx.get_trait::<dyn Greeter>()?)))
    /// });
    ///
    /// let result = registry.get_trait::<dyn Greeter>()?;
    /// assert_eq!(result.instance().greet(), "HELLO");
    /// # Ok(())
    /// # }
    /// ```
    pub fn register_trait<T, F>(&mut self, factory: F) -> DiResult<()>
    where
        T: ?Sized + 'static + Send + Sync,
        F: Fn(&mut ResolutionContext) -> DiResult<Arc<T>> + 'static,
    {
        let factory_name = type_name::<F>();
        self.set_primary(key_of_trait::<T>(), factory_name, trait_ctor(factory))
    }

    /// Registers a decorator factory for the trait contract `T`.
    ///
    /// The factory is expected to call `ctx.get_trait::<T>()` to obtain the
    /// instance it wraps; returning that instance unchanged turns the
    /// decorator into a pass-through hook.
    pub fn decorate_trait<T, F>(&mut self, factory: F)
    where
        T: ?Sized + 'static + Send + Sync,
        F: Fn(&mut ResolutionContext) -> DiResult<Arc<T>> + 'static,
    {
        let factory_name = type_name::<F>();
        self.push_decorator(key_of_trait::<T>(), factory_name, trait_ctor(factory));
    }

    // ----- Queries -----

    /// Whether a primary factory is registered for the concrete type `T`.
    pub fn has<T: 'static>(&self) -> bool {
        self.has_primary(&key_of_type::<T>())
    }

    /// Whether a primary factory is registered for the trait contract `T`.
    pub fn has_trait<T: ?Sized + 'static>(&self) -> bool {
        self.has_primary(&key_of_trait::<T>())
    }

    /// Whether any resolver, primary or decorator, is registered for `T`.
    pub fn has_any<T: 'static>(&self) -> bool {
        self.has_resolver(&key_of_type::<T>())
    }

    /// Whether any resolver, primary or decorator, is registered for the
    /// trait contract `T`.
    pub fn has_any_trait<T: ?Sized + 'static>(&self) -> bool {
        self.has_resolver(&key_of_trait::<T>())
    }

    // ----- Resolution -----

    /// Starts a fresh resolution context and builds an instance of the
    /// concrete type `T`, returning it together with every instance created
    /// along the way.
    ///
    /// Two separate calls produce independent instance graphs; no caching
    /// persists across calls.
    pub fn get<T: 'static + Send + Sync>(&self) -> DiResult<ResolutionResult<T>> {
        let mut context = ResolutionContext::new(&self.handlers);
        let instance = context.get::<T>()?;
        Ok(ResolutionResult::new(instance, context.into_tracked()))
    }

    /// Starts a fresh resolution context and builds an instance of the
    /// trait contract `T`.
    pub fn get_trait<T: ?Sized + 'static + Send + Sync>(&self) -> DiResult<ResolutionResult<T>> {
        let mut context = ResolutionContext::new(&self.handlers);
        let instance = context.get_trait::<T>()?;
        Ok(ResolutionResult::new(instance, context.into_tracked()))
    }

    #[cfg(feature = "diagnostics")]
    pub fn to_debug_string(&self) -> String {
        let mut s = String::new();
        s.push_str("=== Service Registry Debug ===\n");
        for (key, handler) in self.handlers.iter() {
            s.push_str(&format!("  {}: {}\n", key.display_name(), handler.describe()));
        }
        s
    }

    // ----- Internals -----

    fn set_primary(
        &mut self,
        key: Key,
        factory_name: &'static str,
        ctor: ResolverFn,
    ) -> DiResult<()> {
        let service = key.display_name();
        let handler = self.handlers.entry(key).or_default();
        let resolver = Resolver::new(false, factory_name, service, ctor);
        if let Some(existing) = &handler.primary {
            return Err(DiError::DuplicateRegistration {
                service,
                existing: existing.description.clone(),
                attempted: resolver.description,
            });
        }
        handler.primary = Some(resolver);
        Ok(())
    }

    fn push_decorator(&mut self, key: Key, factory_name: &'static str, ctor: ResolverFn) {
        let service = key.display_name();
        let handler = self.handlers.entry(key).or_default();
        handler
            .decorators
            .insert(0, Resolver::new(true, factory_name, service, ctor));
    }

    fn has_primary(&self, key: &Key) -> bool {
        self.handlers
            .get(key)
            .map_or(false, |handler| handler.primary.is_some())
    }

    fn has_resolver(&self, key: &Key) -> bool {
        self.handlers.get(key).map_or(false, |handler| {
            handler.primary.is_some() || !handler.decorators.is_empty()
        })
    }
}

fn concrete_ctor<T, F>(factory: F) -> ResolverFn
where
    T: 'static + Send + Sync,
    F: Fn(&mut ResolutionContext) -> DiResult<T> + 'static,
{
    Box::new(move |ctx| {
        let instance = Arc::new(factory(ctx)?);
        let identity = Arc::as_ptr(&instance).cast::<()>() as usize;
        Ok(Resolved { identity, instance })
    })
}

fn trait_ctor<T, F>(factory: F) -> ResolverFn
where
    T: ?Sized + 'static + Send + Sync,
    F: Fn(&mut ResolutionContext) -> DiResult<Arc<T>> + 'static,
{
    Box::new(move |ctx| {
        let instance = factory(ctx)?;
        let identity = Arc::as_ptr(&instance).cast::<()>() as usize;
        Ok(Resolved {
            identity,
            instance: Arc::new(instance),
        })
    })
}
