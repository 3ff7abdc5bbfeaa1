//! Resolution results and creation-order instance tracking.

use std::any::Any;
use std::sync::Arc;

/// Type-erased shared instance as stored by the resolution context.
///
/// Concrete services are stored as `Arc<T>`; trait-contract services are
/// stored as `Arc<Arc<dyn Trait>>` (the registry's double-Arc convention).
pub type AnyArc = Arc<dyn Any + Send + Sync>;

/// One instance created during a resolution.
pub struct TrackedInstance {
    pub(crate) seq: u64,
    pub(crate) identity: usize,
    pub(crate) instance: AnyArc,
}

impl TrackedInstance {
    /// Creation sequence number within the originating resolution.
    pub fn sequence(&self) -> u64 {
        self.seq
    }

    /// The type-erased instance.
    pub fn instance(&self) -> &AnyArc {
        &self.instance
    }
}

/// Every instance created while satisfying one top-level resolution,
/// ordered by creation: dependencies before the dependents that requested
/// them, primaries before the decorators that wrap them.
///
/// Instances are deduplicated by identity, so a pass-through decorator that
/// returns its inner instance unchanged contributes no extra entry.
pub struct TrackedInstances {
    entries: Vec<TrackedInstance>,
}

impl TrackedInstances {
    pub(crate) fn new(entries: Vec<TrackedInstance>) -> Self {
        Self { entries }
    }

    /// Number of distinct instances created.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &TrackedInstance> {
        self.entries.iter()
    }

    /// All tracked instances of the concrete type `T`, in creation order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use compose_di::{DiResult, ServiceRegistry};
    /// use std::sync::Arc;
    ///
    /// struct Leaf;
    /// struct Root(Arc<Leaf>);
    ///
    /// # fn main() -> DiResult<()> {
    /// let mut registry = ServiceRegistry::new();
    /// registry.register::<Leaf, _>(|_| Ok(Leaf))?;
    /// registry.register::<Root, _>(|ctx| Ok(Root(ctx.get::<Leaf>()?)))?;
    ///
    /// let result = registry.get::<Root>()?;
    /// assert_eq!(result.tracked_instances().of_type::<Leaf>().len(), 1);
    /// assert_eq!(result.tracked_instances().of_type::<Root>().len(), 1);
    /// # Ok(())
    /// # }
    /// ```
    pub fn of_type<T: 'static + Send + Sync>(&self) -> Vec<Arc<T>> {
        self.entries
            .iter()
            .filter_map(|entry| entry.instance.clone().downcast::<T>().ok())
            .collect()
    }

    /// All tracked instances registered under the trait contract `T`
    /// (typically `dyn SomeTrait`), in creation order.
    pub fn of_trait<T: ?Sized + 'static + Send + Sync>(&self) -> Vec<Arc<T>> {
        self.entries
            .iter()
            .filter_map(|entry| entry.instance.clone().downcast::<Arc<T>>().ok())
            .map(|shared| (*shared).clone())
            .collect()
    }

    /// Capability filter: applies `cast` to every tracked instance in
    /// creation order and keeps the hits.
    ///
    /// This is the general form of the typed queries above. The caller
    /// supplies the probe because Rust has no runtime capability lookup;
    /// a typical probe downcasts to the concrete types it knows about and
    /// coerces them to the capability trait.
    pub fn select<C: ?Sized, F>(&self, mut cast: F) -> Vec<Arc<C>>
    where
        F: FnMut(&AnyArc) -> Option<Arc<C>>,
    {
        self.entries
            .iter()
            .filter_map(|entry| cast(&entry.instance))
            .collect()
    }
}

/// A built instance along with every instance that was created while
/// building it, including the instance itself.
pub struct ResolutionResult<T: ?Sized> {
    instance: Arc<T>,
    tracked: TrackedInstances,
}

impl<T: ?Sized> std::fmt::Debug for ResolutionResult<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolutionResult")
            .field("tracked", &self.tracked.len())
            .finish_non_exhaustive()
    }
}

impl<T: ?Sized> ResolutionResult<T> {
    pub(crate) fn new(instance: Arc<T>, entries: Vec<TrackedInstance>) -> Self {
        Self {
            instance,
            tracked: TrackedInstances::new(entries),
        }
    }

    /// The instance that was built.
    pub fn instance(&self) -> &Arc<T> {
        &self.instance
    }

    /// Consumes the result, keeping only the instance.
    pub fn into_instance(self) -> Arc<T> {
        self.instance
    }

    /// Provenance of the resolution, in creation order.
    pub fn tracked_instances(&self) -> &TrackedInstances {
        &self.tracked
    }

    /// Splits the result into the instance and its provenance.
    pub fn into_parts(self) -> (Arc<T>, TrackedInstances) {
        (self.instance, self.tracked)
    }
}
