//! Internal resolver-chain storage for the service registry.

use crate::context::ResolutionContext;
use crate::error::DiResult;
use crate::key::Key;
use crate::result::AnyArc;

#[cfg(feature = "ahash")]
pub(crate) type Map<K, V> = ahash::AHashMap<K, V>;
#[cfg(not(feature = "ahash"))]
pub(crate) type Map<K, V> = std::collections::HashMap<K, V>;

#[cfg(feature = "smallvec")]
pub(crate) type DecoratorList = smallvec::SmallVec<[Resolver; 2]>;
#[cfg(not(feature = "smallvec"))]
pub(crate) type DecoratorList = Vec<Resolver>;

/// Resolver table: one handler per registered service key.
pub(crate) type HandlerMap = Map<Key, Handler>;

/// A freshly built instance together with the identity of its backing
/// allocation, captured before type erasure. Identity is what lets the
/// context deduplicate pass-through decorators in the tracked list.
pub(crate) struct Resolved {
    pub(crate) identity: usize,
    pub(crate) instance: AnyArc,
}

pub(crate) type ResolverFn = Box<dyn Fn(&mut ResolutionContext<'_>) -> DiResult<Resolved>>;

/// A registered factory bound to one service key. Immutable once registered.
pub(crate) struct Resolver {
    pub(crate) description: String,
    pub(crate) ctor: ResolverFn,
}

impl Resolver {
    pub(crate) fn new(
        is_decorator: bool,
        factory_name: &'static str,
        service_name: &'static str,
        ctor: ResolverFn,
    ) -> Self {
        let role = if is_decorator { "decorator" } else { "primary" };
        Self {
            description: format!("{} ({} -> {})", factory_name, role, service_name),
            ctor,
        }
    }
}

/// Resolver chain for one service key: decorators newest-first, primary
/// last. At most one primary per key.
#[derive(Default)]
pub(crate) struct Handler {
    pub(crate) primary: Option<Resolver>,
    pub(crate) decorators: DecoratorList,
}

impl Handler {
    /// Resolver at chain position `depth`, walking from the outermost
    /// decorator toward the primary. Past the end of the chain is `None`.
    pub(crate) fn resolver_at(&self, depth: usize) -> Option<&Resolver> {
        if depth < self.decorators.len() {
            self.decorators.get(depth)
        } else if depth == self.decorators.len() {
            self.primary.as_ref()
        } else {
            None
        }
    }

    pub(crate) fn chain_len(&self) -> usize {
        self.decorators.len() + usize::from(self.primary.is_some())
    }

    /// Semicolon-joined descriptions of every registered resolver,
    /// outermost decorator first.
    pub(crate) fn describe(&self) -> String {
        let mut parts: Vec<&str> = self
            .decorators
            .iter()
            .map(|resolver| resolver.description.as_str())
            .collect();
        if let Some(primary) = &self.primary {
            parts.push(primary.description.as_str());
        }
        parts.join("; ")
    }
}
