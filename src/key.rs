//! Service key types for the registry.

use std::any::TypeId;

/// Key for resolver-chain storage and lookup.
///
/// Keys uniquely identify service contracts in the registry. A contract is
/// either a concrete type or a `dyn Trait`, so two variants suffice.
///
/// # Examples
///
/// ```rust
/// use compose_di::{key_of_type, key_of_trait, Key};
///
/// let concrete = key_of_type::<String>();
/// assert_eq!(concrete.display_name(), "alloc::string::String");
///
/// let contract = key_of_trait::<dyn std::fmt::Debug>();
/// assert_eq!(contract.display_name(), "dyn core::fmt::Debug");
/// assert_ne!(concrete, contract);
/// ```
#[derive(Debug, Clone)]
pub enum Key {
    /// Concrete type key with TypeId and name for diagnostics
    ///
    /// The TypeId provides fast lookup while the name helps with debugging
    /// and error payloads.
    Type(TypeId, &'static str),
    /// Trait contract key
    ///
    /// `dyn Trait` contracts are keyed by their `std::any::type_name`;
    /// their instances are stored double-Arc'd behind `dyn Any`.
    Trait(&'static str),
}

impl Key {
    /// Get the type or trait name for display
    pub fn display_name(&self) -> &'static str {
        match self {
            Key::Type(_, name) => name,
            Key::Trait(name) => name,
        }
    }
}

// TypeId-only comparison for concrete types; the string is carried purely
// for diagnostics.
impl PartialEq for Key {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Key::Type(a, _), Key::Type(b, _)) => a == b,
            (Key::Trait(a), Key::Trait(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Key {}

impl std::hash::Hash for Key {
    #[inline(always)]
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        match self {
            Key::Type(id, _) => {
                0u8.hash(state); // Discriminant
                id.hash(state);
            }
            Key::Trait(name) => {
                1u8.hash(state);
                name.hash(state);
            }
        }
    }
}

/// Key for the concrete service type `T`.
#[inline(always)]
pub fn key_of_type<T: 'static>() -> Key {
    Key::Type(TypeId::of::<T>(), std::any::type_name::<T>())
}

/// Key for the trait contract `T` (typically `dyn SomeTrait`).
#[inline(always)]
pub fn key_of_trait<T: ?Sized + 'static>() -> Key {
    Key::Trait(std::any::type_name::<T>())
}
