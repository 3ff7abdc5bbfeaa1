//! Error types for the service registry.

use std::fmt;

/// Registration and resolution errors
///
/// Represents the error conditions that can occur while composing a system
/// with the registry: rejected registrations, missing resolver chains, and
/// failures raised by factories during resolution.
///
/// All errors are unrecoverable at the point of detection and propagate
/// synchronously to the top-level caller; there is no retry model.
///
/// # Examples
///
/// ```rust
/// use compose_di::{DiError, ServiceRegistry};
///
/// let registry = ServiceRegistry::new();
/// match registry.get::<String>() {
///     Err(DiError::NotRegistered(name)) => {
///         assert_eq!(name, "alloc::string::String");
///     }
///     _ => unreachable!(),
/// }
/// ```
#[derive(Debug, Clone)]
pub enum DiError {
    /// A primary resolver already exists for the service type
    DuplicateRegistration {
        /// Service type name
        service: &'static str,
        /// Description of the primary resolver that is already registered
        existing: String,
        /// Description of the resolver whose registration was rejected
        attempted: String,
    },
    /// No resolver chain registered for the requested service type
    NotRegistered(&'static str),
    /// Type downcast failed
    TypeMismatch(&'static str),
    /// A resolver asked for its own service type more times than there are
    /// resolvers in the chain
    DepthExceeded {
        /// Service type name
        service: &'static str,
        /// Decorator depth of the offending request
        depth: usize,
        /// Number of resolvers registered for the type
        resolvers: usize,
    },
    /// A factory or nested resolution failed while building an instance
    ResolutionFailed {
        /// Service type being resolved when the failure occurred
        service: &'static str,
        /// Decorator depth at which the failure occurred
        depth: usize,
        /// Descriptions of every resolver registered for the type
        registrations: String,
        /// The underlying failure
        source: Box<DiError>,
    },
    /// Failure surfaced by a host-supplied factory
    Factory(String),
}

impl fmt::Display for DiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiError::DuplicateRegistration { service, existing, attempted } => write!(
                f,
                "Attempted to register {} as primary implementation of {}, but a primary registration already exists: {}",
                attempted, service, existing
            ),
            DiError::NotRegistered(name) => write!(f, "Could not find resolver for {}", name),
            DiError::TypeMismatch(name) => write!(f, "Type mismatch for: {}", name),
            DiError::DepthExceeded { service, depth, resolvers } => write!(
                f,
                "Decorator depth {} exceeds the {} registered resolver(s) for {}",
                depth, resolvers, service
            ),
            DiError::ResolutionFailed { service, depth, registrations, .. } => write!(
                f,
                "Could not resolve {} with decorator depth {} - registrations: {}",
                service, depth, registrations
            ),
            DiError::Factory(msg) => write!(f, "Factory error: {}", msg),
        }
    }
}

impl std::error::Error for DiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DiError::ResolutionFailed { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

/// Result type for registry operations
///
/// A convenience alias for `Result<T, DiError>` used throughout compose-di
/// and expected as the return type of registered factories.
///
/// # Examples
///
/// ```rust
/// use compose_di::{DiError, DiResult};
///
/// fn build_connection_string() -> DiResult<String> {
///     Ok("postgres://localhost".to_string())
/// }
///
/// fn fail() -> DiResult<()> {
///     Err(DiError::Factory("socket unavailable".to_string()))
/// }
///
/// assert!(build_connection_string().is_ok());
/// assert!(fail().is_err());
/// ```
pub type DiResult<T> = Result<T, DiError>;
