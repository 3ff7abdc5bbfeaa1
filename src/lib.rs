//! # compose-di
//!
//! Configuration-time dependency injection for Rust, inspired by Rebus'
//! Injectionist.
//!
//! ## Features
//!
//! - **Explicit factories**: every service is built by a caller-supplied
//!   closure; no reflection, no auto-wiring
//! - **Decorator chains**: layer decorator factories over a primary; a
//!   decorator resolves its own service type to receive the next resolver
//!   inward
//! - **Within-resolution caching**: each service type is constructed at most
//!   once per top-level request, shared by every dependent
//! - **Instance tracking**: every resolution returns the full list of
//!   instances it created, in dependency order
//!
//! This is a composition-root tool, not a runtime container: registries are
//! populated single-threaded, resolved once, and the resulting graph handed
//! to the host application.
//!
//! ## Quick Start
//!
//! ```rust
//! use compose_di::{DiResult, ServiceRegistry};
//! use std::sync::Arc;
//!
//! struct Config {
//!     connection_string: String,
//! }
//!
//! struct Database {
//!     config: Arc<Config>,
//! }
//!
//! # fn main() -> DiResult<()> {
//! let mut registry = ServiceRegistry::new();
//! registry.register::<Config, _>(|_| Ok(Config {
//!     connection_string: "postgres://localhost".to_string(),
//! }))?;
//! registry.register::<Database, _>(|ctx| Ok(Database {
//!     config: ctx.get::<Config>()?,
//! }))?;
//!
//! let result = registry.get::<Database>()?;
//! assert_eq!(result.instance().config.connection_string, "postgres://localhost");
//! # Ok(())
//! # }
//! ```
//!
//! ## Decoration
//!
//! A decorator factory asks the context for its own service type and wraps
//! whatever comes back; the most recently registered decorator ends up
//! outermost, regardless of whether it was registered before or after the
//! primary.
//!
//! ```rust
//! use compose_di::{DiResult, ServiceRegistry};
//! use std::sync::Arc;
//!
//! trait Transport: Send + Sync {
//!     fn send(&self, msg: &str) -> String;
//! }
//!
//! struct TcpTransport;
//! impl Transport for TcpTransport {
//!     fn send(&self, msg: &str) -> String { format!("tcp:{}", msg) }
//! }
//!
//! struct Compressing(Arc<dyn Transport>);
//! impl Transport for Compressing {
//!     fn send(&self, msg: &str) -> String { format!("gz({})", self.0.send(msg)) }
//! }
//!
//! # fn main() -> DiResult<()> {
//! let mut registry = ServiceRegistry::new();
//! registry.decorate_trait::<dyn Transport, _>(|ctx| {
//!     Ok(Arc::new(Compressing(ctx.get_trait::<dyn Transport>()?)))
//! });
//! registry.register_trait::<dyn Transport, _>(|_| Ok(Arc::new(TcpTransport)))?;
//!
//! let result = registry.get_trait::<dyn Transport>()?;
//! assert_eq!(result.instance().send("hi"), "gz(tcp:hi)");
//! // Creation order: primary first, then the decorator wrapping it.
//! assert_eq!(result.tracked_instances().len(), 2);
//! # Ok(())
//! # }
//! ```

// Module declarations
pub mod context;
pub mod error;
pub mod key;
pub mod registry;
pub mod result;

// Internal modules
mod registration;

// Re-export core types
pub use context::ResolutionContext;
pub use error::{DiError, DiResult};
pub use key::{key_of_trait, key_of_type, Key};
pub use registry::ServiceRegistry;
pub use result::{AnyArc, ResolutionResult, TrackedInstance, TrackedInstances};
