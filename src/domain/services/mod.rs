//! Domain Services
//!
//! Pure algorithms that operate on domain entities through narrow traits.
//! These services have no I/O dependencies and are easily testable.

mod dependency_resolver;

pub use dependency_resolver::{
    DependencyGraph, DependencyResolver, Resolution, ResolverOptions,
};
