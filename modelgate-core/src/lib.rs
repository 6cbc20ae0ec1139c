//! Core types for modelgate
//!
//! Model metadata, the per-traversal node arena, the implicit-validation
//! policy and the scope resolver that decides which nodes of a bound object
//! graph get validated.
//!
//! # Examples
//!
//! ```
//! use modelgate_core::{ModelGraph, PolicyConfig, ValidationScopeResolver};
//! use std::sync::Arc;
//!
//! struct Signup { address: Option<Arc<Address>> }
//! struct Address;
//!
//! let signup = Arc::new(Signup { address: Some(Arc::new(Address)) });
//!
//! let mut graph = ModelGraph::new();
//! let root = graph.add_root(Some(signup.clone())).unwrap();
//! let address = graph.add_property(root, "Address", signup.address.clone()).unwrap();
//! let context = graph.root_context().unwrap();
//!
//! // Root-only validation by default
//! let resolver = ValidationScopeResolver::new(PolicyConfig::default());
//! assert!(resolver.should_validate(graph.node(root).unwrap(), &context));
//! assert!(!resolver.should_validate(graph.node(address).unwrap(), &context));
//!
//! // Implicit validation reaches every bound node
//! let resolver = ValidationScopeResolver::new(PolicyConfig::new().implicit_validation(true));
//! assert!(resolver.should_validate(graph.node(address).unwrap(), &context));
//! ```

pub mod error;
pub mod graph;
pub mod logging;
pub mod model;
pub mod policy;
pub mod scope;

pub use error::{Error, Result};
pub use graph::{ModelGraph, RootContext};
pub use model::{
    ModelRef, ModelType, NodeId, NodeKind, NodeMetadata, PathSegment, instance_key, model_ref,
};
pub use policy::{PolicyConfig, TypeFilter};
pub use scope::{ScopeDecision, SkipReason, ValidationScopeResolver, decide, should_validate};
