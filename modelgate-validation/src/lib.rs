//! Host-invoked validation for modelgate
//!
//! Validators are registered per model type in a [`ValidatorContainer`].
//! A host hands every bound node to a [`ModelValidator`], which applies the
//! implicit-validation scope, the request's [`Customization`]s and any
//! [`ValidatorInterceptor`] before running the validator.
//!
//! # Examples
//!
//! ```
//! use modelgate_core::ModelGraph;
//! use modelgate_validation::{ModelValidator, RequestContext, RuleSet, ValidatorContainer};
//! use std::sync::Arc;
//!
//! struct Signup { email: String }
//!
//! # tokio_test::block_on(async {
//! let validators = ValidatorContainer::new();
//! validators.register(RuleSet::<Signup>::new().rule(
//!     "Email",
//!     |s: &Signup| s.email.contains('@'),
//!     "'Email' is not a valid email address.",
//! ));
//!
//! let mut graph = ModelGraph::new();
//! let root = graph.add_root(Some(Arc::new(Signup { email: "nope".into() }))).unwrap();
//! let context = graph.root_context().unwrap();
//!
//! let validator = ModelValidator::builder().registry(validators).build();
//! let errors = validator
//!     .validate(&RequestContext::new(), graph.node(root).unwrap(), &context)
//!     .await
//!     .unwrap();
//!
//! assert_eq!(errors[0].path, "Email");
//! # });
//! ```

pub mod customization;
pub mod errors;
pub mod interceptor;
pub mod model_validator;
pub mod path;
pub mod registry;
pub mod rules;
pub mod selector;
pub mod traits;

pub use customization::{Customization, CustomizationProvider, InstanceCustomizations, NoCustomizations};
pub use errors::{FieldError, ValidationFailure, ValidationResult};
pub use interceptor::{LoggingInterceptor, TransformInterceptor, ValidatorInterceptor};
pub use model_validator::{ModelValidator, ModelValidatorBuilder};
pub use path::{PropertyChain, join_path};
pub use registry::{ValidatorContainer, ValidatorRegistry};
pub use rules::RuleSet;
pub use selector::{ALL_RULE_SETS, DEFAULT_RULE_SET, ValidatorSelector};
pub use traits::{INVOKED_BY_HOST, REQUEST_ID, RequestContext, ValidationContext, Validator};
