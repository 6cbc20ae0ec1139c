//! Testing utilities for modelgate.
//!
//! [`TestHost`] plays the part of a web framework's model binder: it walks
//! a bound [`ModelGraph`](modelgate_core::ModelGraph), hands every node to a
//! [`ModelValidator`](modelgate_validation::ModelValidator) and collects the
//! errors into a [`ModelState`].
//!
//! ```
//! use modelgate_core::ModelGraph;
//! use modelgate_testing::*;
//! use modelgate_validation::{ModelValidator, RuleSet, ValidatorContainer};
//! use std::sync::Arc;
//!
//! struct Signup { surname: Option<String> }
//!
//! # tokio_test::block_on(async {
//! let validators = ValidatorContainer::new();
//! validators.register(RuleSet::<Signup>::new().rule(
//!     "Surname",
//!     |s: &Signup| s.surname.is_some(),
//!     "'Surname' must not be empty.",
//! ));
//!
//! let mut graph = ModelGraph::new();
//! graph.add_root(Some(Arc::new(Signup { surname: None }))).unwrap();
//!
//! let host = TestHost::new(ModelValidator::builder().registry(validators).build())
//!     .with_prefix("signup");
//! let state = host.validate(&graph).await.unwrap();
//!
//! assert_error(&state, "signup.Surname", "'Surname' must not be empty.");
//! # });
//! ```

pub mod assertions;
pub mod host;
pub mod model_state;

pub use assertions::*;
pub use host::TestHost;
pub use model_state::ModelState;
