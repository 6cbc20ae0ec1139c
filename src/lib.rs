// modelgate - automatic model validation for web hosts
//
// Decides which nodes of a bound object graph are validated and runs their
// validators with request customizations and interceptors.

// Re-export core functionality
pub use modelgate_core::*;
pub use modelgate_validation::*;

// Re-export optional crates
#[cfg(feature = "config")]
pub use modelgate_config;

#[cfg(feature = "testing")]
pub use modelgate_testing;

pub use async_trait::async_trait;

pub mod prelude {
    pub use crate::{
        Customization,
        CustomizationProvider,
        Error,
        FieldError,
        InstanceCustomizations,
        ModelGraph,
        ModelRef,
        ModelType,
        ModelValidator,
        NodeKind,
        NodeMetadata,
        PolicyConfig,
        RequestContext,
        Result,
        RootContext,
        RuleSet,
        ScopeDecision,
        SkipReason,
        ValidationContext,
        ValidationFailure,
        ValidationResult,
        ValidationScopeResolver,
        Validator,
        ValidatorContainer,
        ValidatorInterceptor,
        ValidatorRegistry,
        ValidatorSelector,
        async_trait,
    };

    #[cfg(feature = "config")]
    pub use modelgate_config::AutoValidationConfig;

    #[cfg(feature = "testing")]
    pub use modelgate_testing::{ModelState, TestHost};
}
