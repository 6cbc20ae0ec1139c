//! Host-invoked model validation
//!
//! [`ModelValidator`] is what a host calls for every node it binds. It asks
//! the scope resolver whether the node is in scope and, if so, resolves the
//! validator, the request's customizations and the interceptor, builds the
//! validation context and runs it.

use crate::{
    CustomizationProvider, FieldError, NoCustomizations, RequestContext, ValidationContext,
    ValidationResult, ValidatorContainer, ValidatorInterceptor, ValidatorRegistry,
};
use modelgate_core::{NodeMetadata, PolicyConfig, Result, RootContext, ValidationScopeResolver};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// Validates bound nodes on behalf of a host.
///
/// Cheap to clone; clones share their collaborators.
#[derive(Clone)]
pub struct ModelValidator {
    resolver: ValidationScopeResolver,
    registry: Arc<dyn ValidatorRegistry>,
    customizations: Arc<dyn CustomizationProvider>,
    default_interceptor: Option<Arc<dyn ValidatorInterceptor>>,
}

impl ModelValidator {
    pub fn builder() -> ModelValidatorBuilder {
        ModelValidatorBuilder::new()
    }

    pub fn resolver(&self) -> &ValidationScopeResolver {
        &self.resolver
    }

    pub fn policy(&self) -> &PolicyConfig {
        self.resolver.policy()
    }

    /// Validate `node` and return its field errors.
    ///
    /// Nodes that are out of scope, have no registered validator or are
    /// skipped by a customization yield no errors.
    pub async fn validate(
        &self,
        request: &RequestContext,
        node: &NodeMetadata,
        root: &RootContext,
    ) -> Result<Vec<FieldError>> {
        Ok(self.run(request, node, root).await?.into_field_errors())
    }

    /// Validate `node` and return the validator's (possibly intercepted) result
    pub async fn run(
        &self,
        request: &RequestContext,
        node: &NodeMetadata,
        root: &RootContext,
    ) -> Result<ValidationResult> {
        if !self.resolver.should_validate(node, root) {
            return Ok(ValidationResult::valid());
        }

        // Scope resolution only proceeds for bound nodes
        let Some(instance) = node.value() else {
            return Ok(ValidationResult::valid());
        };

        let Some(validator) = self.registry.validator_for(node.model_type()) else {
            trace!(
                node = %node.id(),
                model_type = node.model_type().name(),
                "No validator registered"
            );
            return Ok(ValidationResult::valid());
        };

        let customization = self.customizations.customizations(request, instance).await?;
        if customization.skip {
            debug!(node = %node.id(), "Validation skipped by instance customization");
            return Ok(ValidationResult::valid());
        }

        if let Some(container) = node.container() {
            let container_customization =
                self.customizations.customizations(request, container).await?;
            if container_customization.skip {
                debug!(node = %node.id(), "Validation skipped by container customization");
                return Ok(ValidationResult::valid());
            }
        }

        let selector = customization.to_selector();
        let interceptor = customization
            .interceptor
            .clone()
            .or_else(|| validator.interceptor())
            .or_else(|| self.default_interceptor.clone());

        let mut context = ValidationContext::for_host(instance.clone(), selector, request);

        if let Some(interceptor) = &interceptor
            && let Some(replacement) = interceptor.before_validation(request, &context)
        {
            context = replacement;
        }

        let mut result = validator.validate(&context).await?;

        if let Some(interceptor) = &interceptor
            && let Some(replacement) = interceptor.after_validation(request, &context, &result)
        {
            result = replacement;
        }

        debug!(
            node = %node.id(),
            model_type = node.model_type().name(),
            failures = result.len(),
            "Validated node"
        );

        Ok(result)
    }
}

impl fmt::Debug for ModelValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelValidator")
            .field("resolver", &self.resolver)
            .field("has_default_interceptor", &self.default_interceptor.is_some())
            .finish()
    }
}

/// Builder for [`ModelValidator`].
///
/// Unset collaborators default to the root-only policy, an empty
/// [`ValidatorContainer`] and [`NoCustomizations`].
pub struct ModelValidatorBuilder {
    policy: Arc<PolicyConfig>,
    registry: Option<Arc<dyn ValidatorRegistry>>,
    customizations: Option<Arc<dyn CustomizationProvider>>,
    default_interceptor: Option<Arc<dyn ValidatorInterceptor>>,
}

impl ModelValidatorBuilder {
    pub fn new() -> Self {
        Self {
            policy: Arc::new(PolicyConfig::default()),
            registry: None,
            customizations: None,
            default_interceptor: None,
        }
    }

    pub fn policy(mut self, policy: PolicyConfig) -> Self {
        self.policy = Arc::new(policy);
        self
    }

    pub fn shared_policy(mut self, policy: Arc<PolicyConfig>) -> Self {
        self.policy = policy;
        self
    }

    pub fn registry<R: ValidatorRegistry + 'static>(mut self, registry: R) -> Self {
        self.registry = Some(Arc::new(registry));
        self
    }

    pub fn customizations<C: CustomizationProvider + 'static>(mut self, customizations: C) -> Self {
        self.customizations = Some(Arc::new(customizations));
        self
    }

    /// Interceptor used when neither the customization nor the validator supplies one
    pub fn default_interceptor(mut self, interceptor: Arc<dyn ValidatorInterceptor>) -> Self {
        self.default_interceptor = Some(interceptor);
        self
    }

    pub fn build(self) -> ModelValidator {
        ModelValidator {
            resolver: ValidationScopeResolver::from_shared(self.policy),
            registry: self
                .registry
                .unwrap_or_else(|| Arc::new(ValidatorContainer::new())),
            customizations: self
                .customizations
                .unwrap_or_else(|| Arc::new(NoCustomizations)),
            default_interceptor: self.default_interceptor,
        }
    }
}

impl Default for ModelValidatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
