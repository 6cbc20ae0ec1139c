// In-process model binding host

use crate::ModelState;
use modelgate_core::{ModelGraph, Result};
use modelgate_validation::{ModelValidator, PropertyChain, RequestContext, join_path};
use tracing::debug;

/// Drives a [`ModelValidator`] over a bound [`ModelGraph`] the way a web
/// host does during model binding.
///
/// Every node is offered to the validator in pre-order; errors are keyed by
/// the host prefix, the node's path and the failure's own path.
#[derive(Debug, Clone)]
pub struct TestHost {
    validator: ModelValidator,
    request: RequestContext,
    prefix: String,
}

impl TestHost {
    pub fn new(validator: ModelValidator) -> Self {
        Self {
            validator,
            request: RequestContext::new(),
            prefix: String::new(),
        }
    }

    pub fn with_request(mut self, request: RequestContext) -> Self {
        self.request = request;
        self
    }

    /// Key errors below `prefix`, usually the bound parameter name
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn request(&self) -> &RequestContext {
        &self.request
    }

    pub fn validator(&self) -> &ModelValidator {
        &self.validator
    }

    /// Validate every node of `graph`
    pub async fn validate(&self, graph: &ModelGraph) -> Result<ModelState> {
        let root = graph.root_context()?;
        let mut state = ModelState::new();

        for id in graph.preorder() {
            let node = graph.node(id)?;
            let errors = self.validator.validate(&self.request, node, &root).await?;
            if errors.is_empty() {
                continue;
            }

            let node_path = PropertyChain::from_segments(graph.path(id)?).to_string();
            debug!(node = %id, path = %node_path, errors = errors.len(), "Collected node errors");
            state.add_field_errors(&join_path(&self.prefix, &node_path), errors);
        }

        Ok(state)
    }
}
