// Validation traits and contexts

use crate::{PropertyChain, ValidationResult, ValidatorInterceptor, ValidatorSelector};
use async_trait::async_trait;
use modelgate_core::{ModelRef, ModelType, PathSegment, Result};
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Root data key marking a validation started by the host's model binding
pub const INVOKED_BY_HOST: &str = "InvokedByHost";

/// Root data key holding the id of the request that started validation
pub const REQUEST_ID: &str = "RequestId";

/// Trait for validators of one model type
#[async_trait]
pub trait Validator: Send + Sync {
    /// Type of instance this validator accepts
    fn model_type(&self) -> ModelType;

    /// Validate the instance carried by `context`
    async fn validate(&self, context: &ValidationContext) -> Result<ValidationResult>;

    /// Interceptor supplied by the validator itself, if any
    fn interceptor(&self) -> Option<Arc<dyn ValidatorInterceptor>> {
        None
    }
}

/// Per-request data handed to customization providers and interceptors
#[derive(Debug, Clone)]
pub struct RequestContext {
    request_id: Uuid,
    items: HashMap<String, String>,
}

impl RequestContext {
    /// Create a context with a fresh request id
    pub fn new() -> Self {
        Self::with_request_id(Uuid::new_v4())
    }

    pub fn with_request_id(request_id: Uuid) -> Self {
        Self {
            request_id,
            items: HashMap::new(),
        }
    }

    /// Add request data (route values, action name, ...)
    pub fn with_item(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.items.insert(key.into(), value.into());
        self
    }

    pub fn request_id(&self) -> Uuid {
        self.request_id
    }

    pub fn item(&self, key: &str) -> Option<&str> {
        self.items.get(key).map(String::as_str)
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Execution context for one validator run
#[derive(Clone)]
pub struct ValidationContext {
    instance: ModelRef,
    property_chain: PropertyChain,
    selector: ValidatorSelector,
    invoked_by_host: bool,
    root_data: HashMap<String, serde_json::Value>,
}

impl ValidationContext {
    pub fn new(instance: ModelRef, property_chain: PropertyChain, selector: ValidatorSelector) -> Self {
        Self {
            instance,
            property_chain,
            selector,
            invoked_by_host: false,
            root_data: HashMap::new(),
        }
    }

    /// Context for a validation started by the host for `request`
    pub fn for_host(instance: ModelRef, selector: ValidatorSelector, request: &RequestContext) -> Self {
        Self::new(instance, PropertyChain::new(), selector)
            .with_root_data(INVOKED_BY_HOST, true)
            .with_root_data(REQUEST_ID, request.request_id().to_string())
            .invoked_by_host(true)
    }

    fn invoked_by_host(mut self, invoked: bool) -> Self {
        self.invoked_by_host = invoked;
        self
    }

    /// Add root data shared with nested validators
    pub fn with_root_data(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.root_data.insert(key.into(), value.into());
        self
    }

    /// Replace the selector
    pub fn with_selector(mut self, selector: ValidatorSelector) -> Self {
        self.selector = selector;
        self
    }

    /// Context for a nested instance reached through `segment`
    pub fn child(&self, segment: PathSegment, instance: ModelRef) -> Self {
        self.descend([segment], instance)
    }

    /// Context for a nested instance reached through several segments.
    ///
    /// The selector, root marker and root data carry over.
    pub fn descend(&self, segments: impl IntoIterator<Item = PathSegment>, instance: ModelRef) -> Self {
        let mut property_chain = self.property_chain.clone();
        for segment in segments {
            property_chain.push(segment);
        }

        Self {
            instance,
            property_chain,
            selector: self.selector.clone(),
            invoked_by_host: self.invoked_by_host,
            root_data: self.root_data.clone(),
        }
    }

    pub fn instance(&self) -> &ModelRef {
        &self.instance
    }

    /// The instance as a `T`, if it is one
    pub fn instance_as<T: Any>(&self) -> Option<&T> {
        (*self.instance).downcast_ref::<T>()
    }

    pub fn property_chain(&self) -> &PropertyChain {
        &self.property_chain
    }

    pub fn selector(&self) -> &ValidatorSelector {
        &self.selector
    }

    pub fn is_invoked_by_host(&self) -> bool {
        self.invoked_by_host
    }

    pub fn root_data(&self) -> &HashMap<String, serde_json::Value> {
        &self.root_data
    }

    pub fn root_value(&self, key: &str) -> Option<&serde_json::Value> {
        self.root_data.get(key)
    }
}

impl fmt::Debug for ValidationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationContext")
            .field("property_chain", &self.property_chain)
            .field("selector", &self.selector)
            .field("invoked_by_host", &self.invoked_by_host)
            .field("root_data", &self.root_data)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modelgate_core::model_ref;

    struct Person {
        name: &'static str,
    }

    #[test]
    fn test_host_context() {
        let request = RequestContext::new();
        let context = ValidationContext::for_host(
            model_ref(Person { name: "Ada" }),
            ValidatorSelector::Default,
            &request,
        );

        assert!(context.is_invoked_by_host());
        assert!(context.property_chain().is_empty());
        assert_eq!(context.root_value(INVOKED_BY_HOST), Some(&serde_json::json!(true)));
        assert_eq!(
            context.root_value(REQUEST_ID),
            Some(&serde_json::json!(request.request_id().to_string()))
        );
        assert_eq!(context.instance_as::<Person>().map(|p| p.name), Some("Ada"));
        assert!(context.instance_as::<String>().is_none());
    }

    #[test]
    fn test_plain_context_is_not_host_invoked() {
        let context = ValidationContext::new(
            model_ref(Person { name: "Ada" }),
            PropertyChain::new(),
            ValidatorSelector::Default,
        );
        assert!(!context.is_invoked_by_host());
        assert!(context.root_data().is_empty());
    }

    #[test]
    fn test_child_context() {
        let request = RequestContext::new();
        let parent = ValidationContext::for_host(
            model_ref(Person { name: "Ada" }),
            ValidatorSelector::members(["Child"]),
            &request,
        );
        let child = parent.child(PathSegment::property("Child"), model_ref(Person { name: "Bo" }));

        assert_eq!(child.property_chain().to_string(), "Child");
        assert_eq!(child.selector(), parent.selector());
        assert!(child.is_invoked_by_host());
        assert_eq!(child.instance_as::<Person>().map(|p| p.name), Some("Bo"));
    }

    #[test]
    fn test_request_items() {
        let request = RequestContext::new().with_item("action", "Create");
        assert_eq!(request.item("action"), Some("Create"));
        assert_eq!(request.item("controller"), None);
        assert_ne!(request.request_id(), RequestContext::new().request_id());
    }
}
