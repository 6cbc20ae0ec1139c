// Per-request validation customizations

use crate::{RequestContext, ValidatorInterceptor, ValidatorSelector};
use async_trait::async_trait;
use modelgate_core::{ModelRef, Result, instance_key};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Request-scoped override for validating one instance
#[derive(Clone, Default)]
pub struct Customization {
    /// Skip validation of the instance (and of anything it contains)
    pub skip: bool,
    pub selector: Option<ValidatorSelector>,
    pub interceptor: Option<Arc<dyn ValidatorInterceptor>>,
}

impl Customization {
    pub fn new() -> Self {
        Self::default()
    }

    /// A customization that vetoes validation
    pub fn skip() -> Self {
        Self {
            skip: true,
            ..Self::default()
        }
    }

    pub fn with_selector(mut self, selector: ValidatorSelector) -> Self {
        self.selector = Some(selector);
        self
    }

    pub fn with_interceptor(mut self, interceptor: Arc<dyn ValidatorInterceptor>) -> Self {
        self.interceptor = Some(interceptor);
        self
    }

    /// Selector to run with; the default selector unless overridden
    pub fn to_selector(&self) -> ValidatorSelector {
        self.selector.clone().unwrap_or_default()
    }
}

impl fmt::Debug for Customization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Customization")
            .field("skip", &self.skip)
            .field("selector", &self.selector)
            .field("has_interceptor", &self.interceptor.is_some())
            .finish()
    }
}

/// Looks up customizations for an instance within a request
#[async_trait]
pub trait CustomizationProvider: Send + Sync {
    async fn customizations(
        &self,
        request: &RequestContext,
        instance: &ModelRef,
    ) -> Result<Customization>;
}

/// Provider that never customizes anything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCustomizations;

#[async_trait]
impl CustomizationProvider for NoCustomizations {
    async fn customizations(
        &self,
        _request: &RequestContext,
        _instance: &ModelRef,
    ) -> Result<Customization> {
        Ok(Customization::default())
    }
}

/// Customizations attached to specific instances.
///
/// Entries keep their instance alive so a recycled allocation can never
/// pick up another instance's customization.
#[derive(Clone, Default)]
pub struct InstanceCustomizations {
    entries: Arc<RwLock<HashMap<usize, (ModelRef, Customization)>>>,
}

impl InstanceCustomizations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `customization` to `instance`, replacing any previous one
    pub fn customize(&self, instance: &ModelRef, customization: Customization) {
        debug!(customization = ?customization, "Instance customization registered");
        self.entries
            .write()
            .insert(instance_key(instance), (instance.clone(), customization));
    }

    pub fn remove(&self, instance: &ModelRef) -> Option<Customization> {
        self.entries
            .write()
            .remove(&instance_key(instance))
            .map(|(_, customization)| customization)
    }

    pub fn get(&self, instance: &ModelRef) -> Option<Customization> {
        self.entries
            .read()
            .get(&instance_key(instance))
            .filter(|(owner, _)| Arc::ptr_eq(owner, instance))
            .map(|(_, customization)| customization.clone())
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[async_trait]
impl CustomizationProvider for InstanceCustomizations {
    async fn customizations(
        &self,
        _request: &RequestContext,
        instance: &ModelRef,
    ) -> Result<Customization> {
        Ok(self.get(instance).unwrap_or_default())
    }
}
