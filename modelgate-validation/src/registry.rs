// Validator registry

use crate::Validator;
use modelgate_core::ModelType;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, trace};

/// Source of validators, keyed by model type
pub trait ValidatorRegistry: Send + Sync {
    /// The validator registered for `model_type`, or `None` if there is none
    fn validator_for(&self, model_type: &ModelType) -> Option<Arc<dyn Validator>>;
}

/// In-process validator registry.
///
/// Clones share the same registrations.
#[derive(Clone, Default)]
pub struct ValidatorContainer {
    validators: Arc<RwLock<HashMap<ModelType, Arc<dyn Validator>>>>,
}

impl ValidatorContainer {
    pub fn new() -> Self {
        debug!("Creating new validator container");
        Self::default()
    }

    /// Register a validator, replacing any previous one for the same type
    pub fn register<V: Validator + 'static>(&self, validator: V) -> Arc<dyn Validator> {
        let validator: Arc<dyn Validator> = Arc::new(validator);
        self.register_arc(validator.clone());
        validator
    }

    /// Register a shared validator
    pub fn register_arc(&self, validator: Arc<dyn Validator>) {
        let model_type = validator.model_type();

        trace!(model_type = model_type.name(), "Acquiring write lock for registration");
        let replaced = self.validators.write().insert(model_type, validator).is_some();

        debug!(
            model_type = model_type.name(),
            replaced = replaced,
            "Validator registered"
        );
    }

    /// The validator for `T`
    pub fn resolve<T: 'static>(&self) -> Option<Arc<dyn Validator>> {
        self.validator_for(&ModelType::of::<T>())
    }

    pub fn has(&self, model_type: &ModelType) -> bool {
        self.validators.read().contains_key(model_type)
    }

    pub fn len(&self) -> usize {
        self.validators.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.read().is_empty()
    }

    /// Remove all validators
    pub fn clear(&self) {
        let mut validators = self.validators.write();
        let count = validators.len();
        validators.clear();

        debug!(validator_count = count, "Cleared validator container");
    }
}

impl ValidatorRegistry for ValidatorContainer {
    fn validator_for(&self, model_type: &ModelType) -> Option<Arc<dyn Validator>> {
        let validator = self.validators.read().get(model_type).cloned();

        trace!(
            model_type = model_type.name(),
            found = validator.is_some(),
            "Resolved validator"
        );

        validator
    }
}
