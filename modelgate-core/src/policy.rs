//! Implicit-validation policy

use crate::ModelType;
use std::fmt;
use std::sync::Arc;

/// Predicate deciding whether a model type takes part in automatic validation.
pub type TypeFilter = Arc<dyn Fn(&ModelType) -> bool + Send + Sync>;

/// Immutable policy shared by every traversal.
///
/// # Examples
///
/// ```
/// use modelgate_core::{ModelType, PolicyConfig};
///
/// struct Internal;
/// struct Public;
///
/// let policy = PolicyConfig::new()
///     .implicit_root_collection_elements(true)
///     .with_type_filter(|ty| !ty.is::<Internal>());
///
/// assert!(!policy.implicit_validation_enabled());
/// assert!(policy.matches_filter(&ModelType::of::<Public>()));
/// assert!(!policy.matches_filter(&ModelType::of::<Internal>()));
/// ```
#[derive(Clone, Default)]
pub struct PolicyConfig {
    implicit_validation_enabled: bool,
    implicit_root_collection_element_validation_enabled: bool,
    type_filter: Option<TypeFilter>,
}

impl PolicyConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate every node the host visits, not only the root
    pub fn implicit_validation(mut self, enabled: bool) -> Self {
        self.implicit_validation_enabled = enabled;
        self
    }

    /// Validate elements of a root collection against the element type's validator
    pub fn implicit_root_collection_elements(mut self, enabled: bool) -> Self {
        self.implicit_root_collection_element_validation_enabled = enabled;
        self
    }

    /// Restrict validation to model types accepted by `filter`
    pub fn with_type_filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&ModelType) -> bool + Send + Sync + 'static,
    {
        self.type_filter = Some(Arc::new(filter));
        self
    }

    /// Set or clear a shared type filter
    pub fn with_shared_filter(mut self, filter: Option<TypeFilter>) -> Self {
        self.type_filter = filter;
        self
    }

    pub fn implicit_validation_enabled(&self) -> bool {
        self.implicit_validation_enabled
    }

    pub fn implicit_root_collection_element_validation_enabled(&self) -> bool {
        self.implicit_root_collection_element_validation_enabled
    }

    pub fn type_filter(&self) -> Option<&TypeFilter> {
        self.type_filter.as_ref()
    }

    /// Whether `model_type` passes the type filter. No filter matches everything.
    pub fn matches_filter(&self, model_type: &ModelType) -> bool {
        match &self.type_filter {
            Some(filter) => filter(model_type),
            None => true,
        }
    }
}

impl fmt::Debug for PolicyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PolicyConfig")
            .field("implicit_validation_enabled", &self.implicit_validation_enabled)
            .field(
                "implicit_root_collection_element_validation_enabled",
                &self.implicit_root_collection_element_validation_enabled,
            )
            .field("type_filter", &self.type_filter.as_ref().map(|_| "<fn>"))
            .finish()
    }
}
