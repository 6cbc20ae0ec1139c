// Closure-backed rule sets

use crate::{Validator, ValidationContext, ValidationFailure, ValidationResult, ValidatorInterceptor};
use async_trait::async_trait;
use modelgate_core::{Error, ModelRef, ModelType, PathSegment, Result};
use std::any::Any;
use std::sync::Arc;

type Predicate<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;
type ChildAccessor<T> = Arc<dyn Fn(&T) -> Option<ModelRef> + Send + Sync>;
type EachAccessor<T> = Arc<dyn Fn(&T) -> Vec<ModelRef> + Send + Sync>;

enum Rule<T> {
    Check {
        property: String,
        rule_set: Option<String>,
        predicate: Predicate<T>,
        message: String,
    },
    Child {
        property: String,
        accessor: ChildAccessor<T>,
        validator: Arc<dyn Validator>,
    },
    Each {
        property: String,
        accessor: EachAccessor<T>,
        validator: Arc<dyn Validator>,
    },
}

/// Validator for `T` built from closures.
///
/// Child and collection rules delegate to another validator explicitly;
/// their failures are reported below the child's property path.
///
/// # Examples
///
/// ```
/// use modelgate_validation::RuleSet;
///
/// struct Signup {
///     email: String,
///     surname: Option<String>,
/// }
///
/// let validator = RuleSet::<Signup>::new()
///     .rule("Email", |s: &Signup| s.email.contains('@'), "'Email' is not a valid email address.")
///     .rule("Surname", |s: &Signup| s.surname.is_some(), "'Surname' must not be empty.")
///     .rule_in_set("Update", "Surname", |s: &Signup| {
///         s.surname.as_deref().is_some_and(|n| n.len() > 3)
///     }, "'Surname' is too short.");
///
/// assert_eq!(validator.len(), 3);
/// ```
pub struct RuleSet<T> {
    rules: Vec<Rule<T>>,
    interceptor: Option<Arc<dyn ValidatorInterceptor>>,
}

impl<T: Any + Send + Sync> RuleSet<T> {
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            interceptor: None,
        }
    }

    /// Fail `property` with `message` unless `predicate` holds
    pub fn rule<F>(self, property: impl Into<String>, predicate: F, message: impl Into<String>) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.push_check(None, property.into(), Arc::new(predicate), message.into())
    }

    /// Like [`rule`](Self::rule), but only runs when `rule_set` is selected
    pub fn rule_in_set<F>(
        self,
        rule_set: impl Into<String>,
        property: impl Into<String>,
        predicate: F,
        message: impl Into<String>,
    ) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.push_check(
            Some(rule_set.into()),
            property.into(),
            Arc::new(predicate),
            message.into(),
        )
    }

    fn push_check(
        mut self,
        rule_set: Option<String>,
        property: String,
        predicate: Predicate<T>,
        message: String,
    ) -> Self {
        self.rules.push(Rule::Check {
            property,
            rule_set,
            predicate,
            message,
        });
        self
    }

    /// Validate the instance returned by `accessor` with `validator`
    pub fn child<F>(mut self, property: impl Into<String>, accessor: F, validator: Arc<dyn Validator>) -> Self
    where
        F: Fn(&T) -> Option<ModelRef> + Send + Sync + 'static,
    {
        self.rules.push(Rule::Child {
            property: property.into(),
            accessor: Arc::new(accessor),
            validator,
        });
        self
    }

    /// Validate every element returned by `accessor` with `validator`.
    ///
    /// An empty `property` reports failures directly below the index, as for
    /// a validator of a collection type.
    pub fn each<F>(mut self, property: impl Into<String>, accessor: F, validator: Arc<dyn Validator>) -> Self
    where
        F: Fn(&T) -> Vec<ModelRef> + Send + Sync + 'static,
    {
        self.rules.push(Rule::Each {
            property: property.into(),
            accessor: Arc::new(accessor),
            validator,
        });
        self
    }

    /// Interceptor applied when the host runs this validator
    pub fn with_interceptor(mut self, interceptor: Arc<dyn ValidatorInterceptor>) -> Self {
        self.interceptor = Some(interceptor);
        self
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<T: Any + Send + Sync> Default for RuleSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Any + Send + Sync> Validator for RuleSet<T> {
    fn model_type(&self) -> ModelType {
        ModelType::of::<T>()
    }

    async fn validate(&self, context: &ValidationContext) -> Result<ValidationResult> {
        let instance = context.instance_as::<T>().ok_or_else(|| {
            Error::Validator(format!(
                "expected an instance of {}",
                std::any::type_name::<T>()
            ))
        })?;

        let chain = context.property_chain();
        let selector = context.selector();
        let mut result = ValidationResult::valid();

        for rule in &self.rules {
            match rule {
                Rule::Check {
                    property,
                    rule_set,
                    predicate,
                    message,
                } => {
                    let path = chain.build(property);
                    if selector.can_execute(rule_set.as_deref(), &path) && !predicate(instance) {
                        result.add(ValidationFailure::new(path, message.clone()));
                    }
                }
                Rule::Child {
                    property,
                    accessor,
                    validator,
                } => {
                    if !selector.can_descend(None, &chain.build(property)) {
                        continue;
                    }
                    if let Some(child) = accessor(instance) {
                        let child_context = context.child(PathSegment::property(property.as_str()), child);
                        result.merge(validator.validate(&child_context).await?);
                    }
                }
                Rule::Each {
                    property,
                    accessor,
                    validator,
                } => {
                    if !property.is_empty() && !selector.can_descend(None, &chain.build(property)) {
                        continue;
                    }
                    for (index, element) in accessor(instance).into_iter().enumerate() {
                        let element_context = context.descend(
                            [PathSegment::property(property.as_str()), PathSegment::Index(index)],
                            element,
                        );
                        result.merge(validator.validate(&element_context).await?);
                    }
                }
            }
        }

        Ok(result)
    }

    fn interceptor(&self) -> Option<Arc<dyn ValidatorInterceptor>> {
        self.interceptor.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PropertyChain, ValidatorSelector};
    use modelgate_core::model_ref;

    struct Child {
        name: Option<String>,
    }

    struct Parent {
        id: u32,
        child: Option<Arc<Child>>,
        children: Vec<Arc<Child>>,
    }

    fn child_validator() -> Arc<dyn Validator> {
        Arc::new(RuleSet::<Child>::new().rule(
            "Name",
            |c: &Child| c.name.is_some(),
            "NotNullInjected",
        ))
    }

    fn parent_validator() -> RuleSet<Parent> {
        RuleSet::<Parent>::new()
            .rule("Id", |p: &Parent| p.id > 0, "'Id' must be greater than '0'.")
            .child(
                "Child",
                |p: &Parent| p.child.clone().map(|c| c as ModelRef),
                child_validator(),
            )
            .each(
                "Children",
                |p: &Parent| p.children.iter().map(|c| c.clone() as ModelRef).collect(),
                child_validator(),
            )
    }

    fn parent() -> Parent {
        Parent {
            id: 0,
            child: Some(Arc::new(Child { name: None })),
            children: vec![
                Arc::new(Child { name: None }),
                Arc::new(Child {
                    name: Some("ok".into()),
                }),
            ],
        }
    }

    fn context_for(instance: ModelRef, selector: ValidatorSelector) -> ValidationContext {
        ValidationContext::new(instance, PropertyChain::new(), selector)
    }

    fn paths(result: &ValidationResult) -> Vec<&str> {
        result
            .failures
            .iter()
            .map(|f| f.property_path.as_str())
            .collect()
    }

    #[tokio::test]
    async fn test_nested_paths() {
        let result = parent_validator()
            .validate(&context_for(model_ref(parent()), ValidatorSelector::Default))
            .await
            .unwrap();

        assert_eq!(paths(&result), vec!["Id", "Child.Name", "Children[0].Name"]);
        assert_eq!(result.failures[1].message, "NotNullInjected");
    }

    #[tokio::test]
    async fn test_each_without_property() {
        let validator = RuleSet::<Vec<Arc<Child>>>::new().each(
            "",
            |items: &Vec<Arc<Child>>| items.iter().map(|c| c.clone() as ModelRef).collect(),
            child_validator(),
        );
        let items = vec![
            Arc::new(Child { name: None }),
            Arc::new(Child { name: None }),
        ];

        let result = validator
            .validate(&context_for(model_ref(items), ValidatorSelector::Default))
            .await
            .unwrap();

        assert_eq!(paths(&result), vec!["[0].Name", "[1].Name"]);
    }

    #[tokio::test]
    async fn test_member_selector() {
        let result = parent_validator()
            .validate(&context_for(
                model_ref(parent()),
                ValidatorSelector::members(["Child"]),
            ))
            .await
            .unwrap();

        assert_eq!(paths(&result), vec!["Child.Name"]);
    }

    #[tokio::test]
    async fn test_rule_sets() {
        let validator = RuleSet::<Child>::new()
            .rule("Name", |c: &Child| c.name.is_some(), "required")
            .rule_in_set(
                "Update",
                "Name",
                |c: &Child| c.name.as_deref().is_some_and(|n| n.len() > 3),
                "too short",
            );
        let child = || model_ref(Child {
            name: Some("ab".into()),
        });

        let default = validator
            .validate(&context_for(child(), ValidatorSelector::Default))
            .await
            .unwrap();
        assert!(default.is_valid());

        let update = validator
            .validate(&context_for(child(), ValidatorSelector::rule_sets(["Update"])))
            .await
            .unwrap();
        assert_eq!(update.failures[0].message, "too short");
        assert_eq!(update.len(), 1);
    }

    #[tokio::test]
    async fn test_child_context_keeps_host_marker() {
        struct Marker;

        #[async_trait]
        impl Validator for Marker {
            fn model_type(&self) -> ModelType {
                ModelType::of::<Child>()
            }

            async fn validate(&self, context: &ValidationContext) -> Result<ValidationResult> {
                let mut result = ValidationResult::valid();
                if context.is_invoked_by_host() {
                    result.add(ValidationFailure::new(
                        context.property_chain().build("Host"),
                        "invoked by host",
                    ));
                }
                Ok(result)
            }
        }

        let validator = RuleSet::<Parent>::new().each(
            "Children",
            |p: &Parent| p.children.iter().map(|c| c.clone() as ModelRef).collect(),
            Arc::new(Marker),
        );
        let context = ValidationContext::for_host(
            model_ref(parent()),
            ValidatorSelector::Default,
            &crate::RequestContext::new(),
        );

        let result = validator.validate(&context).await.unwrap();
        assert_eq!(paths(&result), vec!["Children[0].Host", "Children[1].Host"]);
    }

    #[tokio::test]
    async fn test_wrong_instance_type() {
        let error = parent_validator()
            .validate(&context_for(model_ref(1u32), ValidatorSelector::Default))
            .await
            .unwrap_err();

        assert!(matches!(error, Error::Validator(_)));
    }

    #[test]
    fn test_interceptor_is_exposed() {
        let validator =
            RuleSet::<Child>::new().with_interceptor(Arc::new(crate::LoggingInterceptor));
        assert!(validator.interceptor().is_some());
        assert!(RuleSet::<Child>::new().interceptor().is_none());
        assert!(validator.is_empty());
    }
}
