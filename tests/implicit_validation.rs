//! Root-only validation, implicit child validation and explicit child validators

mod common;

use common::*;
use modelgate::modelgate_config::AutoValidationConfig;
use modelgate::prelude::*;
use modelgate_testing::*;
use std::sync::Arc;

struct ChildModel {
    name: Option<String>,
}

struct ParentModel {
    child: Option<Arc<ChildModel>>,
}

struct ParentModel6 {
    children: Vec<Arc<ChildModel>>,
}

fn bind_parent_model(parent: Arc<ParentModel>) -> ModelGraph {
    let mut graph = ModelGraph::new();
    let root = graph.add_root(Some(parent.clone())).unwrap();
    graph.add_property(root, "Child", parent.child.clone()).unwrap();
    graph
}

fn injected_child_validator() -> RuleSet<ChildModel> {
    RuleSet::<ChildModel>::new().rule("Name", |c: &ChildModel| c.name.is_some(), "NotNullInjected")
}

#[tokio::test]
async fn test_unvalidated_child_reports_through_parent_only() {
    let validators = ValidatorContainer::new();
    validators.register(RuleSet::<ParentModel>::new().rule(
        "Child.Name",
        |p: &ParentModel| p.child.as_ref().is_some_and(|c| c.name.is_some()),
        "'Child Name' must not be empty.",
    ));

    let graph = bind_parent_model(Arc::new(ParentModel {
        child: Some(Arc::new(ChildModel { name: None })),
    }));
    let state = TestHost::new(validator(PolicyConfig::new(), validators))
        .validate(&graph)
        .await
        .unwrap();

    assert_error_count(&state, 1);
    assert_error(&state, "Child.Name", "'Child Name' must not be empty.");
}

#[tokio::test]
async fn test_explicit_child_validator_is_resolved() {
    let validators = ValidatorContainer::new();
    let child = validators.register(injected_child_validator());
    validators.register(RuleSet::<ParentModel>::new().child(
        "Child",
        |p: &ParentModel| p.child.clone().map(|c| c as ModelRef),
        child,
    ));

    let graph = bind_parent_model(Arc::new(ParentModel {
        child: Some(Arc::new(ChildModel { name: None })),
    }));
    let state = TestHost::new(validator(PolicyConfig::new(), validators))
        .validate(&graph)
        .await
        .unwrap();

    // the child node itself is out of scope, so the error is not duplicated
    assert_error_count(&state, 1);
    assert_eq!(state.error("Child.Name"), Some("NotNullInjected"));
}

#[tokio::test]
async fn test_explicit_child_validator_for_collection() {
    let validators = ValidatorContainer::new();
    validators.register(injected_child_validator());
    let child = validators
        .validator_for(&ModelType::of::<ChildModel>())
        .unwrap();
    validators.register(RuleSet::<ParentModel6>::new().each(
        "Children",
        |p: &ParentModel6| p.children.iter().map(|c| c.clone() as ModelRef).collect(),
        child,
    ));

    let parent = Arc::new(ParentModel6 {
        children: vec![Arc::new(ChildModel { name: None })],
    });
    let mut graph = ModelGraph::new();
    let root = graph.add_root(Some(parent.clone())).unwrap();
    let children = graph
        .add_collection_property::<Vec<Arc<ChildModel>>, ChildModel>(
            root,
            "Children",
            Some(Arc::new(parent.children.clone())),
        )
        .unwrap();
    graph
        .add_element(children, 0, parent.children.first().cloned())
        .unwrap();

    let state = TestHost::new(validator(PolicyConfig::new(), validators))
        .validate(&graph)
        .await
        .unwrap();

    assert_error_count(&state, 1);
    assert_eq!(state.error("Children[0].Name"), Some("NotNullInjected"));
}

#[tokio::test]
async fn test_implicit_child_validation_from_config() {
    let validators = ValidatorContainer::new();
    validators.register(
        RuleSet::<AutoFilterParentModel>::new().rule(
            "Id",
            |p: &AutoFilterParentModel| p.id.is_some(),
            "'Id' must not be empty.",
        ),
    );
    validators.register(model_rules());

    let policy = AutoValidationConfig::from_json(r#"{ "implicitly_validate_child_properties": true }"#)
        .unwrap()
        .into_policy();

    let graph = bind_parent(Arc::new(AutoFilterParentModel {
        id: None,
        child_model: Some(AutoFilterModel::bad_email()),
    }));
    let state = TestHost::new(validator(policy, validators))
        .with_prefix("model")
        .validate(&graph)
        .await
        .unwrap();

    assert_error_count(&state, 2);
    assert_error(&state, "model.Id", "'Id' must not be empty.");
    assert_error(&state, "model.ChildModel.Email", "'Email' is not a valid email address.");
}

#[tokio::test]
async fn test_root_collection_elements_carve_out() {
    let validators = ValidatorContainer::new();
    validators.register(model_rules());

    let graph = bind_list(vec![AutoFilterModel::incomplete(), AutoFilterModel::bad_email()]);

    // without the carve-out nothing validates the elements
    let state = TestHost::new(validator(PolicyConfig::new(), validators.clone()))
        .validate(&graph)
        .await
        .unwrap();
    assert_valid(&state);

    let policy = PolicyConfig::new().implicit_root_collection_elements(true);
    let state = TestHost::new(validator(policy, validators))
        .with_prefix("test")
        .validate(&graph)
        .await
        .unwrap();

    assert_error_count(&state, 5);
    assert_error(&state, "test[0].Surname", "'Surname' must be at least 5 characters.");
    assert_error(&state, "test[1].Email", "'Email' is not a valid email address.");
}

#[tokio::test]
async fn test_customized_instance_is_skipped_by_host() {
    let customizations = InstanceCustomizations::new();
    let model = AutoFilterModel::incomplete();
    let graph = bind_model(model.clone());
    customizations.customize(&(model as ModelRef), Customization::skip());

    let validator = ModelValidator::builder()
        .registry(auto_filter_validators())
        .customizations(customizations)
        .build();
    let state = TestHost::new(validator).validate(&graph).await.unwrap();

    assert_valid(&state);
}
