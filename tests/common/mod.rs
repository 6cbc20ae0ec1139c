//! Models and validators shared by the integration tests

#![allow(dead_code)]

use modelgate::prelude::*;
use std::sync::Arc;

pub struct AutoFilterModel {
    pub email: String,
    pub surname: String,
    pub forename: String,
    pub date_of_birth: Option<String>,
    pub address1: Option<String>,
}

impl AutoFilterModel {
    /// Fails email, surname, date of birth and address
    pub fn incomplete() -> Arc<Self> {
        Arc::new(Self {
            email: "foo".into(),
            surname: "foo".into(),
            forename: "foo".into(),
            date_of_birth: None,
            address1: None,
        })
    }

    /// Fails email only
    pub fn bad_email() -> Arc<Self> {
        Arc::new(Self {
            email: "foo".into(),
            surname: "foobar".into(),
            forename: "foo".into(),
            date_of_birth: Some("2024-01-01".into()),
            address1: Some("foo".into()),
        })
    }
}

pub struct AutoFilterParentModel {
    pub id: Option<u32>,
    pub child_model: Option<Arc<AutoFilterModel>>,
}

pub struct AutoFilterParentWithCollectionModel {
    pub id: Option<u32>,
    pub child_models: Vec<Arc<AutoFilterModel>>,
}

pub type AutoFilterList = Vec<Arc<AutoFilterModel>>;

pub fn model_rules() -> RuleSet<AutoFilterModel> {
    RuleSet::<AutoFilterModel>::new()
        .rule(
            "Email",
            |m: &AutoFilterModel| m.email.contains('@'),
            "'Email' is not a valid email address.",
        )
        .rule(
            "Surname",
            |m: &AutoFilterModel| m.surname.len() > 4,
            "'Surname' must be at least 5 characters.",
        )
        .rule(
            "DateOfBirth",
            |m: &AutoFilterModel| m.date_of_birth.is_some(),
            "'Date Of Birth' must not be empty.",
        )
        .rule(
            "Address1",
            |m: &AutoFilterModel| m.address1.is_some(),
            "'Address1' must not be empty.",
        )
}

/// Every validator the filter tests register
pub fn auto_filter_validators() -> ValidatorContainer {
    let container = ValidatorContainer::new();
    let model = container.register(model_rules());

    container.register(
        RuleSet::<AutoFilterParentModel>::new()
            .rule("Id", |p: &AutoFilterParentModel| p.id.is_some(), "'Id' must not be empty.")
            .child(
                "ChildModel",
                |p: &AutoFilterParentModel| p.child_model.clone().map(|c| c as ModelRef),
                model.clone(),
            ),
    );

    container.register(
        RuleSet::<AutoFilterParentWithCollectionModel>::new()
            .rule(
                "Id",
                |p: &AutoFilterParentWithCollectionModel| p.id.is_some(),
                "'Id' must not be empty.",
            )
            .each(
                "ChildModels",
                |p: &AutoFilterParentWithCollectionModel| {
                    p.child_models.iter().map(|c| c.clone() as ModelRef).collect()
                },
                model.clone(),
            ),
    );

    container.register(RuleSet::<AutoFilterList>::new().each(
        "",
        |items: &AutoFilterList| items.iter().map(|c| c.clone() as ModelRef).collect(),
        model,
    ));

    container
}

/// Bind a single model the way a host does: root first, no children
pub fn bind_model(model: Arc<AutoFilterModel>) -> ModelGraph {
    let mut graph = ModelGraph::new();
    graph.add_root(Some(model)).unwrap();
    graph
}

pub fn bind_parent(parent: Arc<AutoFilterParentModel>) -> ModelGraph {
    let mut graph = ModelGraph::new();
    let root = graph.add_root(Some(parent.clone())).unwrap();
    graph
        .add_property(root, "ChildModel", parent.child_model.clone())
        .unwrap();
    graph
}

pub fn bind_parent_with_collection(parent: Arc<AutoFilterParentWithCollectionModel>) -> ModelGraph {
    let mut graph = ModelGraph::new();
    let root = graph.add_root(Some(parent.clone())).unwrap();
    let children = graph
        .add_collection_property::<AutoFilterList, AutoFilterModel>(
            root,
            "ChildModels",
            Some(Arc::new(parent.child_models.clone())),
        )
        .unwrap();
    for (index, child) in parent.child_models.iter().enumerate() {
        graph.add_element(children, index, Some(child.clone())).unwrap();
    }
    graph
}

pub fn bind_list(items: AutoFilterList) -> ModelGraph {
    let mut graph = ModelGraph::new();
    let list = Arc::new(items);
    let root = graph
        .add_root_collection::<AutoFilterList, AutoFilterModel>(Some(list.clone()))
        .unwrap();
    for (index, item) in list.iter().enumerate() {
        graph.add_element(root, index, Some(item.clone())).unwrap();
    }
    graph
}

pub fn validator(policy: PolicyConfig, validators: ValidatorContainer) -> ModelValidator {
    ModelValidator::builder()
        .policy(policy)
        .registry(validators)
        .build()
}
