//! Implicit-validation scope resolution
//!
//! Decides whether a node of the object graph should be validated. With
//! implicit validation disabled only the traversal root is validated; child
//! properties and collection elements are left to validators that opt into
//! them explicitly, except for elements of a root collection when that
//! carve-out is enabled.
//!
//! The decision order matters:
//!
//! 1. the type filter (absolute, evaluated first)
//! 2. a missing model
//! 3. implicit validation
//! 4. root-only rules, by node kind

use crate::logging::trace;
use crate::{NodeKind, NodeMetadata, PolicyConfig, RootContext};
use std::sync::Arc;

/// Why a node was skipped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The type filter rejected the node's model type
    FilteredOut,
    /// Nothing is bound to the node
    NullModel,
    /// Implicit validation is off and the node is not the root
    NotRoot,
}

/// Outcome of a scope decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeDecision {
    Proceed,
    Skip(SkipReason),
}

impl ScopeDecision {
    pub fn is_proceed(&self) -> bool {
        matches!(self, ScopeDecision::Proceed)
    }
}

/// Decide whether `node` should be validated under `policy`.
pub fn decide(node: &NodeMetadata, root: &RootContext, policy: &PolicyConfig) -> ScopeDecision {
    if !policy.matches_filter(node.model_type()) {
        return ScopeDecision::Skip(SkipReason::FilteredOut);
    }

    if node.value().is_none() {
        return ScopeDecision::Skip(SkipReason::NullModel);
    }

    if policy.implicit_validation_enabled() {
        return ScopeDecision::Proceed;
    }

    let in_scope = match node.kind() {
        NodeKind::Root => true,
        // A property is only in scope when the root itself was bound as a property.
        NodeKind::Property | NodeKind::Parameter => root.is_root(node),
        // Hosts surface any type-level child this way, not only collection elements.
        NodeKind::CollectionElement => {
            (policy.implicit_root_collection_element_validation_enabled()
                && root.is_root_element_type(node.model_type()))
                || root.is_root(node)
        }
    };

    if in_scope {
        ScopeDecision::Proceed
    } else {
        ScopeDecision::Skip(SkipReason::NotRoot)
    }
}

/// Decide whether `node` should be validated under `policy`.
pub fn should_validate(node: &NodeMetadata, root: &RootContext, policy: &PolicyConfig) -> bool {
    decide(node, root, policy).is_proceed()
}

/// Applies one [`PolicyConfig`] to every node of every traversal.
///
/// Holds no mutable state; clones share the policy.
#[derive(Debug, Clone, Default)]
pub struct ValidationScopeResolver {
    policy: Arc<PolicyConfig>,
}

impl ValidationScopeResolver {
    pub fn new(policy: PolicyConfig) -> Self {
        Self {
            policy: Arc::new(policy),
        }
    }

    pub fn from_shared(policy: Arc<PolicyConfig>) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &PolicyConfig {
        &self.policy
    }

    pub fn decide(&self, node: &NodeMetadata, root: &RootContext) -> ScopeDecision {
        let decision = decide(node, root, &self.policy);

        trace!(
            node = %node.id(),
            kind = ?node.kind(),
            model_type = node.model_type().name(),
            decision = ?decision,
            "Resolved validation scope"
        );

        decision
    }

    pub fn should_validate(&self, node: &NodeMetadata, root: &RootContext) -> bool {
        self.decide(node, root).is_proceed()
    }
}
