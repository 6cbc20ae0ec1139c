//! Model graph arena
//!
//! A host traversal registers every node it visits in a [`ModelGraph`].
//! Nodes are addressed by [`NodeId`], which gives each position in the
//! graph a stable identity even when several nodes share a model type.

use crate::logging::trace;
use crate::{Error, ModelRef, ModelType, NodeId, NodeKind, NodeMetadata, PathSegment, Result};
use std::any::Any;
use std::sync::Arc;

struct GraphNode {
    metadata: NodeMetadata,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Arena of node metadata for one validation traversal.
///
/// # Examples
///
/// ```
/// use modelgate_core::{ModelGraph, NodeKind};
/// use std::sync::Arc;
///
/// struct Order { lines: Vec<Arc<Line>> }
/// struct Line;
///
/// let order = Arc::new(Order { lines: vec![Arc::new(Line), Arc::new(Line)] });
///
/// let mut graph = ModelGraph::new();
/// let root = graph.add_root(Some(order.clone())).unwrap();
/// for (index, line) in order.lines.iter().enumerate() {
///     graph.add_element(root, index, Some(line.clone())).unwrap();
/// }
///
/// assert_eq!(graph.len(), 3);
/// assert_eq!(graph.node(root).unwrap().kind(), NodeKind::Root);
/// ```
#[derive(Default)]
pub struct ModelGraph {
    nodes: Vec<GraphNode>,
    root: Option<NodeId>,
}

impl ModelGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the traversal root.
    ///
    /// The root is usually [`NodeKind::Root`], but hosts that bind the model
    /// as a property or record parameter register it with that kind.
    pub fn insert_root(&mut self, metadata: NodeMetadata) -> Result<NodeId> {
        if let Some(existing) = self.root {
            return Err(Error::DuplicateRoot(existing));
        }

        let id = self.push(metadata, None);
        self.root = Some(id);
        Ok(id)
    }

    /// Register a child of `parent`
    pub fn insert_child(&mut self, parent: NodeId, metadata: NodeMetadata) -> Result<NodeId> {
        if parent.index() >= self.nodes.len() {
            return Err(Error::NodeNotFound(parent));
        }

        let id = self.push(metadata, Some(parent));
        self.nodes[parent.index()].children.push(id);
        Ok(id)
    }

    /// Register a root model of type `T`
    pub fn add_root<T: Any + Send + Sync>(&mut self, value: Option<Arc<T>>) -> Result<NodeId> {
        let metadata = NodeMetadata::of::<T>(self.next_id(), NodeKind::Root)
            .with_value(value.map(|v| v as ModelRef));
        self.insert_root(metadata)
    }

    /// Register a root collection of type `C` whose elements are `E`
    pub fn add_root_collection<C, E>(&mut self, value: Option<Arc<C>>) -> Result<NodeId>
    where
        C: Any + Send + Sync,
        E: Any,
    {
        let metadata = NodeMetadata::of::<C>(self.next_id(), NodeKind::Root)
            .with_element_type(ModelType::of::<E>())
            .with_value(value.map(|v| v as ModelRef));
        self.insert_root(metadata)
    }

    /// Register property `name` of `parent`
    pub fn add_property<T: Any + Send + Sync>(
        &mut self,
        parent: NodeId,
        name: &str,
        value: Option<Arc<T>>,
    ) -> Result<NodeId> {
        self.add_typed_child::<T>(parent, NodeKind::Property, PathSegment::property(name), value)
    }

    /// Register collection property `name` of `parent` whose elements are `E`
    pub fn add_collection_property<C, E>(
        &mut self,
        parent: NodeId,
        name: &str,
        value: Option<Arc<C>>,
    ) -> Result<NodeId>
    where
        C: Any + Send + Sync,
        E: Any,
    {
        let container = self.node(parent)?.value().cloned();
        let metadata = NodeMetadata::of::<C>(self.next_id(), NodeKind::Property)
            .with_element_type(ModelType::of::<E>())
            .with_value(value.map(|v| v as ModelRef))
            .with_container(container)
            .with_name(PathSegment::property(name));
        self.insert_child(parent, metadata)
    }

    /// Register element `index` of collection `parent`
    pub fn add_element<T: Any + Send + Sync>(
        &mut self,
        parent: NodeId,
        index: usize,
        value: Option<Arc<T>>,
    ) -> Result<NodeId> {
        self.add_typed_child::<T>(
            parent,
            NodeKind::CollectionElement,
            PathSegment::Index(index),
            value,
        )
    }

    /// Register record parameter `name` of `parent`
    pub fn add_parameter<T: Any + Send + Sync>(
        &mut self,
        parent: NodeId,
        name: &str,
        value: Option<Arc<T>>,
    ) -> Result<NodeId> {
        self.add_typed_child::<T>(parent, NodeKind::Parameter, PathSegment::property(name), value)
    }

    fn add_typed_child<T: Any + Send + Sync>(
        &mut self,
        parent: NodeId,
        kind: NodeKind,
        name: PathSegment,
        value: Option<Arc<T>>,
    ) -> Result<NodeId> {
        let container = self.node(parent)?.value().cloned();
        let metadata = NodeMetadata::of::<T>(self.next_id(), kind)
            .with_value(value.map(|v| v as ModelRef))
            .with_container(container)
            .with_name(name);
        self.insert_child(parent, metadata)
    }

    fn next_id(&self) -> NodeId {
        NodeId::new(self.nodes.len())
    }

    fn push(&mut self, mut metadata: NodeMetadata, parent: Option<NodeId>) -> NodeId {
        let id = self.next_id();
        metadata.set_id(id);

        trace!(
            node = %id,
            kind = ?metadata.kind(),
            model_type = metadata.model_type().name(),
            "Registered graph node"
        );

        self.nodes.push(GraphNode {
            metadata,
            parent,
            children: Vec::new(),
        });
        id
    }

    pub fn get(&self, id: NodeId) -> Option<&NodeMetadata> {
        self.nodes.get(id.index()).map(|n| &n.metadata)
    }

    pub fn node(&self, id: NodeId) -> Result<&NodeMetadata> {
        self.get(id).ok_or(Error::NodeNotFound(id))
    }

    pub fn root_id(&self) -> Option<NodeId> {
        self.root
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.index()).and_then(|n| n.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id.index())
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Build the root context for this traversal
    pub fn root_context(&self) -> Result<RootContext> {
        let root = self.root.ok_or(Error::MissingRoot)?;
        let metadata = self.node(root)?.clone();
        let container = metadata.container().cloned();
        Ok(RootContext::new(metadata).with_container(container))
    }

    /// Path segments from the root down to `id` (the root itself contributes none)
    pub fn path(&self, id: NodeId) -> Result<Vec<PathSegment>> {
        let mut segments = Vec::new();
        let mut current = Some(id);

        while let Some(node_id) = current {
            let node = self.nodes.get(node_id.index()).ok_or(Error::NodeNotFound(node_id))?;
            if node.parent.is_some()
                && let Some(name) = node.metadata.name()
            {
                segments.push(name.clone());
            }
            current = node.parent;
        }

        segments.reverse();
        Ok(segments)
    }

    /// Node ids in pre-order, starting at the root
    pub fn preorder(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<NodeId> = self.root.into_iter().collect();

        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }

        order
    }
}

/// Root of the current validation traversal.
///
/// Roots are identified by [`NodeId`], which is a position within one
/// [`ModelGraph`]. A root context only applies to nodes of the graph it was
/// taken from; a node at the same position in another graph compares as the
/// root.
#[derive(Debug, Clone)]
pub struct RootContext {
    root_metadata: NodeMetadata,
    container: Option<ModelRef>,
}

impl RootContext {
    pub fn new(root_metadata: NodeMetadata) -> Self {
        Self {
            root_metadata,
            container: None,
        }
    }

    /// Instance the root was bound on, if any
    pub fn with_container(mut self, container: Option<ModelRef>) -> Self {
        self.container = container;
        self
    }

    pub fn root_metadata(&self) -> &NodeMetadata {
        &self.root_metadata
    }

    pub fn container(&self) -> Option<&ModelRef> {
        self.container.as_ref()
    }

    /// Whether `node` is the traversal root.
    ///
    /// `node` must come from the graph this context was taken from.
    pub fn is_root(&self, node: &NodeMetadata) -> bool {
        self.root_metadata.same_node(node)
    }

    /// Whether `model_type` is the element type of an enumerable root
    pub fn is_root_element_type(&self, model_type: &ModelType) -> bool {
        self.root_metadata.is_enumerable() && self.root_metadata.element_type() == Some(model_type)
    }
}
