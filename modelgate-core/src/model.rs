//! Model metadata
//!
//! Describes one node of the object graph a host framework is validating:
//! its declared type, how the host reached it, and the bound instance.

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Shared, type-erased model instance.
pub type ModelRef = Arc<dyn Any + Send + Sync>;

/// Wrap a value as a [`ModelRef`].
pub fn model_ref<T: Any + Send + Sync>(value: T) -> ModelRef {
    Arc::new(value)
}

/// Pointer identity of a model instance, used to key per-instance lookups.
pub fn instance_key(model: &ModelRef) -> usize {
    Arc::as_ptr(model) as *const () as usize
}

/// Type identifier for a model.
///
/// Equality and hashing only consider the underlying [`TypeId`]; the name
/// is carried for diagnostics and name-based filters.
#[derive(Clone, Copy)]
pub struct ModelType {
    id: TypeId,
    name: &'static str,
}

impl ModelType {
    /// Identifier for `T`
    pub fn of<T: Any + ?Sized>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Full type name, e.g. `alloc::vec::Vec<app::Person>`
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Type name without its module path, e.g. `Vec<Person>`
    pub fn short_name(&self) -> String {
        let mut short = String::with_capacity(self.name.len());
        let mut segment = String::new();

        for ch in self.name.chars() {
            match ch {
                ':' => segment.clear(),
                '<' | '>' | ',' | ' ' | '[' | ']' | ';' | '&' | '(' | ')' => {
                    short.push_str(&segment);
                    segment.clear();
                    short.push(ch);
                }
                _ => segment.push(ch),
            }
        }
        short.push_str(&segment);
        short
    }

    /// Whether this is the type `T`
    pub fn is<T: Any + ?Sized>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for ModelType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ModelType {}

impl Hash for ModelType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ModelType({})", self.name)
    }
}

impl fmt::Display for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// How the host traversal reached a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Top-level bound model
    Root,
    /// Property of a containing model
    Property,
    /// Element of a collection, or any other type-level child the host
    /// surfaces without a property binding
    CollectionElement,
    /// Constructor parameter of a record-style model
    Parameter,
}

/// Position of a node within one traversal's [`ModelGraph`](crate::ModelGraph).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One step of a property path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    Property(String),
    Index(usize),
}

impl PathSegment {
    pub fn property(name: impl Into<String>) -> Self {
        Self::Property(name.into())
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Property(name) => f.write_str(name),
            PathSegment::Index(index) => write!(f, "[{}]", index),
        }
    }
}

/// Metadata for one node in the object graph.
///
/// `element_type` is only present for enumerable models, so
/// [`is_enumerable`](Self::is_enumerable) and the element type can never
/// disagree.
#[derive(Clone)]
pub struct NodeMetadata {
    id: NodeId,
    kind: NodeKind,
    model_type: ModelType,
    element_type: Option<ModelType>,
    value: Option<ModelRef>,
    container: Option<ModelRef>,
    name: Option<PathSegment>,
}

impl NodeMetadata {
    /// Create metadata for a node of type `T`
    pub fn of<T: Any>(id: NodeId, kind: NodeKind) -> Self {
        Self::new(id, kind, ModelType::of::<T>())
    }

    pub fn new(id: NodeId, kind: NodeKind, model_type: ModelType) -> Self {
        Self {
            id,
            kind,
            model_type,
            element_type: None,
            value: None,
            container: None,
            name: None,
        }
    }

    /// Mark the model as an enumerable of `element_type`
    pub fn with_element_type(mut self, element_type: ModelType) -> Self {
        self.element_type = Some(element_type);
        self
    }

    /// Attach the bound instance
    pub fn with_value(mut self, value: Option<ModelRef>) -> Self {
        self.value = value;
        self
    }

    /// Attach the instance that owns this node
    pub fn with_container(mut self, container: Option<ModelRef>) -> Self {
        self.container = container;
        self
    }

    /// Set the path segment the host used to reach this node
    pub fn with_name(mut self, name: PathSegment) -> Self {
        self.name = Some(name);
        self
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn model_type(&self) -> &ModelType {
        &self.model_type
    }

    pub fn element_type(&self) -> Option<&ModelType> {
        self.element_type.as_ref()
    }

    pub fn is_enumerable(&self) -> bool {
        self.element_type.is_some()
    }

    pub fn value(&self) -> Option<&ModelRef> {
        self.value.as_ref()
    }

    pub fn container(&self) -> Option<&ModelRef> {
        self.container.as_ref()
    }

    pub fn name(&self) -> Option<&PathSegment> {
        self.name.as_ref()
    }

    /// Same position in the traversal (not structural equality)
    pub fn same_node(&self, other: &NodeMetadata) -> bool {
        self.id == other.id
    }

    pub(crate) fn set_id(&mut self, id: NodeId) {
        self.id = id;
    }
}

impl fmt::Debug for NodeMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeMetadata")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("model_type", &self.model_type)
            .field("element_type", &self.element_type)
            .field("has_value", &self.value.is_some())
            .field("has_container", &self.container.is_some())
            .field("name", &self.name)
            .finish()
    }
}
