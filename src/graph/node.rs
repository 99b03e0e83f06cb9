//! Node kinds of the project object graph
//!
//! A [`Node`] is exactly one of five shapes. Payload accessors return
//! [`ModelError::KindMismatch`] when asked for another shape's payload; they
//! never fall back to an empty default.

use std::fmt;

use indexmap::IndexMap;
use pbxgen_core::ISA_ATTRIBUTE;
use pbxgen_core::isa::{self, PbxType};
use thiserror::Error;

use super::ObjectRef;
use crate::identity::{IdentityService, normalize_id};

/// Insertion-ordered attribute mapping. Order is output order.
pub type Attributes = IndexMap<String, Node>;

/// Discriminant of a [`Node`], used in diagnostics and layout decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Object,
    ObjectList,
    String,
    AttributeGroup,
    ObjectReference,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Object => write!(f, "object"),
            NodeKind::ObjectList => write!(f, "object list"),
            NodeKind::String => write!(f, "string"),
            NodeKind::AttributeGroup => write!(f, "attribute group"),
            NodeKind::ObjectReference => write!(f, "object reference"),
        }
    }
}

/// Invariant violations in the value model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("expected {expected} payload, found {found}")]
    KindMismatch { expected: NodeKind, found: NodeKind },

    #[error("attribute `{0}` is reserved for the entity type")]
    ReservedAttribute(String),

    #[error("no object registered for handle {0}")]
    UnknownObject(ObjectRef),

    #[error("`None` is a sentinel and cannot tag an object")]
    SentinelEntityType,
}

/// A project entity: identifier, entity type, comment and ordered attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct PbxObject {
    id: String,
    isa: PbxType,
    comment: String,
    /// Always starts with the reserved `isa` entry.
    attributes: Attributes,
    link: Option<ObjectRef>,
}

impl PbxObject {
    /// Create an object and draw its identifier from `identity`.
    ///
    /// With no `hashing_key` (or an empty one) the identifier is sequence-derived; otherwise it is
    /// derived from the key's digest and stays the same for the same key.
    ///
    /// Fails with [`ModelError::SentinelEntityType`] for [`PbxType::None`], before any identifier is drawn.
    pub fn new(isa: PbxType, identity: &IdentityService, hashing_key: Option<&str>) -> Result<Self, ModelError> {
        check_entity_type(isa)?;
        Self::with_id(isa, identity.issue(hashing_key))
    }

    /// Create an object with a caller-chosen identifier (normalized like generated ones).
    pub fn with_id(isa: PbxType, id: impl AsRef<str>) -> Result<Self, ModelError> {
        check_entity_type(isa)?;
        let mut attributes = Attributes::new();
        attributes.insert(ISA_ATTRIBUTE.to_string(), Node::String(isa::as_str(isa).to_string()));
        Ok(Self {
            id: normalize_id(id.as_ref()),
            isa,
            comment: String::new(),
            attributes,
            link: None,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Override the generated identifier.
    ///
    /// Some IDE user files refer to fixed identifiers; those objects must keep them.
    pub fn set_id(&mut self, id: impl AsRef<str>) {
        self.id = normalize_id(id.as_ref());
    }

    pub fn isa(&self) -> PbxType {
        self.isa
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn has_comment(&self) -> bool {
        !self.comment.is_empty()
    }

    pub fn set_comment(&mut self, comment: impl Into<String>) {
        self.comment = comment.into();
    }

    pub fn link(&self) -> Option<ObjectRef> {
        self.link
    }

    /// Set the object this entity stands in for.
    pub fn set_link(&mut self, link: Option<ObjectRef>) {
        self.link = link;
    }

    /// Attributes in insertion order, without the reserved `isa` entry.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.attributes
            .iter()
            .filter(|(name, _)| name.as_str() != ISA_ATTRIBUTE)
            .map(|(name, node)| (name.as_str(), node))
    }

    pub fn attribute_count(&self) -> usize {
        self.attributes.len() - 1
    }

    pub fn attribute(&self, name: &str) -> Option<&Node> {
        if name == ISA_ATTRIBUTE {
            return None;
        }
        self.attributes.get(name)
    }

    pub fn attribute_mut(&mut self, name: &str) -> Option<&mut Node> {
        if name == ISA_ATTRIBUTE {
            return None;
        }
        self.attributes.get_mut(name)
    }

    /// Add or replace an attribute. Replacing keeps the original position.
    pub fn add_attribute(&mut self, name: impl Into<String>, value: Node) -> Result<(), ModelError> {
        let name = name.into();
        if name == ISA_ATTRIBUTE {
            return Err(ModelError::ReservedAttribute(name));
        }
        self.attributes.insert(name, value);
        Ok(())
    }

    /// Add an attribute unless `value` is empty.
    pub fn add_attribute_if_not_empty(&mut self, name: impl Into<String>, value: Node) -> Result<(), ModelError> {
        if value.is_empty() {
            return Ok(());
        }
        self.add_attribute(name, value)
    }

    pub fn remove_attribute(&mut self, name: &str) -> Option<Node> {
        if name == ISA_ATTRIBUTE {
            return None;
        }
        self.attributes.shift_remove(name)
    }

    /// Replace this object's attributes and link with `other`'s, keeping identifier, type and comment.
    pub fn copy_attributes_from(&mut self, other: &PbxObject) {
        self.attributes = other.attributes.clone();
        self.attributes
            .insert(ISA_ATTRIBUTE.to_string(), Node::String(isa::as_str(self.isa).to_string()));
        self.link = other.link;
    }
}

fn check_entity_type(isa: PbxType) -> Result<(), ModelError> {
    match isa {
        PbxType::None => Err(ModelError::SentinelEntityType),
        _ => Ok(()),
    }
}

/// One node of the object graph.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Object(PbxObject),
    List(Vec<Node>),
    String(String),
    Group(Attributes),
    /// Non-owning link into the graph's object registry. `None` until the builder sets it.
    Reference(Option<ObjectRef>),
}

impl Node {
    pub fn string(value: impl Into<String>) -> Self {
        Node::String(value.into())
    }

    pub fn list(items: impl IntoIterator<Item = Node>) -> Self {
        Node::List(items.into_iter().collect())
    }

    pub fn group() -> Self {
        Node::Group(Attributes::new())
    }

    pub fn reference(target: ObjectRef) -> Self {
        Node::Reference(Some(target))
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Object(_) => NodeKind::Object,
            Node::List(_) => NodeKind::ObjectList,
            Node::String(_) => NodeKind::String,
            Node::Group(_) => NodeKind::AttributeGroup,
            Node::Reference(_) => NodeKind::ObjectReference,
        }
    }

    /// Emptiness as the builder sees it.
    ///
    /// Lists and groups are empty without entries, strings without text, and objects and references
    /// without a backing link.
    pub fn is_empty(&self) -> bool {
        match self {
            Node::List(items) => items.is_empty(),
            Node::String(s) => s.is_empty(),
            Node::Group(attrs) => attrs.is_empty(),
            Node::Reference(target) => target.is_none(),
            Node::Object(object) => object.link.is_none(),
        }
    }

    fn mismatch(&self, expected: NodeKind) -> ModelError {
        ModelError::KindMismatch {
            expected,
            found: self.kind(),
        }
    }

    pub fn as_object(&self) -> Result<&PbxObject, ModelError> {
        match self {
            Node::Object(object) => Ok(object),
            other => Err(other.mismatch(NodeKind::Object)),
        }
    }

    pub fn as_object_mut(&mut self) -> Result<&mut PbxObject, ModelError> {
        match self {
            Node::Object(object) => Ok(object),
            other => Err(other.mismatch(NodeKind::Object)),
        }
    }

    pub fn as_list(&self) -> Result<&[Node], ModelError> {
        match self {
            Node::List(items) => Ok(items),
            other => Err(other.mismatch(NodeKind::ObjectList)),
        }
    }

    pub fn as_list_mut(&mut self) -> Result<&mut Vec<Node>, ModelError> {
        match self {
            Node::List(items) => Ok(items),
            other => Err(other.mismatch(NodeKind::ObjectList)),
        }
    }

    /// Append to a list node.
    pub fn push(&mut self, item: Node) -> Result<(), ModelError> {
        self.as_list_mut()?.push(item);
        Ok(())
    }

    pub fn as_str(&self) -> Result<&str, ModelError> {
        match self {
            Node::String(s) => Ok(s),
            other => Err(other.mismatch(NodeKind::String)),
        }
    }

    pub fn set_string(&mut self, value: impl Into<String>) -> Result<(), ModelError> {
        match self {
            Node::String(s) => {
                *s = value.into();
                Ok(())
            }
            other => Err(other.mismatch(NodeKind::String)),
        }
    }

    pub fn as_group(&self) -> Result<&Attributes, ModelError> {
        match self {
            Node::Group(attrs) => Ok(attrs),
            other => Err(other.mismatch(NodeKind::AttributeGroup)),
        }
    }

    pub fn as_group_mut(&mut self) -> Result<&mut Attributes, ModelError> {
        match self {
            Node::Group(attrs) => Ok(attrs),
            other => Err(other.mismatch(NodeKind::AttributeGroup)),
        }
    }

    /// Target of a reference node; `Ok(None)` while the link is unset.
    pub fn target(&self) -> Result<Option<ObjectRef>, ModelError> {
        match self {
            Node::Reference(target) => Ok(*target),
            other => Err(other.mismatch(NodeKind::ObjectReference)),
        }
    }

    /// Backing link of an object or reference node.
    pub fn link(&self) -> Result<Option<ObjectRef>, ModelError> {
        match self {
            Node::Reference(target) => Ok(*target),
            Node::Object(object) => Ok(object.link),
            other => Err(other.mismatch(NodeKind::ObjectReference)),
        }
    }

    pub fn set_link(&mut self, link: Option<ObjectRef>) -> Result<(), ModelError> {
        match self {
            Node::Reference(target) => *target = link,
            Node::Object(object) => object.link = link,
            other => return Err(other.mismatch(NodeKind::ObjectReference)),
        }
        Ok(())
    }

    /// Add an attribute to an object or group node.
    pub fn add_attribute(&mut self, name: impl Into<String>, value: Node) -> Result<(), ModelError> {
        match self {
            Node::Object(object) => object.add_attribute(name, value),
            Node::Group(attrs) => {
                attrs.insert(name.into(), value);
                Ok(())
            }
            other => Err(other.mismatch(NodeKind::AttributeGroup)),
        }
    }

    pub fn add_attribute_if_not_empty(&mut self, name: impl Into<String>, value: Node) -> Result<(), ModelError> {
        if value.is_empty() {
            // Still a kind error on a scalar receiver.
            return match self {
                Node::Object(_) | Node::Group(_) => Ok(()),
                other => Err(other.mismatch(NodeKind::AttributeGroup)),
            };
        }
        self.add_attribute(name, value)
    }

    pub fn attribute(&self, name: &str) -> Result<Option<&Node>, ModelError> {
        match self {
            Node::Object(object) => Ok(object.attribute(name)),
            Node::Group(attrs) => Ok(attrs.get(name)),
            other => Err(other.mismatch(NodeKind::AttributeGroup)),
        }
    }

    /// Copy the kind-specific payload of `other` into `self`.
    ///
    /// Both nodes must be of the same kind. Objects keep their own identifier, type and comment.
    pub fn copy_attributes_from(&mut self, other: &Node) -> Result<(), ModelError> {
        match (self, other) {
            (Node::Object(dst), Node::Object(src)) => dst.copy_attributes_from(src),
            (Node::List(dst), Node::List(src)) => dst.clone_from(src),
            (Node::String(dst), Node::String(src)) => dst.clone_from(src),
            (Node::Group(dst), Node::Group(src)) => dst.clone_from(src),
            (Node::Reference(dst), Node::Reference(src)) => *dst = *src,
            (dst, src) => {
                return Err(ModelError::KindMismatch {
                    expected: dst.kind(),
                    found: src.kind(),
                });
            }
        }
        Ok(())
    }
}

impl From<PbxObject> for Node {
    fn from(object: PbxObject) -> Self {
        Node::Object(object)
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::String(value.to_string())
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Node::String(value)
    }
}

impl From<ObjectRef> for Node {
    fn from(target: ObjectRef) -> Self {
        Node::Reference(Some(target))
    }
}
