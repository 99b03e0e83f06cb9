//! Project object graph
//!
//! The graph owns every top-level node of one project file. Objects refer to
//! each other through [`ObjectRef`] handles (indices into the graph), so the
//! graph is the single owner and references never form ownership cycles.
//!
//! ## Modules
//!
//! - `node` - node kinds, objects and their accessors

mod node;

pub use node::{Attributes, ModelError, Node, NodeKind, PbxObject};

use std::fmt;
use std::sync::Arc;

use pbxgen_core::isa::PbxType;

use crate::identity::IdentityService;

/// Handle to a top-level node of an [`ObjectGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectRef(usize);

impl ObjectRef {
    pub fn from_index(index: usize) -> Self {
        ObjectRef(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Owner of all top-level nodes of one project file, in output order.
#[derive(Debug)]
pub struct ObjectGraph {
    identity: Arc<IdentityService>,
    nodes: Vec<Node>,
}

impl ObjectGraph {
    /// Create an empty graph that draws identifiers from `identity`.
    pub fn new(identity: Arc<IdentityService>) -> Self {
        Self {
            identity,
            nodes: Vec::new(),
        }
    }

    pub fn identity(&self) -> &Arc<IdentityService> {
        &self.identity
    }

    /// Create an object, assign its identifier and register it at the end of the graph.
    ///
    /// The `None` sentinel is rejected without drawing an identifier or touching the graph.
    pub fn create_object(&mut self, isa: PbxType, hashing_key: Option<&str>) -> Result<ObjectRef, ModelError> {
        let object = PbxObject::new(isa, &self.identity, hashing_key)?;
        Ok(self.push(Node::Object(object)))
    }

    /// Register an already built node. Only object nodes are written by the serializer.
    pub fn push(&mut self, node: Node) -> ObjectRef {
        self.nodes.push(node);
        ObjectRef(self.nodes.len() - 1)
    }

    pub fn node(&self, handle: ObjectRef) -> Option<&Node> {
        self.nodes.get(handle.0)
    }

    pub fn object(&self, handle: ObjectRef) -> Result<&PbxObject, ModelError> {
        self.nodes
            .get(handle.0)
            .ok_or(ModelError::UnknownObject(handle))?
            .as_object()
    }

    pub fn object_mut(&mut self, handle: ObjectRef) -> Result<&mut PbxObject, ModelError> {
        self.nodes
            .get_mut(handle.0)
            .ok_or(ModelError::UnknownObject(handle))?
            .as_object_mut()
    }

    /// All top-level nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = (ObjectRef, &Node)> {
        self.nodes.iter().enumerate().map(|(i, node)| (ObjectRef(i), node))
    }

    /// Top-level object nodes in insertion order.
    pub fn objects(&self) -> impl Iterator<Item = (ObjectRef, &PbxObject)> {
        self.nodes().filter_map(|(handle, node)| node.as_object().ok().map(|object| (handle, object)))
    }

    pub fn object_count(&self) -> usize {
        self.objects().count()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
