//! JSON graph descriptions
//!
//! A description lists objects in output order. Attribute values map onto
//! node kinds by JSON shape:
//!
//! - string -> `String`
//! - array -> `ObjectList`
//! - `{ "ref": "<handle>" }` -> `ObjectReference` to the object with that handle
//! - any other object -> `AttributeGroup` (key order kept)
//!
//! ```json
//! { "format_version": 46,
//!   "objects": [
//!     { "handle": "main", "isa": "PBXGroup", "key": "rootgroup",
//!       "attributes": { "children": [ { "ref": "file" } ], "sourceTree": "<group>" } },
//!     { "handle": "file", "isa": "PBXFileReference", "comment": "main.c",
//!       "attributes": { "path": "main.c" } } ] }
//! ```
//!
//! All objects are created before any attribute is filled in, so references
//! may point forward.
//!
//! A JSON object whose only key is `"ref"` with a string value is always read
//! as a reference, so an attribute group consisting of a single `ref` setting
//! cannot be described.

use std::collections::HashMap;
use std::sync::Arc;

use indexmap::IndexMap;
use pbxgen_core::isa;
use serde::Deserialize;
use thiserror::Error;

use crate::graph::{ModelError, Node, ObjectGraph, ObjectRef};
use crate::identity::IdentityService;

/// Errors that occur while loading a description
#[derive(Debug, Error)]
pub enum DescriptionError {
    #[error("invalid graph description: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown entity type `{0}`")]
    UnknownEntityType(String),

    #[error("object handle `{0}` is defined more than once")]
    DuplicateHandle(String),

    #[error("attribute `{attribute}` references unknown handle `{handle}`")]
    UnknownHandle { attribute: String, handle: String },

    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Top-level description document.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GraphDescription {
    /// Format version to serialize with, unless overridden by the caller.
    #[serde(default)]
    pub format_version: Option<u32>,
    #[serde(default)]
    pub objects: Vec<ObjectDescription>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ObjectDescription {
    /// Name other objects use to reference this one.
    #[serde(default)]
    pub handle: Option<String>,
    pub isa: String,
    /// Hashing key for a content-derived identifier.
    #[serde(default)]
    pub key: Option<String>,
    /// Fixed identifier; wins over `key`.
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub attributes: IndexMap<String, ValueDescription>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ValueDescription {
    String(String),
    List(Vec<ValueDescription>),
    Reference(ReferenceDescription),
    Group(IndexMap<String, ValueDescription>),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReferenceDescription {
    #[serde(rename = "ref")]
    pub target: String,
}

impl GraphDescription {
    pub fn from_json(text: &str) -> Result<Self, DescriptionError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Build the graph, drawing identifiers from `identity`.
    #[tracing::instrument(skip_all, fields(objects = self.objects.len()))]
    pub fn build(&self, identity: Arc<IdentityService>) -> Result<ObjectGraph, DescriptionError> {
        let mut graph = ObjectGraph::new(identity);
        let mut handles: HashMap<&str, ObjectRef> = HashMap::new();
        let mut created = Vec::with_capacity(self.objects.len());

        for desc in &self.objects {
            let isa = isa::from_str(&desc.isa).ok_or_else(|| DescriptionError::UnknownEntityType(desc.isa.clone()))?;
            let handle = graph.create_object(isa, desc.key.as_deref())?;
            let object = graph.object_mut(handle)?;
            if let Some(id) = &desc.id {
                object.set_id(id);
            }
            if let Some(comment) = &desc.comment {
                object.set_comment(comment.as_str());
            }
            if let Some(name) = &desc.handle {
                if handles.insert(name, handle).is_some() {
                    return Err(DescriptionError::DuplicateHandle(name.clone()));
                }
            }
            created.push(handle);
        }

        for (desc, handle) in self.objects.iter().zip(created) {
            for (name, value) in &desc.attributes {
                let node = to_node(name, value, &handles)?;
                graph.object_mut(handle)?.add_attribute(name.as_str(), node)?;
            }
        }

        tracing::debug!(objects = graph.object_count(), "built graph from description");
        Ok(graph)
    }
}

fn to_node(attribute: &str, value: &ValueDescription, handles: &HashMap<&str, ObjectRef>) -> Result<Node, DescriptionError> {
    Ok(match value {
        ValueDescription::String(s) => Node::string(s.as_str()),
        ValueDescription::List(items) => Node::List(
            items
                .iter()
                .map(|item| to_node(attribute, item, handles))
                .collect::<Result<_, _>>()?,
        ),
        ValueDescription::Reference(reference) => {
            let target = handles
                .get(reference.target.as_str())
                .copied()
                .ok_or_else(|| DescriptionError::UnknownHandle {
                    attribute: attribute.to_string(),
                    handle: reference.target.clone(),
                })?;
            Node::reference(target)
        }
        ValueDescription::Group(entries) => {
            let mut group = Node::group();
            for (name, child) in entries {
                group.add_attribute(name.as_str(), to_node(name, child, handles)?)?;
            }
            group
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pbxgen_core::isa::PbxType;

    fn build(json: &str) -> Result<ObjectGraph, DescriptionError> {
        GraphDescription::from_json(json)?.build(Arc::new(IdentityService::new()))
    }

    #[test]
    fn test_forward_references_resolve() {
        let graph = build(
            r#"{ "objects": [
                { "handle": "main", "isa": "PBXGroup", "attributes": { "children": [ { "ref": "file" } ] } },
                { "handle": "file", "isa": "PBXFileReference", "attributes": { "path": "main.c" } }
            ] }"#,
        )
        .unwrap();

        let (main, group) = graph.objects().next().unwrap();
        assert_eq!(main.index(), 0);
        let children = group.attribute("children").unwrap().as_list().unwrap();
        assert_eq!(children[0].target(), Ok(Some(ObjectRef::from_index(1))));
        assert_eq!(graph.object(ObjectRef::from_index(1)).unwrap().isa(), PbxType::FileReference);
    }

    #[test]
    fn test_group_key_order_is_kept() {
        let graph = build(
            r#"{ "objects": [ { "isa": "XCBuildConfiguration", "attributes": {
                "buildSettings": { "ZETA": "1", "ALPHA": "2", "MID": ["a", "b"] } } } ] }"#,
        )
        .unwrap();
        let (_, config) = graph.objects().next().unwrap();
        let settings = config.attribute("buildSettings").unwrap().as_group().unwrap();
        let keys: Vec<&str> = settings.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["ZETA", "ALPHA", "MID"]);
    }

    #[test]
    fn test_key_and_id_override() {
        let graph = build(
            r#"{ "objects": [
                { "isa": "PBXGroup", "key": "rootgroup" },
                { "isa": "PBXProject", "id": "AAAA-BBBB-CCCC-DDDD-EEEE-FFFF" }
            ] }"#,
        )
        .unwrap();
        let ids: Vec<&str> = graph.objects().map(|(_, o)| o.id()).collect();
        assert!(ids[0].starts_with("02"));
        assert_eq!(ids[1], "AAAABBBBCCCCDDDDEEEEFFFF");
    }

    #[test]
    fn test_unknown_entity_type() {
        let err = build(r#"{ "objects": [ { "isa": "PBXWidget" } ] }"#).unwrap_err();
        assert!(matches!(err, DescriptionError::UnknownEntityType(ref name) if name == "PBXWidget"));
    }

    #[test]
    fn test_sentinel_entity_type_rejected() {
        let err = build(r#"{ "objects": [ { "isa": "None" } ] }"#).unwrap_err();
        assert!(matches!(err, DescriptionError::Model(ModelError::SentinelEntityType)));
    }

    #[test]
    fn test_unknown_handle() {
        let err = build(r#"{ "objects": [ { "isa": "PBXGroup", "attributes": { "x": { "ref": "nope" } } } ] }"#)
            .unwrap_err();
        assert!(matches!(err, DescriptionError::UnknownHandle { ref handle, .. } if handle == "nope"));
    }

    #[test]
    fn test_duplicate_handle() {
        let err = build(
            r#"{ "objects": [ { "handle": "a", "isa": "PBXGroup" }, { "handle": "a", "isa": "PBXGroup" } ] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, DescriptionError::DuplicateHandle(_)));
    }

    #[test]
    fn test_reserved_isa_attribute_rejected() {
        let err = build(r#"{ "objects": [ { "isa": "PBXGroup", "attributes": { "isa": "PBXProject" } } ] }"#)
            .unwrap_err();
        assert!(matches!(err, DescriptionError::Model(ModelError::ReservedAttribute(_))));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(build("{ objects: "), Err(DescriptionError::Json(_))));
    }
}
