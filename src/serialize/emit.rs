//! Graph walk producing the token stream
//!
//! Traversal is depth-first in insertion order. Every reference is resolved
//! here, so a graph that cannot be written fails before any output exists.

use std::borrow::Cow;

use pbxgen_core::REMOTE_GLOBAL_ID_ATTRIBUTE;
use pbxgen_core::isa;

use super::SerializeError;
use super::layout::Layout;
use super::writer::Token;
use crate::graph::{Node, NodeKind, ObjectGraph, ObjectRef, PbxObject};

/// Indentation of the `objects = {` block.
const BLOCK_LEVEL: usize = 1;
/// Indentation of an object's identifier line.
const OBJECT_LEVEL: usize = 2;
/// Indentation of an object's fields.
const FIELD_LEVEL: usize = 3;

pub(crate) struct Emitter<'g> {
    graph: &'g ObjectGraph,
    format_version: u32,
    tokens: Vec<Token<'g>>,
}

impl<'g> Emitter<'g> {
    pub(crate) fn new(graph: &'g ObjectGraph, format_version: u32) -> Self {
        Self {
            graph,
            format_version,
            tokens: Vec::new(),
        }
    }

    pub(crate) fn finish(self) -> Vec<Token<'g>> {
        self.tokens
    }

    fn push(&mut self, token: Token<'g>) {
        self.tokens.push(token);
    }

    fn raw(&mut self, text: &'static str) {
        self.tokens.push(Token::raw(text));
    }

    fn indent(&mut self, level: usize) {
        self.tokens.push(Token::Indent(level));
    }

    /// The whole `objects = { ... };` block. Non-object top-level nodes are skipped.
    pub(crate) fn emit_graph(&mut self) -> Result<(), SerializeError> {
        self.indent(BLOCK_LEVEL);
        self.raw("objects = {\n");
        let graph = self.graph;
        for (_, object) in graph.objects() {
            self.emit_object(object)?;
        }
        self.indent(BLOCK_LEVEL);
        self.raw("};\n");
        Ok(())
    }

    pub(crate) fn emit_object(&mut self, object: &'g PbxObject) -> Result<(), SerializeError> {
        let layout = Layout::select(self.format_version, object.isa());
        let separator = layout.separator;

        // The identifier line is indented before the object's own layout applies.
        self.indent(OBJECT_LEVEL);
        self.push(Token::Raw(Cow::Borrowed(object.id())));
        self.push(Token::Comment(object.comment()));
        self.raw(" = {");
        if layout.is_expanded() {
            self.push(Token::Separator(separator));
        }
        self.indent(layout.indent(FIELD_LEVEL));
        self.raw("isa = ");
        self.push(Token::Raw(Cow::Borrowed(isa::as_str(object.isa()))));
        self.raw(";");
        self.push(Token::Separator(separator));

        for (name, value) in object.attributes() {
            self.emit_attribute(FIELD_LEVEL, layout, name, value, NodeKind::Object)?;
        }

        self.indent(layout.indent(OBJECT_LEVEL));
        self.raw("};\n");
        Ok(())
    }

    /// One `name = value;` field. `parent` is the kind of the node holding the field.
    fn emit_attribute(
        &mut self,
        level: usize,
        layout: Layout,
        name: &'g str,
        value: &'g Node,
        parent: NodeKind,
    ) -> Result<(), SerializeError> {
        let separator = Token::Separator(layout.separator);
        // Lists nested in a group are written as one run.
        let nested = parent == NodeKind::AttributeGroup;

        if let Node::Object(_) = value {
            return Ok(());
        }
        self.indent(layout.indent(level));

        match value {
            Node::List(items) => {
                self.push(Token::Raw(Cow::Borrowed(name)));
                self.raw(" = (");
                if !nested {
                    self.push(separator.clone());
                }
                for (i, item) in items.iter().enumerate() {
                    if let Node::String(text) = item {
                        self.push(Token::Scalar(text));
                        if i + 1 < items.len() {
                            self.raw(",");
                        }
                    } else {
                        let element = self.list_element(name, item)?;
                        self.indent(layout.indent(level + 1));
                        self.push(Token::Raw(Cow::Borrowed(element.id())));
                        self.push(Token::Comment(element.comment()));
                        self.raw(",");
                        self.push(separator.clone());
                    }
                }
                if !nested {
                    self.indent(layout.indent(level));
                }
                self.raw(");");
                self.push(separator);
            }

            Node::Group(attrs) => {
                self.push(Token::Raw(Cow::Borrowed(name)));
                self.raw(" = {");
                if layout.is_expanded() {
                    self.push(separator.clone());
                }
                for (child_name, child) in attrs {
                    self.emit_attribute(
                        layout.indent(level + 1),
                        layout,
                        child_name,
                        child,
                        NodeKind::AttributeGroup,
                    )?;
                }
                self.indent(layout.indent(level));
                self.raw("};");
                self.push(separator);
            }

            Node::Reference(target) => {
                let object = self.resolve(name, *target)?;
                self.push(Token::Scalar(name));
                self.raw(" = ");
                self.push(Token::Raw(Cow::Borrowed(object.id())));
                if object.has_comment() && name != REMOTE_GLOBAL_ID_ATTRIBUTE {
                    self.push(Token::Comment(object.comment()));
                }
                self.raw(";");
                self.push(separator);
            }

            Node::String(text) => {
                self.push(Token::Scalar(name));
                self.raw(" = ");
                self.push(Token::Scalar(text));
                self.raw(";");
                self.push(separator);
            }

            Node::Object(_) => {}
        }
        Ok(())
    }

    /// Object written for a non-string list element.
    fn list_element(&self, attribute: &str, item: &'g Node) -> Result<&'g PbxObject, SerializeError> {
        match item {
            Node::Reference(target) => self.resolve(attribute, *target),
            Node::Object(object) => Ok(object),
            other => Err(SerializeError::InvalidListElement {
                attribute: attribute.to_string(),
                kind: other.kind(),
            }),
        }
    }

    fn resolve(&self, attribute: &str, target: Option<ObjectRef>) -> Result<&'g PbxObject, SerializeError> {
        let handle = target.ok_or_else(|| SerializeError::UnsetReference {
            attribute: attribute.to_string(),
        })?;
        self.graph
            .object(handle)
            .map_err(|_| SerializeError::UnresolvedReference {
                attribute: attribute.to_string(),
                handle,
            })
    }
}
