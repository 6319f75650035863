//! Relay connection recognition.
//!
//! A structural classifier over object field sets. Nothing in the schema
//! marks a connection; the shape is recognized from its fields, and any
//! mismatch falls back to ordinary object emission. Recognition never fails
//! a compilation.

use gqlts_schema::{ObjectDef, Schema, TypeDef, TypeRef};

/// A recognized paginated-connection shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionShape {
    /// The companion edge type, named by convention.
    pub edge_type: String,
    /// The type at the end of each edge.
    pub node_type: String,
}

/// Derives the companion edge type name: the `Connection` suffix is replaced
/// by `Edge`. The rule is a compiler convention, applied mechanically.
#[must_use]
pub fn derived_edge_name(connection_name: &str) -> String {
    let stem = connection_name
        .strip_suffix("Connection")
        .unwrap_or(connection_name);
    format!("{stem}Edge")
}

/// Classifies an object type as a connection.
///
/// Requires a `pageInfo` field referencing an object, and an `edges` field
/// that is a list of an object carrying `node` + `cursor` fields under the
/// mechanically derived edge name. Anything else returns `None`.
#[must_use]
pub fn recognize(schema: &Schema, object: &ObjectDef) -> Option<ConnectionShape> {
    let page_info = object.field("pageInfo")?;
    if !resolves_to_object(schema, page_info.ty.named_type()) {
        return None;
    }

    let edges = object.field("edges")?;
    let element = list_element(&edges.ty)?;
    let TypeRef::Named(edge_name) = element else {
        return None;
    };
    if *edge_name != derived_edge_name(&object.name) {
        return None;
    }

    let Some(TypeDef::Object(edge)) = schema.get_type(edge_name) else {
        return None;
    };
    let node = edge.field("node")?;
    edge.field("cursor")?;

    Some(ConnectionShape {
        edge_type: edge_name.clone(),
        node_type: node.ty.named_type().to_string(),
    })
}

/// The element reference of a list type, looking through `NonNull` on both
/// the list and the element.
fn list_element(ty: &TypeRef) -> Option<&TypeRef> {
    let list = match ty {
        TypeRef::NonNull(inner) => inner.as_ref(),
        other => other,
    };
    let TypeRef::List(element) = list else {
        return None;
    };
    Some(match element.as_ref() {
        TypeRef::NonNull(inner) => inner.as_ref(),
        other => other,
    })
}

fn resolves_to_object(schema: &Schema, name: &str) -> bool {
    matches!(schema.get_type(name), Some(TypeDef::Object(_)))
}
