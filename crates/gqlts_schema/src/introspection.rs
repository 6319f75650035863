//! Introspection result loading.
//!
//! Deserializes the standard GraphQL introspection response into a [`Schema`].
//! Both the bare `{"__schema": ...}` object and the transport envelope
//! `{"data": {"__schema": ...}}` are accepted.

use crate::model::{
    EnumDef, EnumValueDef, FieldDef, InterfaceDef, ObjectDef, ScalarDef, Schema, SchemaBuilder,
    TypeDef, TypeRef, UnionDef,
};
use serde::Deserialize;
use thiserror::Error;

/// Errors produced while loading an introspection document.
#[derive(Debug, Error)]
pub enum IntrospectionError {
    #[error("invalid introspection JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("document contains no __schema object")]
    MissingSchema,

    #[error("type listed without a name")]
    UnnamedType,

    #[error("{kind} wrapper on `{context}` has no ofType")]
    TruncatedTypeRef { kind: String, context: String },
}

#[derive(Debug, Deserialize)]
struct ResponseEnvelope {
    data: SchemaContainer,
}

#[derive(Debug, Deserialize)]
struct SchemaContainer {
    #[serde(rename = "__schema")]
    schema: IntrospectionSchema,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IntrospectionSchema {
    query_type: Option<NamedRef>,
    types: Vec<IntrospectionType>,
}

#[derive(Debug, Deserialize)]
struct NamedRef {
    name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IntrospectionType {
    kind: String,
    name: Option<String>,
    description: Option<String>,
    #[serde(default)]
    fields: Option<Vec<IntrospectionField>>,
    #[serde(default)]
    interfaces: Option<Vec<NamedRef>>,
    #[serde(default)]
    possible_types: Option<Vec<NamedRef>>,
    #[serde(default)]
    enum_values: Option<Vec<IntrospectionEnumValue>>,
}

#[derive(Debug, Deserialize)]
struct IntrospectionField {
    name: String,
    description: Option<String>,
    #[serde(rename = "type")]
    ty: IntrospectionTypeRef,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IntrospectionTypeRef {
    kind: String,
    name: Option<String>,
    of_type: Option<Box<IntrospectionTypeRef>>,
}

#[derive(Debug, Deserialize)]
struct IntrospectionEnumValue {
    name: String,
    description: Option<String>,
}

/// Loads a schema from introspection JSON text.
pub fn load_introspection(json: &str) -> Result<Schema, IntrospectionError> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    let schema = if let Ok(envelope) = serde_json::from_value::<ResponseEnvelope>(value.clone()) {
        envelope.data.schema
    } else {
        serde_json::from_value::<SchemaContainer>(value)
            .map_err(|_| IntrospectionError::MissingSchema)?
            .schema
    };

    let mut builder = SchemaBuilder::new();
    if let Some(root) = &schema.query_type {
        builder = builder.query_type(root.name.as_str());
    }

    let mut loaded = 0usize;
    for ty in schema.types {
        let Some(def) = convert_type(ty)? else {
            continue;
        };
        builder = builder.add_type(def);
        loaded += 1;
    }
    tracing::debug!(types = loaded, "loaded introspection schema");

    Ok(builder.build())
}

/// Converts one introspection type entry, or `None` for entries the
/// generator has no use for (meta types, input objects).
fn convert_type(ty: IntrospectionType) -> Result<Option<TypeDef>, IntrospectionError> {
    let name = ty.name.ok_or(IntrospectionError::UnnamedType)?;
    if name.starts_with("__") {
        return Ok(None);
    }

    let def = match ty.kind.as_str() {
        "SCALAR" => TypeDef::Scalar(ScalarDef {
            name,
            description: ty.description,
        }),
        "OBJECT" => {
            let fields = convert_fields(&name, ty.fields.unwrap_or_default())?;
            TypeDef::Object(ObjectDef {
                name,
                description: ty.description,
                fields,
                interfaces: named(ty.interfaces),
            })
        }
        "INTERFACE" => TypeDef::Interface(InterfaceDef {
            name,
            description: ty.description,
            possible_types: named(ty.possible_types),
        }),
        "UNION" => TypeDef::Union(UnionDef {
            name,
            description: ty.description,
            members: named(ty.possible_types),
        }),
        "ENUM" => TypeDef::Enum(EnumDef {
            name,
            description: ty.description,
            values: ty
                .enum_values
                .unwrap_or_default()
                .into_iter()
                .map(|v| EnumValueDef {
                    name: v.name,
                    description: v.description,
                })
                .collect(),
        }),
        other => {
            // INPUT_OBJECT and anything newer is outside the output contract.
            tracing::debug!(kind = other, type_name = %name, "skipping type");
            return Ok(None);
        }
    };

    Ok(Some(def))
}

fn convert_fields(
    owner: &str,
    fields: Vec<IntrospectionField>,
) -> Result<Vec<FieldDef>, IntrospectionError> {
    fields
        .into_iter()
        .map(|f| {
            let context = format!("{owner}.{}", f.name);
            Ok(FieldDef {
                name: f.name,
                description: f.description,
                ty: convert_type_ref(f.ty, &context)?,
            })
        })
        .collect()
}

/// Unwinds an `ofType` chain into a [`TypeRef`].
fn convert_type_ref(
    ty: IntrospectionTypeRef,
    context: &str,
) -> Result<TypeRef, IntrospectionError> {
    match ty.kind.as_str() {
        "NON_NULL" | "LIST" => {
            let inner = ty.of_type.ok_or_else(|| IntrospectionError::TruncatedTypeRef {
                kind: ty.kind.clone(),
                context: context.to_string(),
            })?;
            let inner = convert_type_ref(*inner, context)?;
            Ok(if ty.kind == "LIST" {
                TypeRef::list(inner)
            } else {
                TypeRef::non_null(inner)
            })
        }
        _ => {
            let name = ty.name.ok_or(IntrospectionError::UnnamedType)?;
            Ok(TypeRef::named(name))
        }
    }
}

fn named(refs: Option<Vec<NamedRef>>) -> Vec<String> {
    refs.unwrap_or_default()
        .into_iter()
        .map(|r| r.name)
        .collect()
}
