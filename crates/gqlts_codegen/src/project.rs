//! Type projection.
//!
//! Maps one schema [`TypeRef`] to a TypeScript type expression, applied
//! outward-in over the wrapper chain. Pure; the only state is the schema it
//! resolves names against.

use crate::decl::TsType;
use crate::error::CodegenError;
use gqlts_schema::{Schema, TypeDef, TypeRef};

/// A projected field type: the expression plus whether the value may be
/// absent. Absence comes from the wrapper chain, not the expression, so the
/// two travel together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    pub ty: TsType,
    pub optional: bool,
}

/// Projects a type reference.
///
/// A reference not wrapped in `NonNull` projects as optional. Unknown
/// scalars and references to undeclared types are fatal.
pub fn project(schema: &Schema, ty: &TypeRef) -> Result<Projection, CodegenError> {
    let (inner, optional) = match ty {
        TypeRef::NonNull(inner) => (inner.as_ref(), false),
        other => (other, true),
    };

    Ok(Projection {
        ty: project_expr(schema, inner)?,
        optional,
    })
}

fn project_expr(schema: &Schema, ty: &TypeRef) -> Result<TsType, CodegenError> {
    match ty {
        TypeRef::Named(name) => project_named(schema, name),
        TypeRef::List(inner) => {
            let nullable_items = !inner.is_non_null();
            let element = match inner.as_ref() {
                TypeRef::NonNull(e) => e.as_ref(),
                e => e,
            };
            Ok(TsType::array(project_expr(schema, element)?, nullable_items))
        }
        // `non_null` construction guarantees no nested NonNull; reaching one
        // here means the caller handed us an unnormalized chain.
        TypeRef::NonNull(inner) => project_expr(schema, inner),
    }
}

fn project_named(schema: &Schema, name: &str) -> Result<TsType, CodegenError> {
    match schema.get_type(name) {
        None => Err(CodegenError::UnresolvedTypeReference {
            name: name.to_string(),
        }),
        Some(TypeDef::Scalar(_)) => scalar_type(name),
        Some(_) => Ok(TsType::Ref(name.to_string())),
    }
}

/// The fixed scalar table.
fn scalar_type(name: &str) -> Result<TsType, CodegenError> {
    match name {
        "ID" | "String" => Ok(TsType::String),
        "Int" | "Float" => Ok(TsType::Number),
        "Boolean" => Ok(TsType::Boolean),
        _ => Err(CodegenError::UnknownScalar {
            name: name.to_string(),
        }),
    }
}
