//! Schema model and introspection loader for gqlts.
//!
//! This crate provides:
//! - `model`: an immutable, in-memory representation of a GraphQL type system
//! - `introspection`: deserialization of a standard introspection result into
//!   that model

pub mod introspection;
pub mod model;

pub use introspection::{load_introspection, IntrospectionError};
pub use model::{
    EnumDef, EnumValueDef, FieldDef, InterfaceDef, ObjectDef, ScalarDef, Schema, SchemaBuilder,
    TypeDef, TypeRef, UnionDef,
};
