//! Compile errors.
//!
//! Every variant is fatal: the product is a complete declaration file or
//! nothing. A malformed schema fails identically on every run.

use thiserror::Error;

/// Errors detected during traversal and projection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodegenError {
    /// A scalar type with no entry in the projection table.
    #[error("unknown scalar type `{name}`")]
    UnknownScalar { name: String },

    /// A field references a type the schema does not declare.
    #[error("reference to undeclared type `{name}`")]
    UnresolvedTypeReference { name: String },

    /// Two distinct definitions share one emitted name.
    #[error("duplicate type name `{name}`")]
    DuplicateTypeName { name: String },
}
