//! TypeScript declaration generation from GraphQL schemas.
//!
//! This crate turns a loaded [`Schema`] into a single declaration module:
//! one `export type` per named type reachable from the root, plus the fixed
//! response envelope.
//!
//! # Example
//!
//! ```
//! use gqlts_codegen::Generator;
//! use gqlts_schema::{FieldDef, ObjectDef, SchemaBuilder, TypeDef, TypeRef};
//!
//! let schema = SchemaBuilder::new()
//!     .query_type("Query")
//!     .add_type(TypeDef::Object(ObjectDef {
//!         name: "Query".to_string(),
//!         description: None,
//!         fields: vec![FieldDef::new("hello", TypeRef::named("String"))],
//!         interfaces: Vec::new(),
//!     }))
//!     .build();
//!
//! let code = Generator::new(&schema).generate().unwrap();
//! assert!(code.contains("export type Query = {"));
//! ```

pub mod connection;
pub mod decl;
pub mod emit;
pub mod error;
pub mod project;
pub mod render;

pub use connection::{derived_edge_name, recognize, ConnectionShape};
pub use decl::{DeclBody, Declaration, FieldDecl, IndexSignature, TsType};
pub use emit::emit_declarations;
pub use error::CodegenError;
pub use project::{project, Projection};
pub use render::{RenderOptions, Renderer};

use gqlts_schema::Schema;

/// Code generation options.
#[derive(Debug, Clone, Default)]
pub struct CodegenOptions {
    /// Prefix the output with the `@flow` module pragma lines.
    pub module_preamble: bool,
    /// Additional root types to traverse beyond the schema's query root.
    pub extra_roots: Vec<String>,
}

/// Main code generator.
pub struct Generator<'a> {
    schema: &'a Schema,
    options: CodegenOptions,
}

impl<'a> Generator<'a> {
    /// Creates a new generator with default options.
    pub fn new(schema: &'a Schema) -> Self {
        Self {
            schema,
            options: CodegenOptions::default(),
        }
    }

    /// Creates a new generator with options.
    pub fn with_options(schema: &'a Schema, options: CodegenOptions) -> Self {
        Self { schema, options }
    }

    /// The root type the traversal starts from: the schema's declared query
    /// root, or `Query` when the schema does not name one.
    #[must_use]
    pub fn root_type(&self) -> &str {
        self.schema.query_type.as_deref().unwrap_or("Query")
    }

    /// Produces the ordered declaration sequence.
    pub fn declarations(&self) -> Result<Vec<Declaration>, CodegenError> {
        emit::emit_declarations(self.schema, self.root_type(), &self.options.extra_roots)
    }

    /// Produces the rendered declaration module.
    pub fn generate(&self) -> Result<String, CodegenError> {
        let declarations = self.declarations()?;
        Ok(Renderer::new(RenderOptions {
            module_preamble: self.options.module_preamble,
        })
        .render(&declarations))
    }
}
