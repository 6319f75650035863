//! Declaration emission.
//!
//! Walks the type graph reachable from the root(s) and produces exactly one
//! declaration per distinct named type. The walk is a depth-first preorder:
//! an object registers itself, then visits its declared interfaces, then its
//! field types in declaration order; a union or interface visits its member
//! types in declared order. Every name is registered before any body can
//! reference it, so cycles need no special casing: TypeScript resolves the
//! forward references.

use crate::connection;
use crate::decl::{DeclBody, Declaration, FieldDecl, IndexSignature, TsType};
use crate::error::CodegenError;
use crate::project::project;
use gqlts_schema::{EnumDef, ObjectDef, Schema, TypeDef, TypeRef};
use rustc_hash::FxHashSet;

pub const RESPONSE_ROOT: &str = "GraphQLResponseRoot";
pub const RESPONSE_ERROR: &str = "GraphQLResponseError";
pub const RESPONSE_ERROR_LOCATION: &str = "GraphQLResponseErrorLocation";

/// Emits the declaration sequence for one compilation.
///
/// `root` is the schema's designated root type; `extra_roots` start
/// additional traversals over the same visited set.
pub fn emit_declarations(
    schema: &Schema,
    root: &str,
    extra_roots: &[String],
) -> Result<Vec<Declaration>, CodegenError> {
    Emitter::new(schema).emit(root, extra_roots)
}

struct Emitter<'a> {
    schema: &'a Schema,
    visited: FxHashSet<String>,
    declarations: Vec<Declaration>,
}

impl<'a> Emitter<'a> {
    fn new(schema: &'a Schema) -> Self {
        Self {
            schema,
            visited: FxHashSet::default(),
            declarations: Vec::new(),
        }
    }

    fn emit(
        mut self,
        root: &str,
        extra_roots: &[String],
    ) -> Result<Vec<Declaration>, CodegenError> {
        if let Some(name) = self.schema.duplicate_type_names().first() {
            return Err(CodegenError::DuplicateTypeName { name: name.clone() });
        }

        self.declarations.extend(response_envelope(root));
        self.visit(root)?;
        for extra in extra_roots {
            self.visit(extra)?;
        }

        tracing::debug!(
            declarations = self.declarations.len(),
            "emitted declaration sequence"
        );
        Ok(self.declarations)
    }

    fn visit(&mut self, name: &str) -> Result<(), CodegenError> {
        if !self.visited.insert(name.to_string()) {
            return Ok(());
        }

        let schema = self.schema;
        let def = schema
            .get_type(name)
            .ok_or_else(|| CodegenError::UnresolvedTypeReference {
                name: name.to_string(),
            })?;

        match def {
            // Scalars never get standalone declarations; the projection
            // table handles them at each reference site.
            TypeDef::Scalar(_) => {}
            TypeDef::Enum(e) => self.declarations.push(enum_declaration(e)),
            TypeDef::Union(u) => {
                self.declarations.push(union_declaration(
                    &u.name,
                    u.description.as_deref(),
                    &u.members,
                ));
                for member in &u.members {
                    self.visit(member)?;
                }
            }
            TypeDef::Interface(i) => {
                self.declarations.push(union_declaration(
                    &i.name,
                    i.description.as_deref(),
                    &i.possible_types,
                ));
                for member in &i.possible_types {
                    self.visit(member)?;
                }
            }
            TypeDef::Object(o) => {
                let decl = self.object_declaration(o)?;
                self.declarations.push(decl);
                for interface in &o.interfaces {
                    self.visit(interface)?;
                }
                for field in &o.fields {
                    self.visit_field_type(&field.ty)?;
                }
            }
        }
        Ok(())
    }

    fn visit_field_type(&mut self, ty: &TypeRef) -> Result<(), CodegenError> {
        self.visit(ty.named_type())
    }

    fn object_declaration(&self, object: &ObjectDef) -> Result<Declaration, CodegenError> {
        let shape = connection::recognize(self.schema, object);
        if let Some(shape) = &shape {
            tracing::trace!(
                connection = %object.name,
                edge = %shape.edge_type,
                "recognized connection shape"
            );
        }

        let mut fields = Vec::with_capacity(object.fields.len() + 1);
        fields.push(FieldDecl::new(
            "__typename",
            TsType::StringLiteral(object.name.clone()),
        ));

        for field in &object.fields {
            let mut decl = if let Some(shape) = shape.as_ref().filter(|_| field.name == "edges") {
                // The edge reference follows the naming convention, not the
                // generic projection path.
                FieldDecl {
                    name: field.name.clone(),
                    ty: TsType::array(
                        TsType::Ref(shape.edge_type.clone()),
                        edge_items_nullable(&field.ty),
                    ),
                    optional: !field.ty.is_non_null(),
                    doc: None,
                    trailing_comment: None,
                }
            } else {
                let projection = project(self.schema, &field.ty)?;
                FieldDecl {
                    name: field.name.clone(),
                    ty: projection.ty,
                    optional: projection.optional,
                    doc: None,
                    trailing_comment: None,
                }
            };
            decl.doc = field.description.clone();
            fields.push(decl);
        }

        let mut decl = Declaration::record(&object.name, fields);
        decl.doc = object.description.clone();
        Ok(decl)
    }
}

/// Whether a recognized connection's `edges` list allows null elements.
fn edge_items_nullable(ty: &TypeRef) -> bool {
    let list = match ty {
        TypeRef::NonNull(inner) => inner.as_ref(),
        other => other,
    };
    match list {
        TypeRef::List(element) => !element.is_non_null(),
        _ => true,
    }
}

fn enum_declaration(def: &EnumDef) -> Declaration {
    Declaration {
        name: def.name.clone(),
        doc: def.description.clone(),
        body: DeclBody::Enum(def.values.iter().map(|v| v.name.clone()).collect()),
    }
}

fn union_declaration(name: &str, description: Option<&str>, members: &[String]) -> Declaration {
    Declaration {
        name: name.to_string(),
        doc: description.map(str::to_string),
        body: DeclBody::Union(
            members
                .iter()
                .map(|m| TsType::Ref(m.clone()))
                .collect(),
        ),
    }
}

/// The fixed response envelope, identical for every schema except for the
/// root type reference.
fn response_envelope(root: &str) -> [Declaration; 3] {
    [
        Declaration::record(
            RESPONSE_ROOT,
            vec![
                FieldDecl::new("data", TsType::Ref(root.to_string())).optional(),
                FieldDecl::new(
                    "errors",
                    TsType::array(TsType::Ref(RESPONSE_ERROR.to_string()), false),
                )
                .optional(),
            ],
        ),
        Declaration {
            name: RESPONSE_ERROR.to_string(),
            doc: None,
            body: DeclBody::Record {
                fields: vec![
                    FieldDecl::new("message", TsType::String)
                        .with_trailing_comment("// Required for all errors"),
                    FieldDecl::new(
                        "locations",
                        TsType::array(TsType::Ref(RESPONSE_ERROR_LOCATION.to_string()), false),
                    )
                    .optional(),
                ],
                index_signature: Some(IndexSignature {
                    key: "propName".to_string(),
                    value: TsType::Any,
                    trailing_comment: Some(
                        "// 7.2.2 says 'GraphQL servers may provide additional entries to error'"
                            .to_string(),
                    ),
                }),
            },
        },
        Declaration::record(
            RESPONSE_ERROR_LOCATION,
            vec![
                FieldDecl::new("line", TsType::Number),
                FieldDecl::new("column", TsType::Number),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use gqlts_schema::{
        EnumValueDef, FieldDef, InterfaceDef, SchemaBuilder, UnionDef,
    };

    fn object(name: &str, fields: Vec<FieldDef>) -> TypeDef {
        TypeDef::Object(ObjectDef {
            name: name.to_string(),
            description: None,
            fields,
            interfaces: Vec::new(),
        })
    }

    fn color_schema() -> Schema {
        SchemaBuilder::new()
            .query_type("Query")
            .add_type(object(
                "Query",
                vec![FieldDef::new("colorEnum", TypeRef::named("ColorEnum"))],
            ))
            .add_type(TypeDef::Enum(EnumDef {
                name: "ColorEnum".to_string(),
                description: None,
                values: ["RED", "GREEN", "BLUE"]
                    .iter()
                    .map(|v| EnumValueDef {
                        name: (*v).to_string(),
                        description: None,
                    })
                    .collect(),
            }))
            .build()
    }

    #[test]
    fn test_envelope_then_traversal_order() {
        let decls = emit_declarations(&color_schema(), "Query", &[]).unwrap();
        let names: Vec<_> = decls.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(
            names,
            [
                RESPONSE_ROOT,
                RESPONSE_ERROR,
                RESPONSE_ERROR_LOCATION,
                "Query",
                "ColorEnum"
            ]
        );
    }

    #[test]
    fn test_typename_discriminant_comes_first() {
        let decls = emit_declarations(&color_schema(), "Query", &[]).unwrap();
        let DeclBody::Record { fields, .. } = &decls[3].body else {
            panic!("expected record");
        };
        assert_eq!(fields[0].name, "__typename");
        assert_eq!(fields[0].ty, TsType::StringLiteral("Query".to_string()));
        assert!(!fields[0].optional);
        assert_eq!(fields[1].name, "colorEnum");
        assert_eq!(fields[1].ty, TsType::Ref("ColorEnum".to_string()));
        assert!(fields[1].optional);
    }

    #[test]
    fn test_enum_labels_preserve_order() {
        let decls = emit_declarations(&color_schema(), "Query", &[]).unwrap();
        let DeclBody::Enum(labels) = &decls[4].body else {
            panic!("expected enum");
        };
        assert_eq!(labels, &["RED", "GREEN", "BLUE"]);
    }

    fn cyclic_schema() -> Schema {
        SchemaBuilder::new()
            .query_type("Root")
            .add_type(object(
                "Root",
                vec![FieldDef::new("planet", TypeRef::named("Planet"))],
            ))
            .add_type(object(
                "Planet",
                vec![
                    FieldDef::new("name", TypeRef::named("String")),
                    FieldDef::new(
                        "residentConnection",
                        TypeRef::named("PlanetResidentsConnection"),
                    ),
                ],
            ))
            .add_type(object(
                "PlanetResidentsConnection",
                vec![
                    FieldDef::new("pageInfo", TypeRef::non_null(TypeRef::named("PageInfo"))),
                    FieldDef::new(
                        "edges",
                        TypeRef::list(TypeRef::named("PlanetResidentsEdge")),
                    ),
                    FieldDef::new("totalCount", TypeRef::named("Int")),
                    FieldDef::new("residents", TypeRef::list(TypeRef::named("Person"))),
                ],
            ))
            .add_type(object(
                "PlanetResidentsEdge",
                vec![
                    FieldDef::new("node", TypeRef::named("Person")),
                    FieldDef::new("cursor", TypeRef::non_null(TypeRef::named("String"))),
                ],
            ))
            .add_type(object(
                "PageInfo",
                vec![FieldDef::new(
                    "hasNextPage",
                    TypeRef::non_null(TypeRef::named("Boolean")),
                )],
            ))
            .add_type(object(
                "Person",
                vec![FieldDef::new("homeworld", TypeRef::named("Planet"))],
            ))
            .build()
    }

    #[test]
    fn test_cycles_emit_each_type_once() {
        let decls = emit_declarations(&cyclic_schema(), "Root", &[]).unwrap();
        let names: Vec<_> = decls.iter().map(|d| d.name.as_str()).collect();
        let planets = names.iter().filter(|n| **n == "Planet").count();
        let people = names.iter().filter(|n| **n == "Person").count();
        assert_eq!(planets, 1);
        assert_eq!(people, 1);
        assert_eq!(
            names,
            [
                RESPONSE_ROOT,
                RESPONSE_ERROR,
                RESPONSE_ERROR_LOCATION,
                "Root",
                "Planet",
                "PlanetResidentsConnection",
                "PageInfo",
                "PlanetResidentsEdge",
                "Person",
            ]
        );
    }

    #[test]
    fn test_determinism() {
        let schema = cyclic_schema();
        let first = emit_declarations(&schema, "Root", &[]).unwrap();
        let second = emit_declarations(&schema, "Root", &[]).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_interfaces_are_visited_before_fields() {
        let schema = SchemaBuilder::new()
            .query_type("Query")
            .add_type(object(
                "Query",
                vec![FieldDef::new("film", TypeRef::named("Film"))],
            ))
            .add_type(TypeDef::Object(ObjectDef {
                name: "Film".to_string(),
                description: None,
                fields: vec![FieldDef::new("director", TypeRef::named("Person"))],
                interfaces: vec!["Node".to_string()],
            }))
            .add_type(TypeDef::Interface(InterfaceDef {
                name: "Node".to_string(),
                description: None,
                possible_types: vec!["Film".to_string(), "Person".to_string()],
            }))
            .add_type(TypeDef::Object(ObjectDef {
                name: "Person".to_string(),
                description: None,
                fields: Vec::new(),
                interfaces: vec!["Node".to_string()],
            }))
            .build();

        let decls = emit_declarations(&schema, "Query", &[]).unwrap();
        let names: Vec<_> = decls.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(
            &names[3..],
            ["Query", "Film", "Node", "Person"]
        );
    }

    #[test]
    fn test_union_members_in_declared_order() {
        let schema = SchemaBuilder::new()
            .query_type("Query")
            .add_type(object(
                "Query",
                vec![FieldDef::new("node", TypeRef::named("Node"))],
            ))
            .add_type(TypeDef::Union(UnionDef {
                name: "Node".to_string(),
                description: None,
                members: vec!["Planet".to_string(), "Person".to_string()],
            }))
            .add_type(object("Planet", Vec::new()))
            .add_type(object("Person", Vec::new()))
            .build();

        let decls = emit_declarations(&schema, "Query", &[]).unwrap();
        let node = decls.iter().find(|d| d.name == "Node").unwrap();
        let DeclBody::Union(members) = &node.body else {
            panic!("expected union");
        };
        assert_eq!(
            members,
            &[
                TsType::Ref("Planet".to_string()),
                TsType::Ref("Person".to_string())
            ]
        );
    }

    #[test]
    fn test_empty_object_is_tolerated() {
        let schema = SchemaBuilder::new()
            .query_type("Query")
            .add_type(object("Query", Vec::new()))
            .build();
        let decls = emit_declarations(&schema, "Query", &[]).unwrap();
        let DeclBody::Record { fields, .. } = &decls[3].body else {
            panic!("expected record");
        };
        assert_eq!(fields.len(), 1); // just the discriminant
    }

    #[test]
    fn test_unresolved_root_is_fatal() {
        let schema = SchemaBuilder::new().build();
        let err = emit_declarations(&schema, "Query", &[]).unwrap_err();
        assert_eq!(
            err,
            CodegenError::UnresolvedTypeReference {
                name: "Query".to_string()
            }
        );
    }

    #[test]
    fn test_duplicate_type_name_is_fatal() {
        let schema = SchemaBuilder::new()
            .query_type("Query")
            .add_type(object("Query", Vec::new()))
            .add_type(object("Query", Vec::new()))
            .build();
        let err = emit_declarations(&schema, "Query", &[]).unwrap_err();
        assert_eq!(
            err,
            CodegenError::DuplicateTypeName {
                name: "Query".to_string()
            }
        );
    }

    #[test]
    fn test_extra_roots_share_the_visited_set() {
        let schema = SchemaBuilder::new()
            .query_type("Query")
            .add_type(object(
                "Query",
                vec![FieldDef::new("planet", TypeRef::named("Planet"))],
            ))
            .add_type(object("Planet", Vec::new()))
            .add_type(object("Hangar", Vec::new()))
            .build();
        let decls =
            emit_declarations(&schema, "Query", &["Planet".to_string(), "Hangar".to_string()])
                .unwrap();
        let names: Vec<_> = decls.iter().map(|d| d.name.as_str()).collect();
        // Planet was already reached from Query; only Hangar is new.
        assert_eq!(&names[3..], ["Query", "Planet", "Hangar"]);
    }

    #[test]
    fn test_envelope_references_the_declared_root() {
        let decls = emit_declarations(&cyclic_schema(), "Root", &[]).unwrap();
        let DeclBody::Record { fields, .. } = &decls[0].body else {
            panic!("expected record");
        };
        assert_eq!(fields[0].name, "data");
        assert_eq!(fields[0].ty, TsType::Ref("Root".to_string()));
    }
}
