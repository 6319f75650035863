//! Text rendering for the declaration sequence.
//!
//! Purely mechanical layout; every semantic decision has already been made
//! by the emitter. Rendering well-formed declarations cannot fail.

use crate::decl::{DeclBody, Declaration, FieldDecl, IndexSignature, TsType};

/// Column at which fixed end-of-line comments start.
const TRAILING_COMMENT_COLUMN: usize = 30;

/// Rendering options.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Prefix the file with the `@flow` module pragma lines.
    pub module_preamble: bool,
}

/// Declaration renderer.
pub struct Renderer {
    options: RenderOptions,
    output: String,
}

impl Renderer {
    /// Creates a new renderer.
    #[must_use]
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            output: String::new(),
        }
    }

    /// Renders a declaration sequence to source text.
    #[must_use]
    pub fn render(mut self, declarations: &[Declaration]) -> String {
        if self.options.module_preamble {
            self.output.push_str("// @flow\n// graphql flow definitions\n");
        }

        for (i, decl) in declarations.iter().enumerate() {
            if i > 0 {
                self.output.push('\n');
            }
            self.render_declaration(decl);
        }

        self.output
    }

    fn render_declaration(&mut self, decl: &Declaration) {
        if let Some(doc) = &decl.doc {
            self.output.push_str("/**\n  description: ");
            self.output.push_str(doc);
            self.output.push_str("\n*/\n");
        }

        match &decl.body {
            DeclBody::Record {
                fields,
                index_signature,
            } => {
                self.output.push_str("export type ");
                self.output.push_str(&decl.name);
                self.output.push_str(" = {\n");
                for field in fields {
                    self.render_field(field);
                }
                if let Some(sig) = index_signature {
                    self.render_index_signature(sig);
                }
                self.output.push_str("}\n");
            }
            DeclBody::Union(members) => {
                let members: Vec<_> = members.iter().map(render_type).collect();
                self.output.push_str("export type ");
                self.output.push_str(&decl.name);
                self.output.push_str(" = ");
                self.output.push_str(&members.join(" | "));
                self.output.push_str(";\n");
            }
            DeclBody::Enum(labels) => {
                let labels: Vec<_> = labels.iter().map(|l| format!("\"{l}\"")).collect();
                self.output.push_str("export type ");
                self.output.push_str(&decl.name);
                self.output.push_str(" = ");
                self.output.push_str(&labels.join(" | "));
                self.output.push_str(";\n");
            }
        }
    }

    fn render_field(&mut self, field: &FieldDecl) {
        if let Some(doc) = &field.doc {
            self.output.push_str("  /** ");
            self.output.push_str(doc);
            self.output.push_str(" */\n");
        }

        let marker = if field.optional { "?" } else { "" };
        let line = format!("  {}{marker}: {};", field.name, render_type(&field.ty));
        self.push_line_with_comment(line, field.trailing_comment.as_deref());
    }

    fn render_index_signature(&mut self, sig: &IndexSignature) {
        let line = format!("  [{}: string]: {};", sig.key, render_type(&sig.value));
        self.push_line_with_comment(line, sig.trailing_comment.as_deref());
    }

    fn push_line_with_comment(&mut self, line: String, comment: Option<&str>) {
        self.output.push_str(&line);
        if let Some(comment) = comment {
            if line.len() < TRAILING_COMMENT_COLUMN {
                for _ in line.len()..TRAILING_COMMENT_COLUMN {
                    self.output.push(' ');
                }
            } else {
                self.output.push(' ');
            }
            self.output.push_str(comment);
        }
        self.output.push('\n');
    }
}

fn render_type(ty: &TsType) -> String {
    match ty {
        TsType::String => "string".to_string(),
        TsType::Number => "number".to_string(),
        TsType::Boolean => "boolean".to_string(),
        TsType::Any => "any".to_string(),
        TsType::StringLiteral(value) => format!("\"{value}\""),
        TsType::Ref(name) => name.clone(),
        TsType::Array { of, .. } => format!("Array<{}>", render_type(of)),
    }
}
