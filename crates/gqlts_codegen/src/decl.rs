//! Target-language declaration tree.
//!
//! The emitter produces a flat, ordered list of [`Declaration`]s; the
//! renderer turns them into text. Nothing in here consults the schema.

/// A TypeScript type expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TsType {
    /// `string`
    String,
    /// `number`
    Number,
    /// `boolean`
    Boolean,
    /// `any`
    Any,
    /// A string literal type, e.g. `"Planet"`.
    StringLiteral(String),
    /// A reference to another emitted declaration, by name.
    Ref(String),
    /// `Array<T>`. `nullable_items` records whether the schema allows null
    /// elements; it keeps `[T!]` and `[T]` distinct without changing the
    /// rendered text.
    Array {
        of: Box<TsType>,
        nullable_items: bool,
    },
}

impl TsType {
    pub fn array(of: TsType, nullable_items: bool) -> Self {
        Self::Array {
            of: Box::new(of),
            nullable_items,
        }
    }
}

/// A field of a record declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDecl {
    pub name: String,
    pub ty: TsType,
    /// Rendered as the `?` marker: the value may be absent.
    pub optional: bool,
    pub doc: Option<String>,
    /// A fixed end-of-line comment (used by the response envelope).
    pub trailing_comment: Option<String>,
}

impl FieldDecl {
    pub fn new(name: impl Into<String>, ty: TsType) -> Self {
        Self {
            name: name.into(),
            ty,
            optional: false,
            doc: None,
            trailing_comment: None,
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn with_trailing_comment(mut self, comment: impl Into<String>) -> Self {
        self.trailing_comment = Some(comment.into());
        self
    }
}

/// `[<key>: string]: <value>`, a record's open extension map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexSignature {
    pub key: String,
    pub value: TsType,
    pub trailing_comment: Option<String>,
}

/// The body of a declaration: its kind tag plus ordered members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclBody {
    /// A record with ordered fields and an optional open extension map.
    Record {
        fields: Vec<FieldDecl>,
        index_signature: Option<IndexSignature>,
    },
    /// A union over type references.
    Union(Vec<TsType>),
    /// A closed string-literal union over the given labels, in order.
    Enum(Vec<String>),
}

/// One emitted declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub name: String,
    pub doc: Option<String>,
    pub body: DeclBody,
}

impl Declaration {
    pub fn record(name: impl Into<String>, fields: Vec<FieldDecl>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            body: DeclBody::Record {
                fields,
                index_signature: None,
            },
        }
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }
}
