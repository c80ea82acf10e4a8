use proc_macro2::TokenStream;
use quote::ToTokens;
use std::fmt::Debug;
use syn::{
    Expr, ExprLit, Field, Ident, Lit, LitInt, LitStr, Meta, MetaNameValue, Type,
    parse::ParseBuffer,
};
use trove_core::{CLASS_FIELD, ID_FIELD, TypeDecoded, Value, decode_type};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Stored as a field of the document.
    Mapped,
    /// Fields of a mixin, stored inline.
    Flatten,
    /// Fields of a stored base document, stored inline. Collection and class path are inherited.
    Extends,
    /// Not stored.
    Ignore,
}

pub struct FieldMetadata {
    pub ident: Ident,
    pub ty: Type,
    pub kind: FieldKind,
    pub name: String,
    pub value: Value,
    pub nullable: bool,
    pub primary_key: bool,
    pub max_length: Option<usize>,
    pub embedded: Option<Type>,
    pub comment: String,
}

impl Debug for FieldMetadata {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldMetadata")
            .field("ident", &self.ident)
            .field("ty", &self.ty.to_token_stream().to_string())
            .field("kind", &self.kind)
            .field("name", &self.name)
            .field("value", &self.value)
            .field("nullable", &self.nullable)
            .field("primary_key", &self.primary_key)
            .field("max_length", &self.max_length)
            .field(
                "embedded",
                &self.embedded.as_ref().map(|v| v.to_token_stream().to_string()),
            )
            .field("comment", &self.comment)
            .finish()
    }
}

impl FieldMetadata {
    /// Tokens of the `Schema` implementor embedded by `flatten`, `extends` and embedded fields.
    pub fn embedded_tokens(&self) -> Option<TokenStream> {
        self.embedded.as_ref().map(|v| v.to_token_stream())
    }
}

pub fn decode_field(field: &Field) -> FieldMetadata {
    let ident = field
        .ident
        .clone()
        .expect("Field is expected to have a name");
    let mut name = ident.to_string();
    if name.starts_with('_') {
        name.remove(0);
    }
    let mut metadata = FieldMetadata {
        ident,
        ty: field.ty.clone(),
        kind: FieldKind::Mapped,
        name,
        value: Value::Null,
        nullable: false,
        primary_key: false,
        max_length: None,
        embedded: None,
        comment: String::new(),
    };
    let mut comment_lines = Vec::new();
    for attr in &field.attrs {
        let meta = &attr.meta;
        if meta.path().is_ident("doc") {
            if let Meta::NameValue(MetaNameValue {
                value:
                    Expr::Lit(ExprLit {
                        lit: Lit::Str(v), ..
                    }),
                ..
            }) = meta
            {
                comment_lines.push(v.value().trim().to_string());
            }
        } else if meta.path().is_ident("trove") {
            let Ok(list) = meta.require_list() else {
                panic!(
                    "Error while parsing `trove`, use it like: `#[trove(attribute = value, ...)]`",
                );
            };
            let set_kind = |metadata: &mut FieldMetadata, kind: FieldKind| {
                if metadata.kind != FieldKind::Mapped {
                    panic!(
                        "Field `{}` can have only one of `flatten`, `extends` and `ignore`",
                        metadata.ident
                    );
                }
                metadata.kind = kind;
            };
            let _ = list.parse_nested_meta(|arg| {
                if arg.path.is_ident("name") {
                    let Ok(v) = arg.value().and_then(ParseBuffer::parse::<LitStr>) else {
                        panic!("Error while parsing `name`, use it like: `#[trove(name = \"my_field\")]`");
                    };
                    metadata.name = v.value();
                } else if arg.path.is_ident("primary_key") {
                    let Err(..) = arg.value() else {
                        // value() is Err for Meta::Path
                        panic!("Error while parsing `primary_key`, use it like: `#[trove(primary_key)]`");
                    };
                    metadata.primary_key = true;
                } else if arg.path.is_ident("max_length") {
                    let Ok(v) = arg
                        .value()
                        .and_then(ParseBuffer::parse::<LitInt>)
                        .and_then(|v| v.base10_parse::<usize>())
                    else {
                        panic!("Error while parsing `max_length`, use it like: `#[trove(max_length = 50)]`");
                    };
                    metadata.max_length = Some(v);
                } else if arg.path.is_ident("flatten") {
                    let Err(..) = arg.value() else {
                        panic!("Error while parsing `flatten`, use it like: `#[trove(flatten)]`");
                    };
                    set_kind(&mut metadata, FieldKind::Flatten);
                } else if arg.path.is_ident("extends") {
                    let Err(..) = arg.value() else {
                        panic!("Error while parsing `extends`, use it like: `#[trove(extends)]`");
                    };
                    set_kind(&mut metadata, FieldKind::Extends);
                } else if arg.path.is_ident("ignore") {
                    let Err(..) = arg.value() else {
                        panic!("Error while parsing `ignore`, use it like: `#[trove(ignore)]`");
                    };
                    set_kind(&mut metadata, FieldKind::Ignore);
                } else {
                    panic!(
                        "Unknown attribute `{}` inside trove macro",
                        arg.path.to_token_stream().to_string()
                    );
                }
                Ok(())
            });
        }
    }
    metadata.comment = comment_lines.join(" ");
    match metadata.kind {
        FieldKind::Mapped => {
            let TypeDecoded {
                value,
                nullable,
                embedded,
            } = decode_type(&field.ty);
            metadata.value = value;
            metadata.nullable = nullable;
            metadata.embedded = embedded;
            if metadata.name == ID_FIELD || metadata.name == CLASS_FIELD {
                panic!(
                    "Field `{}` cannot be named `{}`, the name is reserved for stored documents",
                    metadata.ident, metadata.name
                );
            }
            if metadata.primary_key && metadata.nullable {
                panic!(
                    "Primary key field `{}` cannot be optional",
                    metadata.ident
                );
            }
            if metadata.max_length.is_some()
                && !matches!(metadata.value, Value::Varchar(..))
            {
                panic!(
                    "Attribute `max_length` on field `{}` is allowed only for string fields",
                    metadata.ident
                );
            }
        }
        FieldKind::Flatten | FieldKind::Extends => {
            if metadata.primary_key || metadata.max_length.is_some() {
                panic!(
                    "Field `{}` embeds the fields of another type, `primary_key` and `max_length` belong to those fields",
                    metadata.ident
                );
            }
            metadata.embedded = Some(field.ty.clone());
        }
        FieldKind::Ignore => {}
    }
    metadata
}

#[cfg(test)]
mod tests {
    use super::{FieldKind, decode_field};
    use syn::{Field, parse_quote};
    use trove_core::Value;

    #[test]
    fn named_field() {
        let field: Field = parse_quote! {
            /// Trade currency.
            #[trove(name = "ccy", max_length = 3)]
            pub _currency: Option<String>
        };
        let metadata = decode_field(&field);
        assert_eq!(metadata.kind, FieldKind::Mapped);
        assert_eq!(metadata.name, "ccy");
        assert_eq!(metadata.value, Value::Varchar(None));
        assert!(metadata.nullable);
        assert_eq!(metadata.max_length, Some(3));
        assert_eq!(metadata.comment, "Trade currency.");

        let field: Field = parse_quote!(_trade_id: String);
        assert_eq!(decode_field(&field).name, "trade_id");
    }

    #[test]
    #[should_panic(expected = "cannot be named `_id`")]
    fn reserved_identity_name() {
        let field: Field = parse_quote! {
            #[trove(name = "_id")]
            trade_id: String
        };
        decode_field(&field);
    }

    #[test]
    #[should_panic(expected = "cannot be named `_cls`")]
    fn reserved_class_name() {
        let field: Field = parse_quote! {
            #[trove(name = "_cls")]
            kind: Option<String>
        };
        decode_field(&field);
    }

    #[test]
    #[should_panic(expected = "cannot be named `_id`")]
    fn reserved_name_from_ident() {
        let field: Field = parse_quote!(__id: i64);
        decode_field(&field);
    }
}
