use crate::decode_field::{FieldKind, FieldMetadata, decode_field};
use convert_case::{Case, Casing};
use quote::ToTokens;
use syn::{Fields, ItemStruct, LitStr, parse::ParseBuffer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// Top level document stored in a collection.
    Stored,
    /// Document nested inside another one.
    Embedded,
    /// Group of fields reused by other types through `flatten`.
    Mixin,
}

pub struct DocumentMetadata {
    pub item: ItemStruct,
    pub kind: DocumentKind,
    pub class: String,
    pub collection: String,
    pub fields: Vec<FieldMetadata>,
}

impl DocumentMetadata {
    /// The field holding the stored base document, if any.
    pub fn extends(&self) -> Option<&FieldMetadata> {
        self.fields.iter().find(|f| f.kind == FieldKind::Extends)
    }
}

pub fn decode_document(item: ItemStruct) -> DocumentMetadata {
    if !matches!(item.fields, Fields::Named(..)) {
        panic!(
            "Document `{}` must be a struct with named fields",
            item.ident
        );
    }
    if !item.generics.params.is_empty() {
        panic!("Document `{}` cannot have generic parameters", item.ident);
    }
    let fields: Vec<_> = item.fields.iter().map(decode_field).collect();
    let mut kind = DocumentKind::Stored;
    let mut class = item.ident.to_string();
    let mut collection = None;
    for attr in &item.attrs {
        let meta = &attr.meta;
        if meta.path().is_ident("trove") {
            let Ok(list) = meta.require_list() else {
                panic!("Error while parsing `trove`, use it like: `#[trove(attribute = value, ..)]`",);
            };
            let _ = list.parse_nested_meta(|arg| {
                if arg.path.is_ident("collection") {
                    let Ok(value) = arg.value().and_then(ParseBuffer::parse::<LitStr>) else {
                        panic!(
                            "Error while parsing `collection`, use it like: `#[trove(collection = \"my_collection\")]`"
                        );
                    };
                    collection = Some(value.value());
                } else if arg.path.is_ident("class") {
                    let Ok(value) = arg.value().and_then(ParseBuffer::parse::<LitStr>) else {
                        panic!("Error while parsing `class`, use it like: `#[trove(class = \"MyClass\")]`");
                    };
                    class = value.value();
                } else if arg.path.is_ident("embedded") {
                    let Err(..) = arg.value() else {
                        panic!("Error while parsing `embedded`, use it like: `#[trove(embedded)]`");
                    };
                    kind = DocumentKind::Embedded;
                } else if arg.path.is_ident("mixin") {
                    let Err(..) = arg.value() else {
                        panic!("Error while parsing `mixin`, use it like: `#[trove(mixin)]`");
                    };
                    kind = DocumentKind::Mixin;
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
    if class.is_empty() || class.contains('.') {
        panic!("Class name `{}` must be non empty and cannot contain `.`", class);
    }
    let extends = fields
        .iter()
        .filter(|f| f.kind == FieldKind::Extends)
        .count();
    let primary_keys = fields.iter().filter(|f| f.primary_key).count();
    if primary_keys > 1 {
        panic!(
            "Document `{}` can declare at most one primary key field",
            item.ident
        );
    }
    match kind {
        DocumentKind::Stored => {
            if extends > 1 {
                panic!("Document `{}` can extend at most one document", item.ident);
            }
            if extends == 1 && collection.is_some() {
                panic!(
                    "Document `{}` extends another document and shares its collection, remove the `collection` attribute",
                    item.ident
                );
            }
        }
        DocumentKind::Embedded | DocumentKind::Mixin => {
            if extends > 0 {
                panic!(
                    "Only stored documents can extend another document, use `flatten` in `{}`",
                    item.ident
                );
            }
            if collection.is_some() {
                panic!(
                    "Attribute `collection` is meaningful only for stored documents (`{}`)",
                    item.ident
                );
            }
            if kind == DocumentKind::Embedded && primary_keys > 0 {
                panic!(
                    "Embedded document `{}` cannot have a primary key",
                    item.ident
                );
            }
        }
    }
    let mut collection = collection.unwrap_or_else(|| class.to_case(Case::Snake));
    if collection.starts_with('_') {
        collection.remove(0);
    }
    DocumentMetadata {
        item,
        kind,
        class,
        collection,
        fields,
    }
}
