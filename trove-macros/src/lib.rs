mod decode_document;
mod decode_field;
mod encode_field_def;
mod schema_trait;

use decode_document::{DocumentKind, decode_document};
use proc_macro::TokenStream;
use quote::quote;
use schema_trait::schema_trait;
use syn::{ItemStruct, parse_macro_input};

#[proc_macro_derive(Document, attributes(trove))]
pub fn derive_document(input: TokenStream) -> TokenStream {
    let item: ItemStruct = parse_macro_input!(input as ItemStruct);
    let document = decode_document(item);
    let name = &document.item.ident;
    let class = &document.class;
    let schema = schema_trait(&document);
    let specific = match document.kind {
        DocumentKind::Stored => {
            let (collection, class_path) = match document.extends() {
                Some(base) => {
                    let base = &base.ty;
                    (
                        quote!(<#base as ::trove::Document>::collection()),
                        quote! {
                            static RESULT: ::std::sync::LazyLock<String> =
                                ::std::sync::LazyLock::new(|| {
                                    format!("{}.{}", <#base as ::trove::Document>::class_path(), #class)
                                });
                            RESULT.as_str()
                        },
                    )
                }
                None => {
                    let collection = &document.collection;
                    (quote!(#collection), quote!(#class))
                }
            };
            quote! {
                impl ::trove::Document for #name {
                    fn collection() -> &'static str {
                        #collection
                    }

                    fn class_path() -> &'static str {
                        #class_path
                    }
                }
            }
        }
        DocumentKind::Embedded => quote! {
            impl ::trove::AsValue for #name {
                fn as_empty_value() -> ::trove::Value {
                    ::trove::Value::Document(None)
                }

                fn as_value(self) -> ::trove::Value {
                    ::trove::Value::Document(Some(::trove::Schema::to_fields(&self)))
                }

                fn try_from_value(value: ::trove::Value) -> ::trove::Result<Self> {
                    match value {
                        ::trove::Value::Document(Some(fields)) => {
                            <Self as ::trove::Schema>::from_fields(&fields)
                        }
                        _ => Err(::trove::Error::msg(format!(
                            "Cannot convert {:?} to embedded document `{}`",
                            value, #class
                        ))),
                    }
                }
            }
        },
        DocumentKind::Mixin => quote!(),
    };
    quote! {
        #schema
        #specific
    }
    .into()
}
