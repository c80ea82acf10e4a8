use crate::{
    decode_document::DocumentMetadata, decode_field::FieldKind, encode_field_def::encode_field_def,
};
use proc_macro2::TokenStream;
use quote::quote;

pub fn schema_trait(document: &DocumentMetadata) -> TokenStream {
    let name = &document.item.ident;
    let class = &document.class;
    let defs = document.fields.iter().filter_map(|f| match f.kind {
        FieldKind::Mapped => {
            let def = encode_field_def(f);
            Some(quote!(defs.push(#def);))
        }
        FieldKind::Flatten | FieldKind::Extends => {
            let ty = &f.ty;
            Some(quote!(defs.extend(<#ty as ::trove::Schema>::fields_defs().iter().cloned());))
        }
        FieldKind::Ignore => None,
    });
    let to_fields = document.fields.iter().filter_map(|f| {
        let ident = &f.ident;
        let field_name = &f.name;
        match f.kind {
            FieldKind::Mapped => Some(quote! {
                fields.insert(
                    #field_name,
                    ::trove::AsValue::as_value(::std::clone::Clone::clone(&self.#ident)),
                );
            }),
            FieldKind::Flatten | FieldKind::Extends => Some(quote! {
                fields.extend(::trove::Schema::to_fields(&self.#ident));
            }),
            FieldKind::Ignore => None,
        }
    });
    let from_fields = document.fields.iter().map(|f| {
        let ident = &f.ident;
        let ty = &f.ty;
        let field_name = &f.name;
        match f.kind {
            FieldKind::Mapped => quote! {
                #ident: ::trove::Context::with_context(
                    <#ty as ::trove::AsValue>::try_from_value(
                        fields.get(#field_name).cloned().unwrap_or_default(),
                    ),
                    || format!("While decoding field `{}` of `{}`", #field_name, #class),
                )?
            },
            FieldKind::Flatten | FieldKind::Extends => quote! {
                #ident: <#ty as ::trove::Schema>::from_fields(fields)?
            },
            FieldKind::Ignore => quote!(#ident: ::std::default::Default::default()),
        }
    });
    quote! {
        impl ::trove::Schema for #name {
            fn class_name() -> &'static str {
                #class
            }

            fn fields_defs() -> &'static [::trove::FieldDef] {
                static RESULT: ::std::sync::LazyLock<Box<[::trove::FieldDef]>> =
                    ::std::sync::LazyLock::new(|| {
                        let mut defs = ::std::vec::Vec::new();
                        #(#defs)*
                        defs.into_boxed_slice()
                    });
                &RESULT
            }

            fn to_fields(&self) -> ::trove::Fields {
                let mut fields = ::trove::Fields::new();
                #(#to_fields)*
                fields
            }

            #[allow(unused_variables)]
            fn from_fields(fields: &::trove::Fields) -> ::trove::Result<Self> {
                Ok(Self {
                    #(#from_fields),*
                })
            }
        }
    }
}
