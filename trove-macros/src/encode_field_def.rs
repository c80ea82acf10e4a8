use crate::decode_field::FieldMetadata;
use proc_macro2::TokenStream;
use quote::quote;
use trove_core::quote_option;

pub fn encode_field_def(metadata: &FieldMetadata) -> TokenStream {
    let name = &metadata.name;
    let value = &metadata.value;
    let nullable = &metadata.nullable;
    let primary_key = &metadata.primary_key;
    let max_length = quote_option(&metadata.max_length);
    let nested = metadata.embedded_tokens().map_or(quote!(None), |v| {
        quote!(Some(
            <#v as ::trove::Schema>::fields_defs as fn() -> &'static [::trove::FieldDef]
        ))
    });
    let comment = &metadata.comment;
    quote! {
        ::trove::FieldDef {
            name: #name,
            value: #value,
            nullable: #nullable,
            primary_key: #primary_key,
            max_length: #max_length,
            nested: #nested,
            comment: #comment,
        }
    }
}
