use crate::{Value, matches_path};
use quote::ToTokens;
use syn::{GenericArgument, PathArguments, Type, TypePath};

/// Outcome of mapping a Rust field type to a document value type.
#[derive(Default)]
pub struct TypeDecoded {
    pub value: Value,
    pub nullable: bool,
    /// Embedded document type, when the field (or the list elements) holds one.
    pub embedded: Option<Type>,
}

pub fn decode_type(ty: &Type) -> TypeDecoded {
    let Type::Path(TypePath { path, .. }) = ty else {
        panic!("Unexpected type `{}`", ty.to_token_stream());
    };
    let mut nullable = false;
    let mut embedded = None;
    let value = 'value: {
        if let Some(ident) = path.get_ident() {
            if ident == "bool" {
                break 'value Value::Boolean(None);
            } else if ident == "i32" {
                break 'value Value::Int32(None);
            } else if ident == "i64" {
                break 'value Value::Int64(None);
            } else if ident == "f64" {
                break 'value Value::Float64(None);
            } else if ident == "i8"
                || ident == "i16"
                || ident == "i128"
                || ident == "u8"
                || ident == "u16"
                || ident == "u32"
                || ident == "u64"
                || ident == "u128"
                || ident == "isize"
                || ident == "usize"
                || ident == "f32"
            {
                panic!(
                    "Type `{}` is not supported, documents store integers as i32 or i64 and floating point numbers as f64",
                    ident
                );
            }
        }
        if matches_path(path, &["std", "string", "String"]) {
            break 'value Value::Varchar(None);
        } else if matches_path(path, &["rust_decimal", "Decimal"]) {
            break 'value Value::Decimal(None);
        } else if matches_path(path, &["time", "Date"]) {
            break 'value Value::Date(None);
        } else if matches_path(path, &["time", "PrimitiveDateTime"]) {
            break 'value Value::Timestamp(None);
        } else if matches_path(path, &["uuid", "Uuid"]) {
            break 'value Value::Uuid(None);
        }
        let is_option = matches_path(path, &["std", "option", "Option"]);
        let is_box = matches_path(path, &["std", "boxed", "Box"]);
        let is_list = matches_path(path, &["std", "vec", "Vec"]);
        if is_option || is_box || is_list {
            let PathArguments::AngleBracketed(bracketed) = &path
                .segments
                .last()
                .expect("Path must be non empty")
                .arguments
            else {
                panic!("`{}` must have a generic argument", path.to_token_stream());
            };
            let Some(GenericArgument::Type(inner)) = bracketed.args.first() else {
                panic!(
                    "`{}` must have a type as the first generic argument",
                    path.to_token_stream()
                );
            };
            let inner = decode_type(inner);
            embedded = inner.embedded;
            if is_list {
                break 'value Value::List(None, Box::new(inner.value));
            }
            nullable = is_option || inner.nullable;
            break 'value inner.value;
        }
        embedded = Some(ty.clone());
        Value::Document(None)
    };
    TypeDecoded {
        value,
        nullable,
        embedded,
    }
}
