use quote::{ToTokens, quote};
use rust_decimal::Decimal;
use std::{mem, vec};
use time::{Date, PrimitiveDateTime};
use uuid::Uuid;

/// Dynamically typed document value.
///
/// Every variant wraps an `Option` so that the same enum describes both a concrete value
/// (`Value::Varchar(Some(..))`) and the type of a field (`Value::Varchar(None)`).
#[derive(Default, Debug, Clone)]
pub enum Value {
    #[default]
    Null,
    Boolean(Option<bool>),
    Int32(Option<i32>),
    Int64(Option<i64>),
    Float64(Option<f64>),
    Decimal(Option<Decimal>),
    Varchar(Option<String>),
    Date(Option<Date>),
    Timestamp(Option<PrimitiveDateTime>),
    Uuid(Option<Uuid>),
    List(Option<Vec<Value>>, /* type: */ Box<Value>),
    Document(Option<Fields>),
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Boolean(l), Self::Boolean(r)) => l == r,
            (Self::Int32(l), Self::Int32(r)) => l == r,
            (Self::Int64(l), Self::Int64(r)) => l == r,
            (Self::Float64(l), Self::Float64(r)) => l == r,
            (Self::Decimal(l), Self::Decimal(r)) => l == r,
            (Self::Varchar(l), Self::Varchar(r)) => l == r,
            (Self::Date(l), Self::Date(r)) => l == r,
            (Self::Timestamp(l), Self::Timestamp(r)) => l == r,
            (Self::Uuid(l), Self::Uuid(r)) => l == r,
            (Self::List(l, ..), Self::List(r, ..)) => l == r,
            (Self::Document(l), Self::Document(r)) => l == r,
            _ => mem::discriminant(self) == mem::discriminant(other),
        }
    }
}

impl Value {
    /// True for `Value::Null` and for any variant not carrying a value.
    pub fn is_null(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Boolean(v) => v.is_none(),
            Value::Int32(v) => v.is_none(),
            Value::Int64(v) => v.is_none(),
            Value::Float64(v) => v.is_none(),
            Value::Decimal(v) => v.is_none(),
            Value::Varchar(v) => v.is_none(),
            Value::Date(v) => v.is_none(),
            Value::Timestamp(v) => v.is_none(),
            Value::Uuid(v) => v.is_none(),
            Value::List(v, ..) => v.is_none(),
            Value::Document(v) => v.is_none(),
        }
    }

    pub fn same_type(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::List(.., l), Self::List(.., r)) => l.same_type(r),
            _ => mem::discriminant(self) == mem::discriminant(other),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(..) => "boolean",
            Value::Int32(..) => "int32",
            Value::Int64(..) => "int64",
            Value::Float64(..) => "float64",
            Value::Decimal(..) => "decimal",
            Value::Varchar(..) => "string",
            Value::Date(..) => "date",
            Value::Timestamp(..) => "timestamp",
            Value::Uuid(..) => "uuid",
            Value::List(..) => "list",
            Value::Document(..) => "document",
        }
    }
}

impl ToTokens for Value {
    fn to_tokens(&self, tokens: &mut proc_macro2::TokenStream) {
        let ts = match self {
            Value::Null => quote!(::trove::Value::Null),
            Value::Boolean(..) => quote!(::trove::Value::Boolean(None)),
            Value::Int32(..) => quote!(::trove::Value::Int32(None)),
            Value::Int64(..) => quote!(::trove::Value::Int64(None)),
            Value::Float64(..) => quote!(::trove::Value::Float64(None)),
            Value::Decimal(..) => quote!(::trove::Value::Decimal(None)),
            Value::Varchar(..) => quote!(::trove::Value::Varchar(None)),
            Value::Date(..) => quote!(::trove::Value::Date(None)),
            Value::Timestamp(..) => quote!(::trove::Value::Timestamp(None)),
            Value::Uuid(..) => quote!(::trove::Value::Uuid(None)),
            Value::List(.., inner) => {
                let inner = inner.as_ref().to_token_stream();
                quote!(::trove::Value::List(None, ::std::boxed::Box::new(#inner)))
            }
            Value::Document(..) => quote!(::trove::Value::Document(None)),
        };
        tokens.extend(ts);
    }
}

/// Named values of a document, kept in insertion order.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Fields(Vec<(String, Value)>);

impl Fields {
    pub const fn new() -> Self {
        Self(Vec::new())
    }
    pub fn with_capacity(capacity: usize) -> Self {
        Self(Vec::with_capacity(capacity))
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|(n, _)| n == name)
    }
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.0.iter_mut().find(|(n, _)| n == name).map(|(_, v)| v)
    }
    /// Replace the value in place if `name` is present, append it otherwise.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        let name = name.into();
        if let Some(current) = self.get_mut(&name) {
            return Some(mem::replace(current, value));
        }
        self.0.push((name, value));
        None
    }
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        let index = self.0.iter().position(|(n, _)| n == name)?;
        Some(self.0.remove(index).1)
    }
    pub fn names(&self) -> impl ExactSizeIterator<Item = &str> {
        self.0.iter().map(|(n, _)| n.as_str())
    }
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &Value)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v))
    }
}

impl<N: Into<String>> FromIterator<(N, Value)> for Fields {
    fn from_iter<T: IntoIterator<Item = (N, Value)>>(iter: T) -> Self {
        let mut result = Fields::new();
        result.extend(iter);
        result
    }
}

impl<N: Into<String>> Extend<(N, Value)> for Fields {
    fn extend<T: IntoIterator<Item = (N, Value)>>(&mut self, iter: T) {
        for (name, value) in iter {
            self.insert(name, value);
        }
    }
}

impl IntoIterator for Fields {
    type Item = (String, Value);
    type IntoIter = vec::IntoIter<(String, Value)>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
