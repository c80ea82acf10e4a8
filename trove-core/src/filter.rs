use crate::{CLASS_FIELD, DocumentWriter, Fields, GenericDocumentWriter, Value, separated_by};
use std::fmt::{self, Display};

/// Condition selecting stored documents.
#[derive(Default, Debug, Clone, PartialEq)]
pub enum Filter {
    /// Every document.
    #[default]
    All,
    /// Documents of the class path or of any class derived from it.
    Class(String),
    /// Documents having the field equal to the value.
    Eq(String, Value),
    And(Vec<Filter>),
    Or(Vec<Filter>),
    Not(Box<Filter>),
}

impl Filter {
    pub fn class(path: impl Into<String>) -> Self {
        Filter::Class(path.into())
    }

    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::Eq(field.into(), value.into())
    }

    pub fn and(self, other: Filter) -> Self {
        match (self, other) {
            (Filter::All, v) | (v, Filter::All) => v,
            (Filter::And(mut l), Filter::And(r)) => {
                l.extend(r);
                Filter::And(l)
            }
            (Filter::And(mut l), r) => {
                l.push(r);
                Filter::And(l)
            }
            (l, r) => Filter::And(vec![l, r]),
        }
    }

    pub fn or(self, other: Filter) -> Self {
        match (self, other) {
            (Filter::All, _) | (_, Filter::All) => Filter::All,
            (Filter::Or(mut l), r) => {
                l.push(r);
                Filter::Or(l)
            }
            (l, r) => Filter::Or(vec![l, r]),
        }
    }

    pub fn negate(self) -> Self {
        match self {
            Filter::Not(v) => *v,
            v => Filter::Not(Box::new(v)),
        }
    }

    /// Evaluate the filter against the fields of a stored document.
    pub fn matches(&self, document: &Fields) -> bool {
        match self {
            Filter::All => true,
            Filter::Class(path) => match document.get(CLASS_FIELD) {
                Some(Value::Varchar(Some(class))) => is_same_or_derived(class, path),
                _ => false,
            },
            Filter::Eq(field, value) => document.get(field).is_some_and(|v| v == value),
            Filter::And(filters) => filters.iter().all(|v| v.matches(document)),
            Filter::Or(filters) => filters.iter().any(|v| v.matches(document)),
            Filter::Not(filter) => !filter.matches(document),
        }
    }
}

/// True when `class` equals `path` or is a descendant of it (`path.Derived`).
pub fn is_same_or_derived(class: &str, path: &str) -> bool {
    class
        .strip_prefix(path)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('.'))
}

impl Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        write_filter(&mut out, self);
        f.write_str(&out)
    }
}

fn write_filter(out: &mut String, filter: &Filter) {
    match filter {
        Filter::All => out.push_str("true"),
        Filter::Class(path) => {
            out.push_str(CLASS_FIELD);
            out.push_str(" is ");
            out.push_str(path);
        }
        Filter::Eq(field, value) => {
            out.push_str(field);
            out.push_str(" == ");
            GenericDocumentWriter {}.write_value(out, value);
        }
        Filter::And(filters) | Filter::Or(filters) => {
            let separator = if matches!(filter, Filter::And(..)) {
                " and "
            } else {
                " or "
            };
            out.push('(');
            separated_by(out, filters, |out, v| write_filter(out, v), separator);
            out.push(')');
        }
        Filter::Not(filter) => {
            out.push_str("not ");
            write_filter(out, filter);
        }
    }
}
