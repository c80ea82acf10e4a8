use crate::{Fields, Value, separated_by};
use std::fmt::Write;
use time::{format_description::BorrowedFormatItem, macros::format_description};

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");
const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");

/// Renders documents as relaxed JSON text, for logs and `Display`.
pub trait DocumentWriter {
    fn write_fields(&self, out: &mut String, fields: &Fields) {
        if fields.is_empty() {
            out.push_str("{}");
            return;
        }
        out.push('{');
        separated_by(
            out,
            fields.iter(),
            |out, (name, value)| {
                self.write_string(out, name);
                out.push_str(": ");
                self.write_value(out, value);
            },
            ", ",
        );
        out.push('}');
    }

    fn write_value(&self, out: &mut String, value: &Value) {
        if value.is_null() {
            out.push_str("null");
            return;
        }
        match value {
            Value::Boolean(Some(v)) => out.push_str(if *v { "true" } else { "false" }),
            Value::Int32(Some(v)) => {
                let _ = write!(out, "{v}");
            }
            Value::Int64(Some(v)) => {
                let _ = write!(out, "{v}");
            }
            Value::Float64(Some(v)) => {
                if v.is_finite() {
                    let _ = write!(out, "{v:?}");
                } else {
                    out.push_str("null");
                }
            }
            Value::Decimal(Some(v)) => self.write_string(out, &v.to_string()),
            Value::Varchar(Some(v)) => self.write_string(out, v),
            Value::Date(Some(v)) => match v.format(DATE_FORMAT) {
                Ok(v) => self.write_string(out, &v),
                Err(..) => out.push_str("null"),
            },
            Value::Timestamp(Some(v)) => match v.format(TIMESTAMP_FORMAT) {
                Ok(v) => self.write_string(out, &v),
                Err(..) => out.push_str("null"),
            },
            Value::Uuid(Some(v)) => self.write_string(out, &v.to_string()),
            Value::List(Some(items), ..) => {
                out.push('[');
                separated_by(out, items, |out, v| self.write_value(out, v), ", ");
                out.push(']');
            }
            Value::Document(Some(fields)) => self.write_fields(out, fields),
            _ => out.push_str("null"),
        }
    }

    fn write_string(&self, out: &mut String, value: &str) {
        out.push('"');
        for c in value.chars() {
            match c {
                '"' => out.push_str("\\\""),
                '\\' => out.push_str("\\\\"),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\t' => out.push_str("\\t"),
                c if (c as u32) < 0x20 => {
                    let _ = write!(out, "\\u{:04x}", c as u32);
                }
                c => out.push(c),
            }
        }
        out.push('"');
    }
}

#[derive(Default, Debug, Clone, Copy)]
pub struct GenericDocumentWriter {}

impl DocumentWriter for GenericDocumentWriter {}
