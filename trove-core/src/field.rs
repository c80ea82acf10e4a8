use crate::{Context, Error, Fields, Result, Value};

/// Declarative specification of a document field.
#[derive(Default, Debug, Clone)]
pub struct FieldDef {
    /// Name of the field inside the stored document.
    pub name: &'static str,
    /// `Value` describing the field type (lists carry the element type).
    pub value: Value,
    /// Nullability flag, `Option<T>` fields are nullable.
    pub nullable: bool,
    /// The field is the identity of the document.
    pub primary_key: bool,
    /// Maximum length in characters, string fields only.
    pub max_length: Option<usize>,
    /// Field definitions of the embedded document type, when the field holds one or a list of them.
    pub nested: Option<fn() -> &'static [FieldDef]>,
    /// Optional human-readable comment.
    pub comment: &'static str,
}

impl FieldDef {
    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// Check `fields` against the definitions.
///
/// Required fields must be set, values must match the declared type, strings must fit
/// within `max_length` and embedded documents are checked recursively.
pub fn validate_fields(defs: &[FieldDef], fields: &Fields) -> Result<()> {
    for def in defs {
        let value = fields.get(def.name);
        let Some(value) = value.filter(|v| !v.is_null()) else {
            if !def.nullable {
                return Err(Error::msg(format!(
                    "Field `{}` is required but it is not set",
                    def.name
                )));
            }
            continue;
        };
        if !value.same_type(&def.value) {
            return Err(Error::msg(format!(
                "Field `{}` expects a {} but a {} was provided",
                def.name,
                def.value.type_name(),
                value.type_name(),
            )));
        }
        if let (Some(max_length), Value::Varchar(Some(v))) = (def.max_length, value) {
            let length = v.chars().count();
            if length > max_length {
                return Err(Error::msg(format!(
                    "Field `{}` has length {} exceeding the maximum of {} (value: `{}`)",
                    def.name, length, max_length, v,
                )));
            }
        }
        if let Some(nested) = def.nested {
            match value {
                Value::Document(Some(document)) => validate_fields(nested(), document)
                    .with_context(|| format!("While validating field `{}`", def.name))?,
                Value::List(Some(items), ..) => {
                    for (i, item) in items.iter().enumerate() {
                        if let Value::Document(Some(document)) = item {
                            validate_fields(nested(), document).with_context(|| {
                                format!("While validating field `{}` at index {}", def.name, i)
                            })?;
                        }
                    }
                }
                _ => {}
            }
        }
    }
    Ok(())
}
