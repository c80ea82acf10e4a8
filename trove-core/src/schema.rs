use crate::{Context, FieldDef, Fields, Result, validate_fields};

/// Mapping between a Rust struct and the fields of a document.
///
/// Implemented by `#[derive(Document)]` for stored documents, embedded documents and
/// mixins alike.
pub trait Schema {
    /// Name of the type as written in the class path of stored documents.
    fn class_name() -> &'static str;

    /// Definitions of all the mapped fields, including the ones of flattened bases.
    fn fields_defs() -> &'static [FieldDef];

    fn to_fields(&self) -> Fields;

    /// Decode from the fields of a document, fields not declared by `Self` are ignored.
    fn from_fields(fields: &Fields) -> Result<Self>
    where
        Self: Sized;

    fn validate(&self) -> Result<()> {
        validate_fields(Self::fields_defs(), &self.to_fields())
            .with_context(|| format!("While validating `{}`", Self::class_name()))
    }
}
