use crate::{CLASS_FIELD, DocumentWriter, Fields, Filter, GenericDocumentWriter, Value};
use std::fmt::{self, Display};

/// Unit of work sent to a document store through an [`Executor`](crate::Executor).
#[derive(Debug, Clone)]
pub enum Command {
    /// Insert the document, replacing the stored one with the same `_id`.
    Upsert { collection: String, document: Fields },
    /// Stream the documents matching the filter, in insertion order.
    Find {
        collection: String,
        filter: Filter,
        limit: Option<u32>,
    },
    /// Remove the documents matching the filter.
    Delete { collection: String, filter: Filter },
    /// Remove a whole collection, succeeds if it does not exist.
    DropCollection { collection: String },
    /// Remove every collection of the connected namespace.
    DropNamespace,
}

impl Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let writer = GenericDocumentWriter {};
        let mut out = String::with_capacity(128);
        match self {
            Command::Upsert {
                collection,
                document,
            } => {
                writer.write_fields(&mut out, document);
                write!(f, "upsert {collection} {out}")
            }
            Command::Find {
                collection,
                filter,
                limit,
            } => {
                write!(f, "find {collection} where {filter}")?;
                if let Some(limit) = limit {
                    write!(f, " limit {limit}")?;
                }
                Ok(())
            }
            Command::Delete { collection, filter } => {
                write!(f, "delete {collection} where {filter}")
            }
            Command::DropCollection { collection } => write!(f, "drop collection {collection}"),
            Command::DropNamespace => f.write_str("drop namespace"),
        }
    }
}

/// A document as returned by the store, including the `_id` and `_cls` fields.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub collection: String,
    pub fields: Fields,
}

impl StoredDocument {
    pub fn new(collection: impl Into<String>, fields: Fields) -> Self {
        Self {
            collection: collection.into(),
            fields,
        }
    }
    pub fn class_path(&self) -> Option<&str> {
        match self.fields.get(CLASS_FIELD) {
            Some(Value::Varchar(Some(v))) => Some(v),
            _ => None,
        }
    }
}

/// Metadata about modify commands.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentsAffected {
    /// Total number of documents written or removed.
    pub documents_affected: u64,
}

impl DocumentsAffected {
    pub const fn new(documents_affected: u64) -> Self {
        Self { documents_affected }
    }
}

impl Extend<DocumentsAffected> for DocumentsAffected {
    fn extend<T: IntoIterator<Item = DocumentsAffected>>(&mut self, iter: T) {
        for elem in iter {
            self.documents_affected += elem.documents_affected;
        }
    }
}

/// Heterogeneous items emitted by `Executor::run`.
#[derive(Debug)]
pub enum CommandResult {
    Document(StoredDocument),
    Affected(DocumentsAffected),
}

impl From<StoredDocument> for CommandResult {
    fn from(value: StoredDocument) -> Self {
        CommandResult::Document(value)
    }
}

impl From<DocumentsAffected> for CommandResult {
    fn from(value: DocumentsAffected) -> Self {
        CommandResult::Affected(value)
    }
}
