use crate::{
    Command, Context, DocumentsAffected, Error, Executor, FieldDef, Fields, Filter, Result,
    Schema, Value, stream::Stream, validate_fields,
};
use futures::{FutureExt, StreamExt, TryStreamExt};
use log::Level;
use std::{future::Future, pin::pin};
use uuid::Uuid;

/// Field holding the identity of a stored document.
pub const ID_FIELD: &str = "_id";
/// Field holding the class path of a stored document.
pub const CLASS_FIELD: &str = "_cls";

/// A schema stored as a top level document of a collection.
///
/// Documents of a type and of the types extending it share the same collection, the
/// `_cls` field tells them apart. Queries issued through a type return the documents of
/// that type and of every type derived from it, each decoded as the queried type.
pub trait Document: Schema {
    fn collection() -> &'static str;

    /// Dot separated class names from the root document down to `Self`, for example
    /// `WideTrade.WideSwap`.
    fn class_path() -> &'static str;

    fn primary_key_def() -> Option<&'static FieldDef> {
        Self::fields_defs().iter().find(|v| v.primary_key)
    }

    fn primary_key(&self) -> Option<Value> {
        let def = Self::primary_key_def()?;
        self.to_fields().remove(def.name)
    }

    /// Validated fields ready to be stored, prefixed by `_id` and `_cls`.
    ///
    /// Types without a primary key get a random identity.
    fn to_document(&self) -> Result<Fields>
    where
        Self: Sized,
    {
        let fields = self.to_fields();
        validate_fields(Self::fields_defs(), &fields)
            .with_context(|| format!("While validating `{}`", Self::class_path()))?;
        let id = match Self::primary_key_def() {
            Some(def) => fields.get(def.name).cloned().unwrap_or_default(),
            None => Value::Uuid(Some(Uuid::new_v4())),
        };
        let mut document = Fields::with_capacity(fields.len() + 2);
        document.insert(ID_FIELD, id);
        document.insert(CLASS_FIELD, Value::Varchar(Some(Self::class_path().into())));
        document.extend(fields);
        Ok(document)
    }

    /// Filter selecting the documents of `Self` and of the types derived from it.
    fn class_filter() -> Filter {
        Filter::Class(Self::class_path().into())
    }

    /// Store the document, replacing the one having the same primary key.
    fn save<Exec: Executor>(&self, executor: &mut Exec) -> impl Future<Output = Result<()>> + Send
    where
        Self: Sized,
    {
        let command = self.to_document().map(|document| Command::Upsert {
            collection: Self::collection().into(),
            document,
        });
        async move {
            executor.execute(command?).await?;
            Ok(())
        }
    }

    /// Save the documents one at a time, in iteration order.
    ///
    /// All the documents are validated before the first one is sent.
    fn save_many<'a, Exec, It>(
        executor: &mut Exec,
        items: It,
    ) -> impl Future<Output = Result<DocumentsAffected>> + Send
    where
        Self: Sized + 'a,
        Exec: Executor,
        It: IntoIterator<Item = &'a Self>,
    {
        let commands = items
            .into_iter()
            .map(|v| {
                v.to_document().map(|document| Command::Upsert {
                    collection: Self::collection().into(),
                    document,
                })
            })
            .collect::<Result<Vec<_>>>();
        async move {
            let mut result = DocumentsAffected::default();
            for command in commands? {
                result.extend([executor.execute(command).await?]);
            }
            Ok(result)
        }
    }

    fn find_pk<Exec: Executor>(
        executor: &mut Exec,
        primary_key: impl Into<Value>,
    ) -> impl Future<Output = Result<Option<Self>>> + Send
    where
        Self: Sized,
    {
        Self::find_one(executor, Filter::Eq(ID_FIELD.into(), primary_key.into()))
    }

    fn find_one<Exec: Executor>(
        executor: &mut Exec,
        filter: Filter,
    ) -> impl Future<Output = Result<Option<Self>>> + Send
    where
        Self: Sized,
    {
        let stream = Self::find_many(executor, filter, Some(1));
        async move { pin!(stream).into_future().map(|(v, _)| v).await.transpose() }
    }

    fn find_many<Exec: Executor>(
        executor: &mut Exec,
        filter: Filter,
        limit: Option<u32>,
    ) -> impl Stream<Item = Result<Self>> + Send
    where
        Self: Sized,
    {
        let command = Command::Find {
            collection: Self::collection().into(),
            filter: Self::class_filter().and(filter),
            limit,
        };
        executor.fetch(command).map(|v| {
            v.and_then(|document| {
                Self::from_fields(&document.fields).with_context(|| {
                    format!(
                        "While decoding a document of `{}` as `{}`",
                        document.class_path().unwrap_or("?"),
                        Self::class_path()
                    )
                })
            })
        })
    }

    /// Every stored document of `Self` and of the types derived from it.
    fn objects<Exec: Executor>(executor: &mut Exec) -> impl Stream<Item = Result<Self>> + Send
    where
        Self: Sized,
    {
        Self::find_many(executor, Filter::All, None)
    }

    fn count<Exec: Executor>(
        executor: &mut Exec,
        filter: Filter,
    ) -> impl Future<Output = Result<u64>> + Send {
        let command = Command::Find {
            collection: Self::collection().into(),
            filter: Self::class_filter().and(filter),
            limit: None,
        };
        executor
            .fetch(command)
            .try_fold(0u64, |count, _| async move { Ok::<_, Error>(count + 1) })
    }

    fn delete_many<Exec: Executor>(
        executor: &mut Exec,
        filter: Filter,
    ) -> impl Future<Output = Result<DocumentsAffected>> + Send {
        executor.execute(Command::Delete {
            collection: Self::collection().into(),
            filter: Self::class_filter().and(filter),
        })
    }

    fn delete<Exec: Executor>(&self, executor: &mut Exec) -> impl Future<Output = Result<()>> + Send
    where
        Self: Sized,
    {
        let primary_key = self.primary_key().ok_or_else(|| {
            Error::msg(format!(
                "Cannot delete a `{}` without a primary key",
                Self::class_path()
            ))
        });
        async move {
            let affected =
                Self::delete_many(executor, Filter::Eq(ID_FIELD.into(), primary_key?)).await?;
            if affected.documents_affected == 1 {
                return Ok(());
            }
            let error = Error::msg(format!(
                "The command deleted {} documents instead of the expected 1",
                affected.documents_affected
            ));
            log::log!(
                if affected.documents_affected == 0 {
                    Level::Info
                } else {
                    Level::Error
                },
                "{}",
                error
            );
            Err(error)
        }
    }

    /// Drop the collection, including the documents of related types sharing it.
    fn drop_collection<Exec: Executor>(
        executor: &mut Exec,
    ) -> impl Future<Output = Result<()>> + Send {
        executor
            .execute(Command::DropCollection {
                collection: Self::collection().into(),
            })
            .map(|v| v.map(|_| ()))
    }
}
