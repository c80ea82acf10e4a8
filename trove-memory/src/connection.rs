use crate::{
    MemoryDriver,
    store::{self, Namespace},
};
use async_stream::try_stream;
use std::{borrow::Cow, sync::Arc};
use trove_core::{
    Command, CommandResult, Connection, Driver, Error, Executor, Result, StoredDocument,
    namespace_from_url,
    stream::{Stream, TryStreamExt},
};

/// Handle over a namespace of the in-process store.
///
/// Every connection to the same namespace shares the same documents, which stay alive
/// until the namespace is dropped or the process ends.
#[derive(Debug, Clone)]
pub struct MemoryConnection {
    pub(crate) namespace: String,
    pub(crate) store: Arc<Namespace>,
}

impl MemoryConnection {
    /// Names of the collections currently holding documents, sorted.
    pub async fn collections(&self) -> Vec<String> {
        self.store.collection_names().await
    }
}

impl Executor for MemoryConnection {
    type Driver = MemoryDriver;

    fn driver(&self) -> &Self::Driver {
        &MemoryDriver {}
    }

    fn run(&mut self, command: Command) -> impl Stream<Item = Result<CommandResult>> + Send {
        log::debug!("[{}] {}", self.namespace, command);
        let store = self.store.clone();
        try_stream! {
            match command {
                Command::Upsert { collection, document } => {
                    yield CommandResult::Affected(store.upsert(&collection, document).await?);
                }
                Command::Find { collection, filter, limit } => {
                    for fields in store.find(&collection, &filter, limit).await {
                        yield CommandResult::Document(StoredDocument::new(collection.clone(), fields));
                    }
                }
                Command::Delete { collection, filter } => {
                    yield CommandResult::Affected(store.delete(&collection, &filter).await);
                }
                Command::DropCollection { collection } => {
                    yield CommandResult::Affected(store.drop_collection(&collection).await);
                }
                Command::DropNamespace => {
                    yield CommandResult::Affected(store.drop_all().await);
                }
            }
        }
        .map_err(|e: Error| {
            log::error!("{:#}", e);
            e
        })
    }
}

impl Connection for MemoryConnection {
    #[allow(refining_impl_trait)]
    async fn connect(url: Cow<'static, str>) -> Result<MemoryConnection> {
        let namespace = namespace_from_url(<Self::Driver as Driver>::NAME, &url)?;
        let store = store::open(&namespace)?;
        log::debug!("Connected to namespace `{}`", namespace);
        Ok(Self { namespace, store })
    }

    fn namespace(&self) -> &str {
        &self.namespace
    }
}
