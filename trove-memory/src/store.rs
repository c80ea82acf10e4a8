use std::{
    collections::{BTreeMap, HashMap},
    sync::{Arc, LazyLock, Mutex},
};
use tokio::sync::RwLock;
use trove_core::{DocumentsAffected, Error, Fields, Filter, ID_FIELD, Result};

static NAMESPACES: LazyLock<Mutex<HashMap<String, Arc<Namespace>>>> =
    LazyLock::new(Default::default);

/// Collections of a namespace, each one holding its documents in insertion order.
#[derive(Default, Debug)]
pub(crate) struct Namespace {
    collections: RwLock<BTreeMap<String, Vec<Fields>>>,
}

/// Shared handle over the namespace, created on first use and alive for the whole process.
///
/// Entries are never removed from the registry, `drop_namespace` only empties them.
pub(crate) fn open(name: &str) -> Result<Arc<Namespace>> {
    let mut namespaces = NAMESPACES
        .lock()
        .map_err(|_| Error::msg("The namespace registry is poisoned"))?;
    Ok(namespaces.entry(name.to_string()).or_default().clone())
}

impl Namespace {
    pub(crate) async fn upsert(&self, collection: &str, document: Fields) -> Result<DocumentsAffected> {
        let Some(id) = document.get(ID_FIELD).filter(|v| !v.is_null()).cloned() else {
            return Err(Error::msg(format!(
                "Cannot store a document without `{}` in collection `{}`",
                ID_FIELD, collection
            )));
        };
        let mut collections = self.collections.write().await;
        let documents = collections.entry(collection.to_string()).or_default();
        match documents
            .iter_mut()
            .find(|v| v.get(ID_FIELD).is_some_and(|v| *v == id))
        {
            Some(stored) => *stored = document,
            None => documents.push(document),
        }
        Ok(DocumentsAffected::new(1))
    }

    pub(crate) async fn find(
        &self,
        collection: &str,
        filter: &Filter,
        limit: Option<u32>,
    ) -> Vec<Fields> {
        let collections = self.collections.read().await;
        let Some(documents) = collections.get(collection) else {
            return Vec::new();
        };
        documents
            .iter()
            .filter(|v| filter.matches(v))
            .take(limit.map_or(usize::MAX, |v| v as usize))
            .cloned()
            .collect()
    }

    pub(crate) async fn delete(&self, collection: &str, filter: &Filter) -> DocumentsAffected {
        let mut collections = self.collections.write().await;
        let Some(documents) = collections.get_mut(collection) else {
            return DocumentsAffected::default();
        };
        let before = documents.len();
        documents.retain(|v| !filter.matches(v));
        DocumentsAffected::new((before - documents.len()) as u64)
    }

    pub(crate) async fn drop_collection(&self, collection: &str) -> DocumentsAffected {
        let removed = self.collections.write().await.remove(collection);
        DocumentsAffected::new(removed.map_or(0, |v| v.len() as u64))
    }

    pub(crate) async fn drop_all(&self) -> DocumentsAffected {
        let mut collections = self.collections.write().await;
        let removed = collections.values().map(|v| v.len() as u64).sum();
        collections.clear();
        DocumentsAffected::new(removed)
    }

    pub(crate) async fn collection_names(&self) -> Vec<String> {
        self.collections.read().await.keys().cloned().collect()
    }
}
