#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use trove::{
        Command, Connection, Driver, Executor, Fields, Filter, ID_FIELD, StoredDocument, Value,
        stream::TryStreamExt,
    };
    use trove_memory::{MemoryConnection, MemoryDriver};
    use trove_tests::{execute_tests, init_logs, silent_logs};

    static MUTEX: Mutex<()> = Mutex::new(());

    #[tokio::test]
    async fn memory() {
        init_logs();
        let _guard = MUTEX.lock().unwrap();
        execute_tests(MemoryDriver::new()).await;
    }

    #[tokio::test]
    async fn wrong_url() {
        silent_logs! {
            assert!(MemoryConnection::connect("sqlite://some_value".into()).await.is_err());
            assert!(MemoryConnection::connect("memory://".into()).await.is_err());
            assert!(MemoryConnection::connect("not a url".into()).await.is_err());
        };
    }

    #[tokio::test]
    async fn namespace_url() {
        let driver = MemoryDriver::new();
        let url = driver.url_for("trading desk");
        assert_eq!(url, "memory://trading%20desk");
        let connection = driver
            .connect(url.into())
            .await
            .expect("Could not connect");
        assert_eq!(connection.namespace(), "trading desk");
    }

    #[tokio::test]
    async fn commands() {
        init_logs();
        let mut connection = MemoryConnection::connect("memory://commands".into())
            .await
            .expect("Could not connect");
        connection
            .drop_namespace()
            .await
            .expect("Could not drop the namespace");
        let document = |id: i64, name: &str| {
            Fields::from_iter([
                (ID_FIELD, Value::Int64(Some(id))),
                ("name", Value::Varchar(Some(name.into()))),
            ])
        };
        for (id, name) in [(1, "alpha"), (2, "bravo"), (3, "charlie"), (1, "delta")] {
            let result = connection
                .execute(Command::Upsert {
                    collection: "items".into(),
                    document: document(id, name),
                })
                .await
                .expect("Could not upsert");
            assert_eq!(result.documents_affected, 1);
        }
        assert_eq!(connection.collections().await, ["items"]);

        let names = |documents: Vec<StoredDocument>| {
            documents
                .into_iter()
                .map(|v| match v.fields.get("name") {
                    Some(Value::Varchar(Some(v))) => v.clone(),
                    _ => String::new(),
                })
                .collect::<Vec<_>>()
        };
        let found = connection
            .fetch(Command::Find {
                collection: "items".into(),
                filter: Filter::All,
                limit: None,
            })
            .try_collect::<Vec<_>>()
            .await
            .expect("Could not find");
        assert_eq!(names(found), ["delta", "bravo", "charlie"]);

        let found = connection
            .fetch(Command::Find {
                collection: "items".into(),
                filter: Filter::eq("name", "alpha").negate(),
                limit: Some(1),
            })
            .try_collect::<Vec<_>>()
            .await
            .expect("Could not find");
        assert_eq!(names(found), ["delta"]);

        let result = connection
            .execute(Command::Delete {
                collection: "items".into(),
                filter: Filter::eq(ID_FIELD, 2i64),
            })
            .await
            .expect("Could not delete");
        assert_eq!(result.documents_affected, 1);

        silent_logs! {
            assert!(
                connection
                    .execute(Command::Upsert {
                        collection: "items".into(),
                        document: Fields::from_iter([("name", Value::Varchar(Some("x".into())))]),
                    })
                    .await
                    .is_err(),
                "A document without identity cannot be stored"
            );
        };

        let result = connection
            .execute(Command::DropCollection {
                collection: "items".into(),
            })
            .await
            .expect("Could not drop the collection");
        assert_eq!(result.documents_affected, 2);
        assert!(connection.collections().await.is_empty());
    }

    #[tokio::test]
    async fn shared_namespace() {
        let driver = MemoryDriver::new();
        let url = driver.url_for("shared");
        let mut first = driver
            .connect(url.clone().into())
            .await
            .expect("Could not connect");
        first
            .drop_namespace()
            .await
            .expect("Could not drop the namespace");
        first
            .execute(Command::Upsert {
                collection: "items".into(),
                document: Fields::from_iter([(ID_FIELD, Value::Int64(Some(1)))]),
            })
            .await
            .expect("Could not upsert");

        // Connections to the same namespace see the same documents
        let mut second = driver
            .connect(url.clone().into())
            .await
            .expect("Could not connect");
        assert_eq!(second.collections().await, ["items"]);

        // Dropping empties the namespace, which stays usable
        let result = second
            .execute(Command::DropNamespace)
            .await
            .expect("Could not drop the namespace");
        assert_eq!(result.documents_affected, 1);
        assert!(first.collections().await.is_empty());
        let third = driver.connect(url.into()).await.expect("Could not connect");
        assert!(third.collections().await.is_empty());
    }
}
