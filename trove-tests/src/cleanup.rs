use futures::lock::Mutex;
use std::sync::LazyLock;
use trove::{Connection, Document, Driver, Filter, Result};
use trove_schema::{WideBond, WideTrade};

static MUTEX: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

const NAMESPACE: &str = "cleanup";

/// Dropping a namespace succeeds whether it holds data or not, and connections to the
/// same namespace observe the same documents.
pub async fn cleanup_idempotence<D: Driver>(driver: &D) -> Result<()> {
    let _lock = MUTEX.lock().await;
    let url = driver.url_for(NAMESPACE);
    let mut connection = driver.connect(url.clone().into()).await?;
    assert_eq!(connection.namespace(), NAMESPACE);

    connection.drop_namespace().await?;
    connection.drop_namespace().await?;
    assert_eq!(WideTrade::count(&mut connection, Filter::All).await?, 0);

    WideBond {
        trade: WideTrade {
            trade_id: "T1".into(),
            trade_type: Some("Bond".into()),
        },
        bond_ccy: Some("AUD".into()),
    }
    .save(&mut connection)
    .await?;

    let mut other = driver.connect(url.into()).await?;
    assert_eq!(WideTrade::count(&mut other, Filter::All).await?, 1);
    other.drop_namespace().await?;
    assert_eq!(WideTrade::count(&mut connection, Filter::All).await?, 0);

    WideTrade::drop_collection(&mut connection).await?;
    connection.drop_namespace().await?;
    Ok(())
}
