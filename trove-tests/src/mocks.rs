use futures::{TryStreamExt, lock::Mutex};
use std::sync::LazyLock;
use time::macros::date;
use trove::{Connection, Document, Driver, Filter, Result};
use trove_schema::{DerivedRecordMock, SimpleDataMock, SimpleRecordMock};

static MUTEX: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

const NAMESPACE: &str = "mocks";

/// Persist and reload the mock records, every declared field must survive unchanged:
/// inherited, derived and nested ones, set or unset.
pub async fn mock_round_trip<D: Driver>(driver: &D) -> Result<()> {
    let _lock = MUTEX.lock().await;
    let mut connection = driver.connect(driver.url_for(NAMESPACE).into()).await?;
    connection.drop_namespace().await?;

    let simple = SimpleRecordMock {
        simple_id: "A".into(),
        string_element: Some("abc".into()),
        int_element: Some(123),
        long_element: Some(-(1 << 40)),
        bool_element: Some(true),
    };
    let derived = DerivedRecordMock {
        base: SimpleRecordMock {
            simple_id: "B".into(),
            string_element: Some("Ünïcödé \"quoted\"\n".into()),
            int_element: None,
            long_element: Some(0),
            bool_element: Some(false),
        },
        float_element: Some(100.0001),
        date_element: Some(date!(2003 - 05 - 01)),
        data_element: Some(SimpleDataMock {
            string_element: Some("nested".into()),
            int_element: Some(-7),
        }),
    };
    let empty = DerivedRecordMock {
        base: SimpleRecordMock {
            simple_id: "C".into(),
            ..Default::default()
        },
        ..Default::default()
    };
    simple.save(&mut connection).await?;
    derived.save(&mut connection).await?;
    empty.save(&mut connection).await?;

    // Derived records
    assert_eq!(
        DerivedRecordMock::find_pk(&mut connection, "B").await?,
        Some(derived.clone())
    );
    assert_eq!(
        DerivedRecordMock::find_pk(&mut connection, "C").await?,
        Some(empty.clone())
    );
    assert_eq!(DerivedRecordMock::find_pk(&mut connection, "A").await?, None);

    // Querying the base returns every record, derived ones projected on the base fields
    let records: Vec<SimpleRecordMock> = SimpleRecordMock::objects(&mut connection)
        .try_collect()
        .await?;
    assert_eq!(records, [simple, derived.base.clone(), empty.base.clone()]);

    let found = DerivedRecordMock::find_many(
        &mut connection,
        Filter::eq("bool_element", false).or(Filter::eq("simple_id", "C")),
        None,
    )
    .try_collect::<Vec<_>>()
    .await?;
    assert_eq!(found, [derived, empty]);

    connection.drop_namespace().await?;
    Ok(())
}
