use futures::{TryStreamExt, lock::Mutex};
use std::sync::LazyLock;
use trove::{Connection, Document, Driver, Filter, Result};
use trove_schema::{DeepLeg, DeepSwap, DeepSwapKey};

static MUTEX: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

/// CRUD scenario over the deep schema, where legs are embedded documents.
pub struct DeepCrud<D: Driver> {
    driver: D,
}

impl<D: Driver> DeepCrud<D> {
    pub const NAMESPACE: &'static str = "deep";
    pub const CCY_LIST: [&'static str; 5] = ["USD", "GBP", "JPY", "NOK", "AUD"];

    pub fn new(driver: D) -> Self {
        Self { driver }
    }

    pub async fn connect(&self) -> Result<D::Connection> {
        self.driver
            .connect(self.driver.url_for(Self::NAMESPACE).into())
            .await
    }

    pub async fn clean_up(&self, connection: &mut D::Connection) -> Result<()> {
        connection.drop_namespace().await
    }

    /// Swaps with a fixed leg followed by a floating one. Nothing is written to the store.
    pub fn create_records(&self) -> Vec<DeepSwap> {
        let ccy_count = Self::CCY_LIST.len();
        (0..3)
            .map(|i| DeepSwap {
                key: DeepSwapKey {
                    trade_id: format!("T{}", i + 1),
                },
                trade_type: Some("Swap".into()),
                legs: vec![
                    DeepLeg {
                        leg_type: Some("Fixed".into()),
                        leg_ccy: Some(Self::CCY_LIST[i % ccy_count].into()),
                    },
                    DeepLeg {
                        leg_type: Some("Floating".into()),
                        leg_ccy: Some("EUR".into()),
                    },
                ],
            })
            .collect()
    }

    pub async fn test_crud(&self) -> Result<()> {
        let _lock = MUTEX.lock().await;
        let mut connection = self.connect().await?;

        // Cleanup
        self.clean_up(&mut connection).await?;

        let records = self.create_records();
        let affected = DeepSwap::save_many(&mut connection, &records).await?;
        assert_eq!(affected.documents_affected, records.len() as u64);

        // Legs come back in the order they were saved
        let swaps: Vec<DeepSwap> = DeepSwap::objects(&mut connection).try_collect().await?;
        log::info!(
            "Deep swaps: {}",
            swaps
                .iter()
                .map(|v| v.key.trade_id.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
        assert_eq!(swaps, records);
        let swap = DeepSwap::find_pk(&mut connection, "T2")
            .await?
            .expect("Swap T2 must be found");
        assert_eq!(
            swap.legs
                .iter()
                .map(|v| (v.leg_type.as_deref(), v.leg_ccy.as_deref()))
                .collect::<Vec<_>>(),
            [(Some("Fixed"), Some("GBP")), (Some("Floating"), Some("EUR"))]
        );

        // Reordering the legs is persisted
        let mut reversed = swap.clone();
        reversed.legs.reverse();
        reversed.save(&mut connection).await?;
        let found = DeepSwap::find_one(&mut connection, Filter::eq("trade_id", "T2"))
            .await?
            .expect("Swap T2 must be found");
        assert_eq!(found.legs[0].leg_type.as_deref(), Some("Floating"));
        assert_eq!(found, reversed);

        // An invalid leg stops the whole batch before anything is written
        let mut invalid = self.create_records();
        invalid[0].key.trade_id = "T4".into();
        invalid[2].legs[0].leg_ccy = Some("EURO".into());
        assert!(
            DeepSwap::save_many(&mut connection, &invalid)
                .await
                .is_err()
        );
        assert_eq!(DeepSwap::find_pk(&mut connection, "T4").await?, None);

        let deleted = DeepSwap::delete_many(&mut connection, Filter::All).await?;
        assert_eq!(deleted.documents_affected, 3);

        // Cleanup
        self.clean_up(&mut connection).await?;
        Ok(())
    }
}
