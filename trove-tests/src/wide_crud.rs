use futures::{TryStreamExt, lock::Mutex};
use std::{collections::HashSet, sync::LazyLock};
use trove::{Connection, Document, Driver, Filter, Result};
use trove_schema::{WideBond, WideRecord, WideSwap, WideTrade};

static MUTEX: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

/// CRUD scenario over the wide schema, where leg attributes are numbered fields.
pub struct WideCrud<D: Driver> {
    driver: D,
}

impl<D: Driver> WideCrud<D> {
    /// One namespace per scenario.
    pub const NAMESPACE: &'static str = "wide";
    /// Currencies populating the records.
    pub const CCY_LIST: [&'static str; 5] = ["USD", "GBP", "JPY", "NOK", "AUD"];

    pub fn new(driver: D) -> Self {
        Self { driver }
    }

    pub async fn connect(&self) -> Result<D::Connection> {
        self.driver
            .connect(self.driver.url_for(Self::NAMESPACE).into())
            .await
    }

    /// Drop the namespace, before and after the scenario.
    pub async fn clean_up(&self, connection: &mut D::Connection) -> Result<()> {
        connection.drop_namespace().await
    }

    /// Two swaps followed by one bond. Nothing is written to the store.
    pub fn create_records(&self) -> Vec<WideRecord> {
        let ccy_count = Self::CCY_LIST.len();
        let swaps = (0..2).map(|i| {
            WideRecord::Swap(WideSwap {
                trade: WideTrade {
                    trade_id: format!("T{}", i + 1),
                    trade_type: Some("Swap".into()),
                },
                leg_type_1: Some("Fixed".into()),
                leg_ccy_1: Some(Self::CCY_LIST[i % ccy_count].into()),
                leg_type_2: Some("Floating".into()),
                leg_ccy_2: Some("EUR".into()),
            })
        });
        let bonds = (2..3).map(|i| {
            WideRecord::Bond(WideBond {
                trade: WideTrade {
                    trade_id: format!("T{}", i + 1),
                    trade_type: Some("Bond".into()),
                },
                bond_ccy: Some(Self::CCY_LIST[i % ccy_count].into()),
            })
        });
        swaps.chain(bonds).collect()
    }

    pub async fn test_crud(&self) -> Result<()> {
        let _lock = MUTEX.lock().await;
        let mut connection = self.connect().await?;

        // Cleanup
        self.clean_up(&mut connection).await?;

        let records = self.create_records();
        let ids = records
            .iter()
            .map(|v| v.trade().trade_id.as_str())
            .collect::<HashSet<_>>();
        assert_eq!(ids.len(), records.len(), "Trade ids must be unique");

        // TODO: save in bulk once drivers expose a batch upsert command
        for record in &records {
            record.save(&mut connection).await?;
        }

        // Every trade
        let trades: Vec<WideTrade> = WideTrade::objects(&mut connection).try_collect().await?;
        log::info!(
            "All trades: {}",
            trades
                .iter()
                .map(|v| v.trade_id.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
        assert_eq!(trades.len(), 3);
        assert_eq!(
            trades.iter().map(|v| v.trade_id.as_str()).collect::<Vec<_>>(),
            ["T1", "T2", "T3"]
        );
        assert_eq!(trades[2].trade_type.as_deref(), Some("Bond"));

        // Every trade as its concrete type
        let concrete: Vec<WideRecord> = WideRecord::objects(&mut connection).try_collect().await?;
        assert_eq!(concrete, records);
        assert!(matches!(
            concrete.as_slice(),
            [WideRecord::Swap(..), WideRecord::Swap(..), WideRecord::Bond(..)]
        ));

        // Swaps only
        let swaps: Vec<WideSwap> = WideSwap::objects(&mut connection).try_collect().await?;
        log::info!(
            "Swaps only: {}",
            swaps
                .iter()
                .map(|v| v.trade.trade_id.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
        assert_eq!(swaps.len(), 2);
        let legs = swaps
            .iter()
            .map(|v| {
                (
                    v.trade.trade_id.as_str(),
                    v.leg_ccy_1.as_deref(),
                    v.leg_ccy_2.as_deref(),
                )
            })
            .collect::<Vec<_>>();
        assert_eq!(
            legs,
            [
                ("T1", Some("USD"), Some("EUR")),
                ("T2", Some("GBP"), Some("EUR"))
            ]
        );
        assert!(
            swaps
                .iter()
                .all(|v| v.leg_type_1.as_deref() == Some("Fixed")
                    && v.leg_type_2.as_deref() == Some("Floating"))
        );

        // Bonds only
        let bonds: Vec<WideBond> = WideBond::objects(&mut connection).try_collect().await?;
        assert_eq!(bonds.len(), 1);
        assert_eq!(bonds[0].trade.trade_id, "T3");
        assert_eq!(bonds[0].bond_ccy.as_deref(), Some("JPY"));

        // Lookup by primary key honors the queried type
        let WideRecord::Swap(first) = &records[0] else {
            panic!("The first record is expected to be a swap");
        };
        let swap = WideSwap::find_pk(&mut connection, "T1").await?;
        assert_eq!(swap.as_ref(), Some(first));
        assert_eq!(WideSwap::find_pk(&mut connection, "T3").await?, None);
        let trade = WideTrade::find_pk(&mut connection, "T3")
            .await?
            .expect("The bond must be found as a trade");
        assert_eq!(&trade, records[2].trade());

        // Saving again replaces the stored document
        let mut updated = bonds[0].clone();
        updated.bond_ccy = Some("NOK".into());
        updated.save(&mut connection).await?;
        assert_eq!(WideTrade::count(&mut connection, Filter::All).await?, 3);
        assert_eq!(
            WideBond::find_pk(&mut connection, "T3")
                .await?
                .and_then(|v| v.bond_ccy),
            Some("NOK".into())
        );
        assert_eq!(
            WideTrade::count(&mut connection, Filter::eq("trade_type", "Swap")).await?,
            2
        );

        // Delete one swap
        swaps[1].delete(&mut connection).await?;
        assert_eq!(WideSwap::count(&mut connection, Filter::All).await?, 1);
        assert_eq!(WideTrade::count(&mut connection, Filter::All).await?, 2);

        // Cleanup
        self.clean_up(&mut connection).await?;
        assert_eq!(WideTrade::count(&mut connection, Filter::All).await?, 0);
        Ok(())
    }
}
