use trove::{
    Command, Context, Document, Error, Executor, Result, Schema, StoredDocument,
    is_same_or_derived,
    stream::{Stream, StreamExt},
};

/// Base trade record, swaps and bonds are stored in its collection.
#[derive(Document, Default, Debug, Clone, PartialEq)]
pub struct WideTrade {
    /// Unique trade identifier.
    #[trove(primary_key, max_length = 50)]
    pub trade_id: String,
    /// Trade type.
    #[trove(max_length = 50)]
    pub trade_type: Option<String>,
}

/// Swap with its two legs flattened into fixed position fields.
#[derive(Document, Default, Debug, Clone, PartialEq)]
pub struct WideSwap {
    #[trove(extends)]
    pub trade: WideTrade,
    /// Type of leg 1.
    #[trove(max_length = 50)]
    pub leg_type_1: Option<String>,
    /// Currency of leg 1.
    #[trove(max_length = 3)]
    pub leg_ccy_1: Option<String>,
    /// Type of leg 2.
    #[trove(max_length = 50)]
    pub leg_type_2: Option<String>,
    /// Currency of leg 2.
    #[trove(max_length = 3)]
    pub leg_ccy_2: Option<String>,
}

#[derive(Document, Default, Debug, Clone, PartialEq)]
pub struct WideBond {
    #[trove(extends)]
    pub trade: WideTrade,
    /// Bond currency.
    #[trove(max_length = 3)]
    pub bond_ccy: Option<String>,
}

/// Any concrete wide trade.
#[derive(Debug, Clone, PartialEq)]
pub enum WideRecord {
    Swap(WideSwap),
    Bond(WideBond),
}

impl WideRecord {
    pub fn trade(&self) -> &WideTrade {
        match self {
            WideRecord::Swap(v) => &v.trade,
            WideRecord::Bond(v) => &v.trade,
        }
    }

    /// Decode the stored document as the concrete type named by its `_cls` field.
    pub fn from_document(document: &StoredDocument) -> Result<Self> {
        let class = document.class_path().unwrap_or_default();
        let record = if is_same_or_derived(class, WideSwap::class_path()) {
            WideSwap::from_fields(&document.fields).map(WideRecord::Swap)
        } else if is_same_or_derived(class, WideBond::class_path()) {
            WideBond::from_fields(&document.fields).map(WideRecord::Bond)
        } else {
            Err(Error::msg("Expected a swap or a bond"))
        };
        record.with_context(|| format!("While decoding a document of `{}` as a wide record", class))
    }

    /// Every stored wide trade, each one decoded as its concrete type.
    pub fn objects<Exec: Executor>(executor: &mut Exec) -> impl Stream<Item = Result<Self>> + Send {
        executor
            .fetch(Command::Find {
                collection: WideTrade::collection().into(),
                filter: WideTrade::class_filter(),
                limit: None,
            })
            .map(|v| v.and_then(|document| Self::from_document(&document)))
    }

    /// Save as the concrete type, so that the stored class path is the derived one.
    pub async fn save<Exec: Executor>(&self, executor: &mut Exec) -> Result<()> {
        match self {
            WideRecord::Swap(v) => v.save(executor).await,
            WideRecord::Bond(v) => v.save(executor).await,
        }
    }
}

impl From<WideSwap> for WideRecord {
    fn from(value: WideSwap) -> Self {
        WideRecord::Swap(value)
    }
}

impl From<WideBond> for WideRecord {
    fn from(value: WideBond) -> Self {
        WideRecord::Bond(value)
    }
}
