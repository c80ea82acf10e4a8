use trove::Document;

/// Swap leg, stored as a sub-document of [`DeepSwap`].
#[derive(Document, Default, Debug, Clone, PartialEq)]
#[trove(embedded)]
pub struct DeepLeg {
    /// Leg type, for example `Fixed` or `Floating`.
    #[trove(max_length = 50)]
    pub leg_type: Option<String>,
    /// Leg currency.
    #[trove(max_length = 3)]
    pub leg_ccy: Option<String>,
}

/// Primary key attributes of [`DeepSwap`].
#[derive(Document, Default, Debug, Clone, PartialEq)]
#[trove(mixin)]
pub struct DeepSwapKey {
    /// Unique trade identifier.
    #[trove(primary_key, max_length = 50)]
    pub trade_id: String,
}

/// Swap with its legs nested as embedded documents, order preserved.
#[derive(Document, Default, Debug, Clone, PartialEq)]
pub struct DeepSwap {
    #[trove(flatten)]
    pub key: DeepSwapKey,
    /// Trade type.
    #[trove(max_length = 50)]
    pub trade_type: Option<String>,
    /// List of swap legs.
    pub legs: Vec<DeepLeg>,
}
