//! Wire types for the proxy-shopper REST endpoints.
//!
//! Shapes only; no business logic lives here. Prices and quantities stay as
//! JSON numbers (`f64`) at this layer and are converted to fixed-point by
//! the composer.
//!
//! Ids are integers, but some endpoints send them as numeric strings
//! (`"id": "42"`); both forms decode.

use serde::{Deserialize, Deserializer, Serialize};

/// Raw id as it appears on the wire.
#[derive(Deserialize)]
#[serde(untagged)]
enum WireId {
    Number(i64),
    Text(String),
}

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                match WireId::deserialize(deserializer)? {
                    WireId::Number(n) => Ok($name(n)),
                    WireId::Text(s) => s.trim().parse::<i64>().map($name).map_err(|_| {
                        serde::de::Error::custom(format!(
                            "{}: expected an integer id, got {s:?}",
                            stringify!($name)
                        ))
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse::<i64>().map($name)
            }
        }
    };
}

id_newtype!(ProductId);
id_newtype!(MarketId);
id_newtype!(ProxyOrderId);
id_newtype!(RequestId);

fn default_true() -> bool {
    true
}

/// `inStock: null` is treated like a missing field.
fn null_as_in_stock<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(true))
}

// ---------------------------------------------------------------------------
// GET /api/ProxyShopper/products/advanced-search
// ---------------------------------------------------------------------------

/// One row of an advanced-search response.
///
/// The backend is inconsistent about a few field names (`unitName` vs
/// `unit`, `storeName` vs `marketName`); both spellings decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductHit {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    #[serde(default, alias = "unitName")]
    pub unit: String,
    #[serde(default, alias = "marketName")]
    pub store_name: Option<String>,
    #[serde(default)]
    pub seller_reputation: Option<f64>,
    #[serde(default)]
    pub purchase_count: Option<i64>,
    /// Missing or null means in stock.
    #[serde(default = "default_true", deserialize_with = "null_as_in_stock")]
    pub in_stock: bool,
}

// ---------------------------------------------------------------------------
// GET /api/ProxyShopper/requests/{id}
// ---------------------------------------------------------------------------

/// A buyer's shopping request as seen by the proxy shopper.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingRequest {
    #[serde(default)]
    pub market_id: Option<MarketId>,
    #[serde(default)]
    pub market_name: Option<String>,
    #[serde(default)]
    pub proxy_order_id: Option<ProxyOrderId>,
    #[serde(default)]
    pub buyer_name: Option<String>,
    #[serde(default)]
    pub buyer_phone: Option<String>,
    #[serde(default)]
    pub delivery_address: Option<String>,
    #[serde(default)]
    pub items: Vec<RequestedItem>,
}

/// Free-form item line the buyer asked for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestedItem {
    pub name: String,
    #[serde(default)]
    pub quantity: Option<f64>,
    #[serde(default)]
    pub unit: Option<String>,
}

// ---------------------------------------------------------------------------
// POST /api/ProxyShopper/orders/{proxyOrderId}/proposal
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposalItem {
    pub id: ProductId,
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    /// Unit price.
    pub price: f64,
}

/// Proposal payload. `TotalProductPrice` is PascalCase on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalBody {
    pub items: Vec<ProposalItem>,
    #[serde(rename = "TotalProductPrice")]
    pub total_product_price: f64,
    pub proxy_fee: f64,
    pub note: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_id: Option<MarketId>,
}

/// 2xx response to a proposal submission.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProposalAck {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Error body the backend attaches to non-2xx responses (when it does).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}
