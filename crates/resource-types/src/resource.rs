//! Stored resource listing and its enums.

use serde::{Deserialize, Serialize};

use crate::error::DraftError;
use crate::lenient;

/// How a resource is exchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TradeType {
    #[default]
    #[serde(rename = "Monetary Trade")]
    Monetary,
    #[serde(rename = "Trade for Items")]
    Barter,
}

impl TradeType {
    pub const ALL: [TradeType; 2] = [TradeType::Monetary, TradeType::Barter];

    /// Label used on the wire and in the trade type select.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monetary => "Monetary Trade",
            Self::Barter => "Trade for Items",
        }
    }
}

impl std::fmt::Display for TradeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TradeType {
    type Err = DraftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| DraftError::InvalidTradeType(s.to_string()))
    }
}

/// Unit shown next to the price input. UI-only; never sent to the backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CurrencyUnit {
    Wei,
    #[default]
    Eth,
}

impl CurrencyUnit {
    /// Picker order.
    pub const ALL: [CurrencyUnit; 2] = [CurrencyUnit::Wei, CurrencyUnit::Eth];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Wei => "Wei",
            Self::Eth => "Eth",
        }
    }
}

impl std::fmt::Display for CurrencyUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resource as stored by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub description: String,
    #[serde(default)]
    pub trade_type: TradeType,
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub price: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub in_return: Option<String>,
    #[serde(default, deserialize_with = "lenient::quantity")]
    pub quantity: Option<u32>,
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub img: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub owner_email: Option<String>,
}
