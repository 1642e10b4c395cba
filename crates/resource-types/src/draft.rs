//! Editable draft of a resource and its normalization into a submit payload.

use serde::{Deserialize, Serialize};

use crate::error::DraftError;
use crate::resource::{Resource, TradeType};

/// Form inputs addressable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    Description,
    TradeType,
    Price,
    InReturn,
    Quantity,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::Title,
        Field::Description,
        Field::TradeType,
        Field::Price,
        Field::InReturn,
        Field::Quantity,
    ];

    /// Input `name` attribute.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::TradeType => "tradeType",
            Self::Price => "price",
            Self::InReturn => "inReturn",
            Self::Quantity => "quantity",
        }
    }
}

impl std::str::FromStr for Field {
    type Err = DraftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.name() == s)
            .ok_or_else(|| DraftError::UnknownField(s.to_string()))
    }
}

/// In-progress, unsaved resource data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub title: String,
    pub description: String,
    pub trade_type: TradeType,
    pub price: String,
    pub in_return: String,
    /// `None` when the input is empty or not an unsigned integer.
    pub quantity: Option<u32>,
    /// Set only by a successful image upload.
    pub image_url: String,
}

impl Default for Draft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            trade_type: TradeType::Monetary,
            price: String::new(),
            in_return: String::new(),
            quantity: Some(1),
            image_url: String::new(),
        }
    }
}

impl Draft {
    /// Seed a draft from a stored resource. Absent price/inReturn/img become "".
    pub fn from_resource(resource: &Resource) -> Self {
        Self {
            title: resource.title.clone(),
            description: resource.description.clone(),
            trade_type: resource.trade_type,
            price: resource.price.clone().unwrap_or_default(),
            in_return: resource.in_return.clone().unwrap_or_default(),
            quantity: resource.quantity,
            image_url: resource.img.clone().unwrap_or_default(),
        }
    }

    /// Copy of `self` with one field replaced. No validation beyond what the
    /// field's type can represent.
    pub fn with_field(&self, field: Field, value: &str) -> Result<Self, DraftError> {
        let mut next = self.clone();
        match field {
            Field::Title => next.title = value.to_string(),
            Field::Description => next.description = value.to_string(),
            Field::TradeType => next.trade_type = value.parse()?,
            Field::Price => next.price = value.to_string(),
            Field::InReturn => next.in_return = value.to_string(),
            Field::Quantity => next.quantity = value.trim().parse().ok(),
        }
        Ok(next)
    }

    pub fn with_image_url(&self, url: impl Into<String>) -> Self {
        Self {
            image_url: url.into(),
            ..self.clone()
        }
    }

    /// Current text of a form input.
    pub fn value_of(&self, field: Field) -> String {
        match field {
            Field::Title => self.title.clone(),
            Field::Description => self.description.clone(),
            Field::TradeType => self.trade_type.as_str().to_string(),
            Field::Price => self.price.clone(),
            Field::InReturn => self.in_return.clone(),
            Field::Quantity => self.quantity.map(|q| q.to_string()).unwrap_or_default(),
        }
    }

    /// Normalize into the body sent on create/update.
    ///
    /// Requires an image, a non-empty title and a non-zero quantity. Exactly
    /// one of `price`/`in_return` is kept, selected by the trade type.
    pub fn to_payload(&self, owner_email: &str) -> Result<ResourcePayload, DraftError> {
        let quantity = match self.quantity {
            Some(q) if q > 0 => q,
            _ => return Err(DraftError::MissingRequired),
        };
        if self.image_url.is_empty() || self.title.is_empty() {
            return Err(DraftError::MissingRequired);
        }

        let (price, in_return) = match self.trade_type {
            TradeType::Monetary => (Some(self.price.clone()), None),
            TradeType::Barter => (None, Some(self.in_return.clone())),
        };

        Ok(ResourcePayload {
            title: self.title.clone(),
            description: self.description.clone(),
            trade_type: self.trade_type,
            price,
            in_return,
            quantity,
            img: self.image_url.clone(),
            owner_email: owner_email.to_string(),
        })
    }
}

/// Body of the create and update requests. `null`s are sent explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourcePayload {
    pub title: String,
    pub description: String,
    pub trade_type: TradeType,
    pub price: Option<String>,
    pub in_return: Option<String>,
    pub quantity: u32,
    pub img: String,
    pub owner_email: String,
}
