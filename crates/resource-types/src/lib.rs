//! Shared types and pure-logic utilities for resource listings.
//! No HTTP or UI dependency — usable by any frontend or tool.

mod draft;
mod error;
mod lenient;
mod resource;

pub use draft::{Draft, Field, ResourcePayload};
pub use error::DraftError;
pub use resource::{CurrencyUnit, Resource, TradeType};
