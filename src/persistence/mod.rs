// src/persistence/mod.rs
pub mod json_file;
pub mod memory;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{OfferId, UserId, WishId, WishlistId};
use crate::money::Amount;

pub use self::memory::InMemoryStore;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to access data file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse data file: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: UserId,
    pub username: String,
    #[serde(default)]
    pub about: String,
    #[serde(default)]
    pub wishlists: Vec<WishlistId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishRecord {
    pub id: WishId,
    pub name: String,
    pub price: Amount,
    #[serde(default)]
    pub raised: Amount,
    pub owner_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferRecord {
    pub id: OfferId,
    pub amount: Amount,
    #[serde(default)]
    pub hidden: bool,
    pub user_id: UserId,
    pub item_id: WishId,
    pub created_at: DateTime<Utc>,
}

/// Everything the store holds, as written to and read from the data file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub users: Vec<UserRecord>,
    #[serde(default)]
    pub wishes: Vec<WishRecord>,
    #[serde(default)]
    pub offers: Vec<OfferRecord>,
}
