// src/domain/core.rs
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::money::Amount;

pub type UserId = i64;
pub type WishId = i64;
pub type WishlistId = i64;
pub type OfferId = i64;

/// How an error surfaces at the HTTP boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    InvalidOperation,
    Conflict,
    Internal,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Errors {
    #[error("User not found: {0}")]
    UserNotFound(UserId),

    #[error("Wish not found: {0}")]
    WishNotFound(WishId),

    #[error("Offer not found")]
    OfferNotFound,

    #[error("You cannot contribute money to your own gifts")]
    OwnWish,

    #[error("Funds have already been collected for this gift.")]
    AlreadyFunded,

    #[error("The amount of collected funds cannot exceed the gift's price")]
    ExceedsPrice,

    #[error("{0}")]
    InvalidAmount(String),

    #[error("Wish {0} was modified concurrently, try again")]
    Conflict(WishId),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl Errors {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Errors::UserNotFound(_) | Errors::WishNotFound(_) | Errors::OfferNotFound => {
                ErrorKind::NotFound
            }
            Errors::OwnWish
            | Errors::AlreadyFunded
            | Errors::ExceedsPrice
            | Errors::InvalidAmount(_) => ErrorKind::InvalidOperation,
            Errors::Conflict(_) => ErrorKind::Conflict,
            Errors::Storage(_) => ErrorKind::Internal,
        }
    }
}

/// Compact view of a user, embedded in other entities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub id: UserId,
    pub username: String,
}

/// Compact view of a wish, embedded in offers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WishRef {
    pub id: WishId,
    pub name: String,
    pub price: Amount,
    pub raised: Amount,
}
