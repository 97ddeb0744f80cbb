// src/domain/wishes.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Amount;
use super::core::{OfferId, UserId, UserRef, WishId, WishRef};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WishRelation {
    Owner,
    Offers,
}

/// A gift somebody wants. `raised` tracks the contributions collected so far
/// and never exceeds `price`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Wish {
    pub id: WishId,
    pub name: String,
    pub price: Amount,
    pub raised: Amount,
    pub owner_id: UserId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<UserRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offers: Option<Vec<OfferId>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Wish {
    pub fn to_ref(&self) -> WishRef {
        WishRef {
            id: self.id,
            name: self.name.clone(),
            price: self.price,
            raised: self.raised,
        }
    }

    pub fn is_funded(&self) -> bool {
        self.raised == self.price
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WishQuery {
    pub id: WishId,
    pub relations: Vec<WishRelation>,
}

impl WishQuery {
    pub fn by_id(id: WishId) -> Self {
        WishQuery {
            id,
            relations: Vec::new(),
        }
    }

    pub fn with(mut self, relation: WishRelation) -> Self {
        if !self.relations.contains(&relation) {
            self.relations.push(relation);
        }
        self
    }

    pub fn loads(&self, relation: WishRelation) -> bool {
        self.relations.contains(&relation)
    }
}

/// Partial update of a wish. Fields left as `None` are untouched.
///
/// `expected_raised` is a precondition: when set, the update only applies if
/// the stored `raised` still equals it, otherwise the store reports
/// `Errors::Conflict`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WishUpdate {
    pub raised: Option<Amount>,
    pub expected_raised: Option<Amount>,
}

impl WishUpdate {
    pub fn raised(raised: Amount) -> Self {
        WishUpdate {
            raised: Some(raised),
            expected_raised: None,
        }
    }

    pub fn if_raised(mut self, expected: Amount) -> Self {
        self.expected_raised = Some(expected);
        self
    }
}
