// src/domain/offers.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Amount;
use super::core::{Errors, OfferId, UserId, UserRef, WishId, WishRef};
use super::users::User;
use super::wishes::Wish;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OfferRelation {
    User,
    Item,
}

/// One user's contribution toward one wish.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    pub id: OfferId,
    pub amount: Amount,
    pub hidden: bool,
    #[serde(skip_serializing)]
    pub user_id: UserId,
    #[serde(skip_serializing)]
    pub item_id: WishId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<WishRef>,
    pub created_at: DateTime<Utc>,
}

/// The contribution a user asks to make.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateOffer {
    pub amount: Amount,
    pub item_id: WishId,
    pub hidden: bool,
}

/// An offer that has passed validation and is ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOffer {
    pub amount: Amount,
    pub hidden: bool,
    pub user: UserRef,
    pub item: WishRef,
}

/// Criteria for looking up offers. Unset criteria match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OfferQuery {
    pub id: Option<OfferId>,
    pub user_id: Option<UserId>,
    pub item_id: Option<WishId>,
    pub relations: Vec<OfferRelation>,
}

impl OfferQuery {
    pub fn all() -> Self {
        OfferQuery::default()
    }

    pub fn by_id(id: OfferId) -> Self {
        OfferQuery {
            id: Some(id),
            ..OfferQuery::default()
        }
    }

    pub fn by_user(user_id: UserId) -> Self {
        OfferQuery {
            user_id: Some(user_id),
            ..OfferQuery::default()
        }
    }

    pub fn by_item(item_id: WishId) -> Self {
        OfferQuery {
            item_id: Some(item_id),
            ..OfferQuery::default()
        }
    }

    pub fn with(mut self, relation: OfferRelation) -> Self {
        if !self.relations.contains(&relation) {
            self.relations.push(relation);
        }
        self
    }

    pub fn loads(&self, relation: OfferRelation) -> bool {
        self.relations.contains(&relation)
    }

    pub fn matches(&self, id: OfferId, user_id: UserId, item_id: WishId) -> bool {
        self.id.map_or(true, |v| v == id)
            && self.user_id.map_or(true, |v| v == user_id)
            && self.item_id.map_or(true, |v| v == item_id)
    }
}

/// Checks a contribution against the wish and returns the wish's new
/// `raised` total.
pub fn validate_contribution(user: &User, wish: &Wish, amount: Amount) -> Result<Amount, Errors> {
    if user.id == wish.owner_id {
        return Err(Errors::OwnWish);
    }

    if wish.is_funded() {
        return Err(Errors::AlreadyFunded);
    }

    if amount.is_zero() {
        return Err(Errors::InvalidAmount("Amount must be positive".to_string()));
    }

    let new_raised = (wish.raised + amount).map_err(|_| Errors::ExceedsPrice)?;
    if new_raised > wish.price {
        return Err(Errors::ExceedsPrice);
    }

    Ok(new_raised)
}
