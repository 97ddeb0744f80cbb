// src/domain/users.rs
use serde::{Deserialize, Serialize};

use super::core::{OfferId, UserId, UserRef, WishId, WishlistId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRelation {
    Wishes,
    Wishlists,
    Offers,
}

/// A user as seen by the offers service. Associations are `None` unless
/// they were requested when the user was looked up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    #[serde(default)]
    pub about: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wishes: Option<Vec<WishId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wishlists: Option<Vec<WishlistId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offers: Option<Vec<OfferId>>,
}

impl User {
    pub fn to_ref(&self) -> UserRef {
        UserRef {
            id: self.id,
            username: self.username.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserQuery {
    pub id: UserId,
    pub relations: Vec<UserRelation>,
}

impl UserQuery {
    pub fn by_id(id: UserId) -> Self {
        UserQuery {
            id,
            relations: Vec::new(),
        }
    }

    pub fn with(mut self, relation: UserRelation) -> Self {
        if !self.relations.contains(&relation) {
            self.relations.push(relation);
        }
        self
    }

    pub fn loads(&self, relation: UserRelation) -> bool {
        self.relations.contains(&relation)
    }
}
