// src/domain/ports.rs
use async_trait::async_trait;

use super::core::{Errors, WishId};
use super::offers::{NewOffer, Offer, OfferQuery};
use super::users::{User, UserQuery};
use super::wishes::{Wish, WishQuery, WishUpdate};

/// Lookup of users. Owned by the users side of the application.
#[async_trait]
pub trait UsersService: Send + Sync {
    /// Fails with `Errors::UserNotFound` when no user has the queried id.
    async fn find_one(&self, query: UserQuery) -> Result<User, Errors>;
}

/// Lookup and partial update of wishes.
#[async_trait]
pub trait WishesService: Send + Sync {
    /// Fails with `Errors::WishNotFound` when no wish has the queried id.
    async fn find_one(&self, query: WishQuery) -> Result<Wish, Errors>;

    /// Applies `update` and returns the wish as stored afterwards.
    async fn update_one(&self, id: WishId, update: WishUpdate) -> Result<Wish, Errors>;
}

/// Storage of offers.
#[async_trait]
pub trait OffersRepository: Send + Sync {
    async fn save(&self, offer: NewOffer) -> Result<Offer, Errors>;

    /// Matching offers ordered by id, with the query's relations populated.
    async fn find(&self, query: OfferQuery) -> Result<Vec<Offer>, Errors>;
}
