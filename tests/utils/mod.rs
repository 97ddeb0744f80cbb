#![allow(dead_code)]
use std::sync::Arc;

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};
use chrono::{DateTime, TimeZone, Utc};
use wishlist_offers::domain::{
    CreateOffer, Errors, OffersService, UserId, Wish, WishId, WishQuery, WishUpdate,
    WishesService,
};
use wishlist_offers::money::Amount;
use wishlist_offers::persistence::{InMemoryStore, Snapshot, UserRecord, WishRecord};
// See https://users.rust-lang.org/t/sharing-code-and-macros-in-tests-directory/3098/7

// Sample data for tests
pub fn owner_id() -> UserId {
    1
}

pub fn contributor_id() -> UserId {
    2
}

pub fn other_contributor_id() -> UserId {
    3
}

pub fn unknown_user_id() -> UserId {
    404
}

pub fn sample_wish_id() -> WishId {
    1
}

pub fn funded_wish_id() -> WishId {
    2
}

pub fn unknown_wish_id() -> WishId {
    404
}

pub fn sample_created_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2016, 1, 1, 8, 28, 0).unwrap()
}

pub fn units(value: i64) -> Amount {
    Amount::units(value).unwrap()
}

pub fn user(id: UserId, username: &str) -> UserRecord {
    UserRecord {
        id,
        username: username.to_string(),
        about: String::new(),
        wishlists: vec![id * 10],
    }
}

pub fn wish(id: WishId, owner_id: UserId, price: i64, raised: i64) -> WishRecord {
    WishRecord {
        id,
        name: format!("wish {}", id),
        price: units(price),
        raised: units(raised),
        owner_id,
        created_at: sample_created_at(),
        updated_at: sample_created_at(),
    }
}

/// Wish 1 costs 100 and has 40 raised, wish 2 costs 100 and is fully funded.
/// Both belong to user 1.
pub fn sample_snapshot() -> Snapshot {
    Snapshot {
        users: vec![
            user(owner_id(), "owner"),
            user(contributor_id(), "contributor"),
            user(other_contributor_id(), "other"),
        ],
        wishes: vec![
            wish(sample_wish_id(), owner_id(), 100, 40),
            wish(funded_wish_id(), owner_id(), 100, 100),
        ],
        offers: vec![],
    }
}

pub fn sample_store() -> Arc<InMemoryStore> {
    Arc::new(InMemoryStore::from_snapshot(sample_snapshot()))
}

pub fn service_for(store: &Arc<InMemoryStore>) -> OffersService {
    OffersService::new(store.clone(), store.clone(), store.clone())
}

pub fn contribution(amount: i64, item_id: WishId) -> CreateOffer {
    CreateOffer {
        amount: units(amount),
        item_id,
        hidden: false,
    }
}

/// Value for the `x-jwt-payload` header identifying `user_id`.
pub fn jwt_payload(user_id: UserId) -> String {
    let claims = format!(r#"{{"sub":"{}","name":"user {}"}}"#, user_id, user_id);
    general_purpose::STANDARD.encode(claims)
}

/// Wishes backed by `store`, where another contribution lands on the wish
/// right after it is read, moving its raised total to `competing`.
pub struct RacingWishes {
    pub store: Arc<InMemoryStore>,
    pub competing: Amount,
}

#[async_trait]
impl WishesService for RacingWishes {
    async fn find_one(&self, query: WishQuery) -> Result<Wish, Errors> {
        let id = query.id;
        let wish = WishesService::find_one(self.store.as_ref(), query).await?;
        self.store
            .update_one(id, WishUpdate::raised(self.competing))
            .await?;
        Ok(wish)
    }

    async fn update_one(&self, id: WishId, update: WishUpdate) -> Result<Wish, Errors> {
        self.store.update_one(id, update).await
    }
}

/// Wishes backed by `store` that hand control back to the runtime after
/// every read, so joined requests interleave.
pub struct YieldingWishes {
    pub store: Arc<InMemoryStore>,
}

#[async_trait]
impl WishesService for YieldingWishes {
    async fn find_one(&self, query: WishQuery) -> Result<Wish, Errors> {
        let wish = WishesService::find_one(self.store.as_ref(), query).await?;
        tokio::task::yield_now().await;
        Ok(wish)
    }

    async fn update_one(&self, id: WishId, update: WishUpdate) -> Result<Wish, Errors> {
        self.store.update_one(id, update).await
    }
}

pub fn racing_service(store: &Arc<InMemoryStore>, competing: i64) -> OffersService {
    let wishes = RacingWishes {
        store: store.clone(),
        competing: units(competing),
    };
    OffersService::new(store.clone(), Arc::new(wishes), store.clone())
}

pub fn yielding_service(store: &Arc<InMemoryStore>) -> OffersService {
    let wishes = YieldingWishes {
        store: store.clone(),
    };
    OffersService::new(store.clone(), Arc::new(wishes), store.clone())
}
