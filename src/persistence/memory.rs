//! In-memory implementation of the users, wishes and offers ports.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;

use super::{OfferRecord, Snapshot, UserRecord, WishRecord};
use crate::domain::{
    Errors, NewOffer, Offer, OfferId, OfferQuery, OfferRelation, OffersRepository, User,
    UserId, UserQuery, UserRef, UserRelation, UsersService, Wish, WishId, WishQuery, WishRef,
    WishRelation, WishUpdate, WishesService,
};

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<UserId, UserRecord>,
    wishes: BTreeMap<WishId, WishRecord>,
    offers: BTreeMap<OfferId, OfferRecord>,
    last_offer_id: OfferId,
}

impl Tables {
    fn user_ref(&self, id: UserId) -> Option<UserRef> {
        self.users.get(&id).map(|u| UserRef {
            id: u.id,
            username: u.username.clone(),
        })
    }

    fn wish_ref(&self, id: WishId) -> Option<WishRef> {
        self.wishes.get(&id).map(|w| WishRef {
            id: w.id,
            name: w.name.clone(),
            price: w.price,
            raised: w.raised,
        })
    }

    fn load_user(&self, record: &UserRecord, query: &UserQuery) -> User {
        let wishes = query.loads(UserRelation::Wishes).then(|| {
            self.wishes
                .values()
                .filter(|w| w.owner_id == record.id)
                .map(|w| w.id)
                .collect()
        });
        let offers = query.loads(UserRelation::Offers).then(|| {
            self.offers
                .values()
                .filter(|o| o.user_id == record.id)
                .map(|o| o.id)
                .collect()
        });

        User {
            id: record.id,
            username: record.username.clone(),
            about: record.about.clone(),
            wishes,
            wishlists: query
                .loads(UserRelation::Wishlists)
                .then(|| record.wishlists.clone()),
            offers,
        }
    }

    fn load_wish(&self, record: &WishRecord, query: &WishQuery) -> Wish {
        let owner = if query.loads(WishRelation::Owner) {
            self.user_ref(record.owner_id)
        } else {
            None
        };
        let offers = query.loads(WishRelation::Offers).then(|| {
            self.offers
                .values()
                .filter(|o| o.item_id == record.id)
                .map(|o| o.id)
                .collect()
        });

        Wish {
            id: record.id,
            name: record.name.clone(),
            price: record.price,
            raised: record.raised,
            owner_id: record.owner_id,
            owner,
            offers,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }

    fn load_offer(&self, record: &OfferRecord, query: &OfferQuery) -> Offer {
        let user = if query.loads(OfferRelation::User) {
            self.user_ref(record.user_id)
        } else {
            None
        };
        let item = if query.loads(OfferRelation::Item) {
            self.wish_ref(record.item_id)
        } else {
            None
        };

        Offer {
            id: record.id,
            amount: record.amount,
            hidden: record.hidden,
            user_id: record.user_id,
            item_id: record.item_id,
            user,
            item,
            created_at: record.created_at,
        }
    }
}

/// Users, wishes and offers kept in process memory behind one lock.
#[derive(Debug)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        InMemoryStore::from_snapshot(Snapshot::default())
    }

    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let last_offer_id = snapshot.offers.iter().map(|o| o.id).max().unwrap_or(0);
        let tables = Tables {
            users: snapshot.users.into_iter().map(|u| (u.id, u)).collect(),
            wishes: snapshot.wishes.into_iter().map(|w| (w.id, w)).collect(),
            offers: snapshot.offers.into_iter().map(|o| (o.id, o)).collect(),
            last_offer_id,
        };
        InMemoryStore {
            tables: Mutex::new(tables),
        }
    }

    pub fn snapshot(&self) -> Result<Snapshot, Errors> {
        let tables = self.lock()?;
        Ok(Snapshot {
            users: tables.users.values().cloned().collect(),
            wishes: tables.wishes.values().cloned().collect(),
            offers: tables.offers.values().cloned().collect(),
        })
    }

    pub fn insert_user(&self, user: UserRecord) -> Result<(), Errors> {
        self.lock()?.users.insert(user.id, user);
        Ok(())
    }

    pub fn insert_wish(&self, wish: WishRecord) -> Result<(), Errors> {
        self.lock()?.wishes.insert(wish.id, wish);
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, Errors> {
        self.tables
            .lock()
            .map_err(|_| Errors::Storage("in-memory store lock poisoned".to_string()))
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UsersService for InMemoryStore {
    async fn find_one(&self, query: UserQuery) -> Result<User, Errors> {
        let tables = self.lock()?;
        let record = tables
            .users
            .get(&query.id)
            .ok_or(Errors::UserNotFound(query.id))?;
        Ok(tables.load_user(record, &query))
    }
}

#[async_trait]
impl WishesService for InMemoryStore {
    async fn find_one(&self, query: WishQuery) -> Result<Wish, Errors> {
        let tables = self.lock()?;
        let record = tables
            .wishes
            .get(&query.id)
            .ok_or(Errors::WishNotFound(query.id))?;
        Ok(tables.load_wish(record, &query))
    }

    async fn update_one(&self, id: WishId, update: WishUpdate) -> Result<Wish, Errors> {
        let mut tables = self.lock()?;
        let record = tables.wishes.get_mut(&id).ok_or(Errors::WishNotFound(id))?;

        if let Some(expected) = update.expected_raised {
            if record.raised != expected {
                return Err(Errors::Conflict(id));
            }
        }
        if let Some(raised) = update.raised {
            record.raised = raised;
        }
        record.updated_at = Utc::now();

        let record = record.clone();
        Ok(tables.load_wish(&record, &WishQuery::by_id(id)))
    }
}

#[async_trait]
impl OffersRepository for InMemoryStore {
    async fn save(&self, offer: NewOffer) -> Result<Offer, Errors> {
        let mut tables = self.lock()?;
        if !tables.users.contains_key(&offer.user.id) {
            return Err(Errors::UserNotFound(offer.user.id));
        }
        if !tables.wishes.contains_key(&offer.item.id) {
            return Err(Errors::WishNotFound(offer.item.id));
        }

        let id = tables
            .last_offer_id
            .checked_add(1)
            .ok_or_else(|| Errors::Storage("offer ids exhausted".to_string()))?;
        tables.last_offer_id = id;

        let record = OfferRecord {
            id,
            amount: offer.amount,
            hidden: offer.hidden,
            user_id: offer.user.id,
            item_id: offer.item.id,
            created_at: Utc::now(),
        };
        tables.offers.insert(id, record.clone());

        let query = OfferQuery::by_id(id)
            .with(OfferRelation::User)
            .with(OfferRelation::Item);
        Ok(tables.load_offer(&record, &query))
    }

    async fn find(&self, query: OfferQuery) -> Result<Vec<Offer>, Errors> {
        let tables = self.lock()?;
        Ok(tables
            .offers
            .values()
            .filter(|o| query.matches(o.id, o.user_id, o.item_id))
            .map(|o| tables.load_offer(o, &query))
            .collect())
    }
}
