use wishlist_offers::domain::{
    Errors, NewOffer, OfferQuery, OfferRelation, OffersRepository, UserQuery, UserRef,
    UserRelation, UsersService, WishQuery, WishRef, WishRelation, WishUpdate, WishesService,
};
use wishlist_offers::persistence::json_file::{read_snapshot, write_snapshot};
use wishlist_offers::persistence::{InMemoryStore, OfferRecord};
#[path="utils/mod.rs"] mod utils;
use utils::*;

fn new_offer(amount: i64, user_id: i64, item_id: i64) -> NewOffer {
    NewOffer {
        amount: units(amount),
        hidden: false,
        user: UserRef {
            id: user_id,
            username: String::new(),
        },
        item: WishRef {
            id: item_id,
            name: String::new(),
            price: units(0),
            raised: units(0),
        },
    }
}

#[tokio::test]
async fn user_relations_are_loaded_on_request() {
    let store = sample_store();
    store.save(new_offer(5, contributor_id(), sample_wish_id())).await.unwrap();

    let bare = UsersService::find_one(store.as_ref(), UserQuery::by_id(owner_id()))
        .await
        .unwrap();
    assert_eq!(bare.username, "owner");
    assert!(bare.wishes.is_none());
    assert!(bare.wishlists.is_none());
    assert!(bare.offers.is_none());

    let owner = UsersService::find_one(
        store.as_ref(),
        UserQuery::by_id(owner_id())
            .with(UserRelation::Wishes)
            .with(UserRelation::Wishlists)
            .with(UserRelation::Offers),
    )
    .await
    .unwrap();
    assert_eq!(owner.wishes, Some(vec![sample_wish_id(), funded_wish_id()]));
    assert_eq!(owner.wishlists, Some(vec![10]));
    assert_eq!(owner.offers, Some(vec![]));

    let contributor = UsersService::find_one(
        store.as_ref(),
        UserQuery::by_id(contributor_id()).with(UserRelation::Offers),
    )
    .await
    .unwrap();
    assert_eq!(contributor.offers, Some(vec![1]));
}

#[tokio::test]
async fn wish_relations_are_loaded_on_request() {
    let store = sample_store();
    store.save(new_offer(5, contributor_id(), sample_wish_id())).await.unwrap();

    let wish = WishesService::find_one(
        store.as_ref(),
        WishQuery::by_id(sample_wish_id())
            .with(WishRelation::Owner)
            .with(WishRelation::Offers),
    )
    .await
    .unwrap();

    assert_eq!(wish.owner.map(|o| o.id), Some(owner_id()));
    assert_eq!(wish.offers, Some(vec![1]));
    assert_eq!(wish.price, units(100));
}

#[tokio::test]
async fn missing_entities_are_not_found() {
    let store = sample_store();

    let err = UsersService::find_one(store.as_ref(), UserQuery::by_id(unknown_user_id()))
        .await
        .unwrap_err();
    assert_eq!(err, Errors::UserNotFound(unknown_user_id()));

    let err = WishesService::find_one(store.as_ref(), WishQuery::by_id(unknown_wish_id()))
        .await
        .unwrap_err();
    assert_eq!(err, Errors::WishNotFound(unknown_wish_id()));

    let err = store
        .save(new_offer(5, contributor_id(), unknown_wish_id()))
        .await
        .unwrap_err();
    assert_eq!(err, Errors::WishNotFound(unknown_wish_id()));
}

#[tokio::test]
async fn update_applies_when_precondition_holds() {
    let store = sample_store();

    let updated = store
        .update_one(sample_wish_id(), WishUpdate::raised(units(55)).if_raised(units(40)))
        .await
        .unwrap();

    assert_eq!(updated.raised, units(55));
    assert!(updated.updated_at > sample_created_at());
}

#[tokio::test]
async fn stale_precondition_is_a_conflict() {
    let store = sample_store();

    let err = store
        .update_one(sample_wish_id(), WishUpdate::raised(units(55)).if_raised(units(10)))
        .await
        .unwrap_err();

    assert_eq!(err, Errors::Conflict(sample_wish_id()));
    let wish = WishesService::find_one(store.as_ref(), WishQuery::by_id(sample_wish_id()))
        .await
        .unwrap();
    assert_eq!(wish.raised, units(40));
}

#[tokio::test]
async fn offer_ids_continue_after_snapshot_offers() {
    let mut snapshot = sample_snapshot();
    let store = InMemoryStore::from_snapshot(snapshot.clone());
    store.save(new_offer(5, contributor_id(), sample_wish_id())).await.unwrap();
    store.save(new_offer(6, contributor_id(), sample_wish_id())).await.unwrap();
    snapshot.offers = store.snapshot().unwrap().offers;

    let reloaded = InMemoryStore::from_snapshot(snapshot);
    let offer = reloaded
        .save(new_offer(7, other_contributor_id(), sample_wish_id()))
        .await
        .unwrap();

    assert_eq!(offer.id, 3);
}

#[tokio::test]
async fn exhausted_offer_ids_are_a_storage_error() {
    let mut snapshot = sample_snapshot();
    snapshot.offers.push(OfferRecord {
        id: i64::MAX,
        amount: units(1),
        hidden: false,
        user_id: contributor_id(),
        item_id: sample_wish_id(),
        created_at: sample_created_at(),
    });
    let store = InMemoryStore::from_snapshot(snapshot);

    let err = store
        .save(new_offer(5, contributor_id(), sample_wish_id()))
        .await
        .unwrap_err();

    assert!(matches!(err, Errors::Storage(_)));
    assert_eq!(store.find(OfferQuery::all()).await.unwrap().len(), 1);
}

#[tokio::test]
async fn find_filters_and_orders_by_id() {
    let store = sample_store();
    store.save(new_offer(1, contributor_id(), sample_wish_id())).await.unwrap();
    store.save(new_offer(2, other_contributor_id(), sample_wish_id())).await.unwrap();
    store.save(new_offer(3, contributor_id(), funded_wish_id())).await.unwrap();

    let by_user = store
        .find(OfferQuery::by_user(contributor_id()).with(OfferRelation::Item))
        .await
        .unwrap();
    let ids: Vec<i64> = by_user.iter().map(|o| o.id).collect();
    assert_eq!(ids, vec![1, 3]);
    assert!(by_user.iter().all(|o| o.item.is_some() && o.user.is_none()));

    let by_item = store.find(OfferQuery::by_item(funded_wish_id())).await.unwrap();
    assert_eq!(by_item.len(), 1);
    assert_eq!(by_item[0].amount, units(3));
}

#[tokio::test]
async fn snapshot_survives_a_round_trip_through_a_file() {
    let store = sample_store();
    store.save(new_offer(5, contributor_id(), sample_wish_id())).await.unwrap();
    let snapshot = store.snapshot().unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("offers.json");
    write_snapshot(&path, &snapshot).unwrap();

    assert_eq!(read_snapshot(&path).unwrap(), snapshot);
}

#[test]
fn snapshot_file_may_omit_offers() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("seed.json");
    std::fs::write(
        &path,
        r#"{
            "users": [{"id": 1, "username": "owner"}],
            "wishes": [{"id": 1, "name": "bike", "price": 100, "ownerId": 1,
                        "createdAt": "2016-01-01T08:28:00Z", "updatedAt": "2016-01-01T08:28:00Z"}]
        }"#,
    )
    .unwrap();

    let snapshot = read_snapshot(&path).unwrap();

    assert_eq!(snapshot.users.len(), 1);
    assert_eq!(snapshot.wishes[0].raised, units(0));
    assert_eq!(snapshot.wishes[0].created_at, sample_created_at());
    assert!(snapshot.offers.is_empty());
}

#[test]
fn unreadable_snapshot_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "not json").unwrap();

    assert!(read_snapshot(&path).is_err());
    assert!(read_snapshot(dir.path().join("missing.json")).is_err());
}
