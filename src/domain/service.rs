// src/domain/service.rs
use std::sync::Arc;

use log::{error, info, warn};

use super::core::{Errors, OfferId, UserId};
use super::offers::{
    validate_contribution, CreateOffer, NewOffer, Offer, OfferQuery, OfferRelation,
};
use super::ports::{OffersRepository, UsersService, WishesService};
use super::users::{UserQuery, UserRelation};
use super::wishes::{WishQuery, WishRelation, WishUpdate};

/// Accepts contributions toward wishes and looks up stored offers.
#[derive(Clone)]
pub struct OffersService {
    offers: Arc<dyn OffersRepository>,
    wishes: Arc<dyn WishesService>,
    users: Arc<dyn UsersService>,
}

impl OffersService {
    pub fn new(
        offers: Arc<dyn OffersRepository>,
        wishes: Arc<dyn WishesService>,
        users: Arc<dyn UsersService>,
    ) -> Self {
        OffersService { offers, wishes, users }
    }

    /// Records `contribution` from `user_id` and adds it to the wish's
    /// raised total.
    ///
    /// The raised total is written with a compare-and-set on the value read
    /// here, so a concurrent contribution to the same wish makes this call
    /// fail with `Errors::Conflict` instead of overwriting it. If the offer
    /// cannot be stored afterwards the raised total is put back.
    pub async fn create(
        &self,
        contribution: CreateOffer,
        user_id: UserId,
    ) -> Result<Offer, Errors> {
        let user = self
            .users
            .find_one(
                UserQuery::by_id(user_id)
                    .with(UserRelation::Wishes)
                    .with(UserRelation::Wishlists)
                    .with(UserRelation::Offers),
            )
            .await?;

        let wish = self
            .wishes
            .find_one(
                WishQuery::by_id(contribution.item_id)
                    .with(WishRelation::Owner)
                    .with(WishRelation::Offers),
            )
            .await?;

        let new_raised =
            validate_contribution(&user, &wish, contribution.amount).map_err(|err| {
                warn!(
                    "Rejected offer of {} from user {} to wish {}: {}",
                    contribution.amount, user.id, wish.id, err
                );
                err
            })?;

        let updated = self
            .wishes
            .update_one(wish.id, WishUpdate::raised(new_raised).if_raised(wish.raised))
            .await?;

        let new_offer = NewOffer {
            amount: contribution.amount,
            hidden: contribution.hidden,
            user: user.to_ref(),
            item: updated.to_ref(),
        };

        match self.offers.save(new_offer).await {
            Ok(offer) => {
                info!(
                    "Accepted offer {} of {} from user {} to wish {}",
                    offer.id, offer.amount, user.id, wish.id
                );
                Ok(offer)
            }
            Err(err) => {
                let restore = WishUpdate::raised(wish.raised).if_raised(new_raised);
                if let Err(restore_err) = self.wishes.update_one(wish.id, restore).await {
                    error!(
                        "Could not restore raised total of wish {} to {} after failed offer: {}",
                        wish.id, wish.raised, restore_err
                    );
                }
                Err(err)
            }
        }
    }

    pub async fn find_one(&self, query: OfferQuery) -> Result<Offer, Errors> {
        self.offers
            .find(query)
            .await?
            .into_iter()
            .next()
            .ok_or(Errors::OfferNotFound)
    }

    pub async fn find_offer_by_id(&self, id: OfferId) -> Result<Offer, Errors> {
        self.find_one(
            OfferQuery::by_id(id)
                .with(OfferRelation::User)
                .with(OfferRelation::Item),
        )
        .await
    }

    pub async fn find_all(&self) -> Result<Vec<Offer>, Errors> {
        self.offers
            .find(
                OfferQuery::all()
                    .with(OfferRelation::User)
                    .with(OfferRelation::Item),
            )
            .await
    }
}
