use serde::{Deserialize, Serialize};

use crate::domain::{CreateOffer, Errors, OffersService, WishId};
use crate::money::Amount;

pub type AppState = OffersService;

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateOfferRequest {
    pub amount: Amount,
    #[serde(rename = "itemId")]
    pub item_id: WishId,
    #[serde(default)]
    pub hidden: bool,
}

impl CreateOfferRequest {
    pub fn to_create_offer(&self) -> Result<CreateOffer, Errors> {
        if self.amount.is_zero() {
            return Err(Errors::InvalidAmount("Amount must be positive".to_string()));
        }

        Ok(CreateOffer {
            amount: self.amount,
            item_id: self.item_id,
            hidden: self.hidden,
        })
    }
}
