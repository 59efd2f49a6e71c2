//! Redemption data as returned by the gift-card API to the storefront.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Identifier;

/// The result of a gift-card redemption, forwarded by the storefront.
///
/// Only the fields the gateway needs are modelled; anything else in the
/// payload is ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RedeemData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_batch_number: Option<Identifier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<Identifier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cards: Option<Vec<Card>>,
}

/// A single redeemed card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Card {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_number: Option<Identifier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approval_code: Option<Identifier>,
}

impl RedeemData {
    /// The first card of the redemption, if any.
    pub fn first_card(&self) -> Option<&Card> {
        self.cards.as_ref().and_then(|cards| cards.first())
    }

    /// The redeemed amount when it is present and strictly positive.
    pub fn positive_amount(&self) -> Option<Decimal> {
        self.total_amount.filter(|amount| amount.is_sign_positive() && !amount.is_zero())
    }
}
