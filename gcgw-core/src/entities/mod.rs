//! Remote entities and the operations the gateway performs on them.
//!
//! Each operation is a plain input struct with a `Processor` implementation
//! on [`AdminApiProcessor`](crate::framework::AdminApiProcessor) or
//! [`GiftCardProcessor`](crate::framework::GiftCardProcessor).

pub mod discount_code;
pub mod gift_card;
pub mod price_rule;
