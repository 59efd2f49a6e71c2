//! Shared types for the gift-card redemption gateway.
//!
//! * [`objects`] – action payloads and result records exchanged with the
//!   storefront.
//! * [`code`] – the discount-code codec that carries redemption metadata
//!   from `CREATE` to `CANCELREDEEM`.
//! * `client` (feature `client`) – typed HTTP client for the gateway endpoint.

#![forbid(unsafe_code)]

#[cfg(feature = "client")]
pub mod client;
pub mod code;
pub mod objects;
