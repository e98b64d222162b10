#![allow(missing_docs)]

//! Shared domain models.
//!
//! Field names follow the REST payloads so records can be passed straight
//! through the HTTP façade.

mod card;
mod resources;

pub use card::{CardCategory, CardDraft, CardPatch, CardRecord, LimitPolicy, NetworkTag};
pub use resources::{
    AccountType, BookingStatus, Friend, MobileBooking, Partner, Platform, SellerPayment,
    SellerPaymentFilters,
};

/// Identifier assigned by the server.
pub type RecordId = i64;
