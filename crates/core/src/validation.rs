//! Checks run on form drafts before anything is sent to the server.
//!
//! Each validator stops at the first problem it finds; the error's display
//! text is what the form shows.

use chrono::{Datelike, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::card::{classify, validate_length};
use crate::models::{CardDraft, Friend, MobileBooking, NetworkTag, Platform, RecordId, SellerPayment};

static CVV_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{3,4}$").expect("failed to compile cvv regex"));
static MOBILE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{10}$").expect("failed to compile mobile regex"));

/// A draft that must not be submitted.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter email/username and password")]
    MissingCredentials,
    #[error("Please select card holder type (Friend or Partner)")]
    MissingCardHolder,
    #[error("Card name, card number, expiry, and CVV are required")]
    MissingCardFields,
    #[error("Cashback limit type is required")]
    MissingLimitPolicy,
    /// Digit count does not fit the network the number was classified as.
    #[error("{}", card_length_message(.0))]
    CardNumberLength(NetworkTag),
    #[error("Expiry month must be between 01 and 12")]
    ExpiryMonth,
    #[error("Expiry year must be current year or future")]
    ExpiryYear,
    #[error("CVV must be 3 or 4 digits")]
    Cvv,
    #[error("Friend name is required")]
    MissingFriendName,
    #[error("Please select a partner")]
    MissingPartner,
    #[error("Mobile number must be 10 digits")]
    MobileNumber,
    #[error("Platform name is required")]
    MissingPlatformName,
    #[error("Platform, credit card, phone name, and net amount are required")]
    MissingBookingFields,
    #[error("Net amount must be greater than 0")]
    NetAmount,
    #[error("Booking, seller name, and payment amount are required")]
    MissingPaymentFields,
    #[error("Payment amount must be greater than 0")]
    PaymentAmount,
}

fn card_length_message(tag: &NetworkTag) -> &'static str {
    match tag {
        NetworkTag::Visa => "Visa card number must be 13-19 digits",
        NetworkTag::Mastercard => "Mastercard number must be 16 digits",
        NetworkTag::Rupay => "RuPay card number must be 16 digits",
        NetworkTag::Unknown => "Card number must be 16 digits",
    }
}

fn blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn chosen(id: Option<RecordId>) -> bool {
    id.is_some_and(|id| id != 0)
}

/// Login form: both fields must be filled in.
pub fn validate_credentials(identifier: &str, password: &str) -> Result<(), ValidationError> {
    if blank(identifier) || password.is_empty() {
        return Err(ValidationError::MissingCredentials);
    }
    Ok(())
}

/// Card draft, judged against today's year.
pub fn validate_card(draft: &CardDraft) -> Result<(), ValidationError> {
    let current_year = (Utc::now().year() % 100) as u32;
    validate_card_at(draft, current_year)
}

/// Card draft, with `current_year` as the two-digit year expiry is compared to.
pub fn validate_card_at(draft: &CardDraft, current_year: u32) -> Result<(), ValidationError> {
    if !chosen(draft.friend_id) && !chosen(draft.partner_id) {
        return Err(ValidationError::MissingCardHolder);
    }
    if [
        &draft.card_name,
        &draft.card_number,
        &draft.expiry_mm,
        &draft.expiry_yy,
        &draft.cvv,
    ]
    .into_iter()
    .any(|field| blank(field))
    {
        return Err(ValidationError::MissingCardFields);
    }
    if draft.limit_type.is_none() {
        return Err(ValidationError::MissingLimitPolicy);
    }

    let tag = classify(&draft.card_number);
    if !validate_length(&draft.card_number, tag) {
        return Err(ValidationError::CardNumberLength(tag));
    }

    match draft.expiry_mm.trim().parse::<u32>() {
        Ok(month) if (1..=12).contains(&month) => {}
        _ => return Err(ValidationError::ExpiryMonth),
    }
    match draft.expiry_yy.trim().parse::<u32>() {
        Ok(year) if year >= current_year => {}
        _ => return Err(ValidationError::ExpiryYear),
    }

    if !CVV_RE.is_match(&draft.cvv) {
        return Err(ValidationError::Cvv);
    }
    Ok(())
}

/// Friend draft; mobile is optional but must be ten digits when given.
pub fn validate_friend(friend: &Friend) -> Result<(), ValidationError> {
    if blank(&friend.name) {
        return Err(ValidationError::MissingFriendName);
    }
    if !chosen(friend.partner_id) {
        return Err(ValidationError::MissingPartner);
    }
    match friend.mobile.as_deref().map(str::trim) {
        Some(mobile) if !mobile.is_empty() && !MOBILE_RE.is_match(mobile) => {
            Err(ValidationError::MobileNumber)
        }
        _ => Ok(()),
    }
}

/// Platform draft.
pub fn validate_platform(platform: &Platform) -> Result<(), ValidationError> {
    if blank(&platform.name) {
        return Err(ValidationError::MissingPlatformName);
    }
    Ok(())
}

/// Booking draft.
pub fn validate_booking(booking: &MobileBooking) -> Result<(), ValidationError> {
    if booking.platform_id == 0 || booking.credit_card_id == 0 || blank(&booking.phone_name) {
        return Err(ValidationError::MissingBookingFields);
    }
    if booking.net_amount <= Decimal::ZERO {
        return Err(ValidationError::NetAmount);
    }
    Ok(())
}

/// Seller payment draft.
pub fn validate_seller_payment(payment: &SellerPayment) -> Result<(), ValidationError> {
    if payment.mobile_booking_id == 0 || blank(&payment.seller_name) {
        return Err(ValidationError::MissingPaymentFields);
    }
    if payment.payment_amount <= Decimal::ZERO {
        return Err(ValidationError::PaymentAmount);
    }
    Ok(())
}
