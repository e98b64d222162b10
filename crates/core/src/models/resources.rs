use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::RecordId;

/// Someone who lends cards for bookings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Friend {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partner_id: Option<RecordId>,
}

/// Business partner with a profit share.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Partner {
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub mobile: Option<String>,
    #[serde(default)]
    pub share_percentage: Decimal,
}

/// E-commerce platform bookings are placed on.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Platform {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// Lifecycle of a phone booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Booked,
    Received,
    Sold,
    Cancelled,
}

/// A phone ordered on a platform with a borrowed card.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MobileBooking {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub platform_id: RecordId,
    pub credit_card_id: RecordId,
    pub phone_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub net_amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supercoin_amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gift_card_amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cashback_amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cashback_percentage: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_emi: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emi_cancellation_charge: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partner_id: Option<RecordId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selling_price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buyer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_received_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_received_amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selling_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<BookingStatus>,
}

/// Where a seller payment landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    CreditCard,
    Friend,
    BankAccount,
}

/// Money received from the buyer of a booked phone.
///
/// The trailing optional fields are joined in by the server from the
/// booking and are ignored on write.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SellerPayment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<RecordId>,
    pub mobile_booking_id: RecordId,
    pub seller_name: String,
    pub payment_amount: Decimal,
    pub payment_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub received_by_account_type: Option<AccountType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub received_by_credit_card_id: Option<RecordId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub received_by_friend_id: Option<RecordId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub received_by_account_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub friend_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform_name: Option<String>,
}

/// Query parameters accepted by `GET /api/seller-payments`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SellerPaymentFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile_booking_id: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seller_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}
